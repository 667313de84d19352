//! Incremental fetch: keep only the items newer than a client's cursor.

use crate::domain::Cursor;

/// Separator between the numeric part and the suffix of a composite
/// identifier, e.g. Instagram story ids `"<story pk>_<owner id>"`.
pub const RANK_SEPARATOR: char = '_';

/// How to treat an item at or below the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffMode {
    /// Input is newest-first: the first old item ends the scan.
    StopAtFirstOld,
    /// Input order is not trusted: old items are dropped and the scan goes on.
    SkipOld,
}

/// A feed item that can be ordered by its platform identifier.
pub trait Ranked {
    fn identifier(&self) -> &str;

    fn rank(&self) -> i64 {
        parse_rank(self.identifier())
    }
}

impl<T: Ranked + ?Sized> Ranked for &T {
    fn identifier(&self) -> &str {
        (**self).identifier()
    }
}

/// Numeric rank of an identifier. Composite ids rank by the part before the
/// first separator; anything unparseable ranks 0 and so looks already seen.
pub fn parse_rank(identifier: &str) -> i64 {
    let numeric = identifier
        .split_once(RANK_SEPARATOR)
        .map_or(identifier, |(head, _)| head);

    numeric.parse().unwrap_or(0)
}

/// Items strictly newer than `cursor`, in input order.
///
/// An unbounded cursor returns the input untouched in both modes, including
/// items whose rank is 0.
pub fn retain_newer<I, T>(items: I, cursor: Cursor, mode: CutoffMode) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Ranked,
{
    let items = items.into_iter();
    if cursor.is_unbounded() {
        return items.collect();
    }

    let is_newer = |item: &T| item.rank() > cursor.value();
    match mode {
        CutoffMode::StopAtFirstOld => items.take_while(is_newer).collect(),
        CutoffMode::SkipOld => items.filter(is_newer).collect(),
    }
}
