/// Highest rank a client has already consumed.
///
/// A zero cursor means "no lower bound": every item is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(i64);

impl Cursor {
    pub const NONE: Cursor = Cursor(0);

    /// Negative values collapse to `NONE`.
    pub fn new(value: i64) -> Self {
        Self(value.max(0))
    }

    /// Parse the `{last}` path segment; absent or malformed input yields `NONE`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::NONE,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(value) => Self::new(value),
                Err(_) => {
                    tracing::debug!(value = raw, "Malformed cursor, fetching everything");
                    Self::NONE
                }
            },
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_unbounded(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for Cursor {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
