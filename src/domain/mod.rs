pub mod cursor;
pub mod cutoff;
pub mod health;
pub mod instagram;
pub mod twitter;
pub mod youtube;

pub use cursor::Cursor;
pub use cutoff::{parse_rank, retain_newer, CutoffMode, Ranked};
pub use health::{Health, HealthStatus};
pub use instagram::{InstaPost, InstaStory, InstaUser};
pub use twitter::{Tweet, TwitterUser};
pub use youtube::Video;
