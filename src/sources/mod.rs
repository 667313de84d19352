pub mod traits;
pub mod instagram;
pub mod youtube;
pub mod twitter;

pub use traits::{
    InstagramApi, InstagramMedia, InstagramProfile, InstagramStoryItem, TwitterApi, YouTubeApi,
    YouTubeSearchResult,
};
pub use instagram::{InstagramClient, SessionCredentials};
pub use youtube::YouTubeClient;
pub use twitter::TwitterClient;
