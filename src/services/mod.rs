pub mod instagram_service;
pub mod youtube_service;
pub mod twitter_service;
pub mod monitoring_service;

pub use instagram_service::InstagramService;
pub use youtube_service::YouTubeService;
pub use twitter_service::TwitterService;
pub use monitoring_service::MonitoringService;
