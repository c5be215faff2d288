pub mod manager;
pub mod youtube;

pub use manager::VideoSearch;
pub use youtube::YouTubeClient;

pub mod prelude {
    pub use super::{VideoSearch, YouTubeClient};
    pub use rv_core::{ChannelQuery, Error, Result, SearchBackend, SearchConfig, Video};
}
