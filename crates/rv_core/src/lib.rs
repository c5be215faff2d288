pub mod contract;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
pub mod types;

pub use error::{Error, Result};
pub use models::TextModel;
pub use search::{ChannelQuery, SearchBackend, SearchConfig};
pub use types::{ScoredVideo, UserIntent, Video};

pub mod prelude {
    pub use crate::{Error, Result, ScoredVideo, SearchBackend, TextModel, UserIntent, Video};
}
