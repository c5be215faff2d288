use std::fmt;

pub mod keywords;
pub mod models;
pub mod scoring;

pub use keywords::KeywordGenerator;
pub use models::create_model;
pub use scoring::VideoScorer;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Folds line breaks in user or upstream text so it cannot open new prompt sections.
pub(crate) fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    /// Overrides the API root, mostly useful against a local proxy
    pub base_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_model;
    pub use super::{KeywordGenerator, VideoScorer};
    pub use rv_core::{Error, Result, ScoredVideo, TextModel, UserIntent, Video};
}
