use std::sync::Arc;
use rv_core::{Error, Result, TextModel};
use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Builds the text model selected by `kind` (`gemini` or `dummy`).
pub fn create_model(kind: &str, config: Config) -> Result<Arc<dyn TextModel>> {
    match kind.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "unknown model '{}', available models: gemini, dummy",
            other
        ))),
    }
}
