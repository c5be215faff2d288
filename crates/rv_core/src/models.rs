use async_trait::async_trait;
use std::fmt;
use crate::Result;

#[async_trait]
pub trait TextModel: Send + Sync + fmt::Debug {
    /// Human readable backend name, used in logs
    fn name(&self) -> &str;

    /// Send a prompt and return the model's free-form text answer
    async fn generate(&self, prompt: &str) -> Result<String>;
}
