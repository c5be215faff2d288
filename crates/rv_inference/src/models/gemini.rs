use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use rv_core::{Error, Result, TextModel};
use crate::{Config, DEFAULT_GEMINI_MODEL};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    endpoint: Url,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl GeminiModel {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: Config, client: Client) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("Gemini API key is required".to_string()))?;
        let model_name = config
            .model_name
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let mut base = config.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|base| base.join(&format!("models/{}:generateContent", model_name)))
            .map_err(|e| Error::Config(format!("invalid Gemini base URL '{}': {}", base, e)))?;

        Ok(Self {
            client,
            api_key,
            model_name,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String> {
    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or_else(|| Error::contract("Gemini returned no candidates"))?;

    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.trim().is_empty() {
        return Err(Error::contract("Gemini returned an empty candidate"));
    }
    Ok(text)
}

#[async_trait]
impl TextModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!("Calling {} ({})", self.name(), self.model_name);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                service: "gemini".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = extract_text(response.json::<GenerateResponse>().await?)?;
        tracing::debug!("Gemini answered: {}", text);
        Ok(text)
    }
}
