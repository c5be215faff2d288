use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;
use rv_core::{ScoredVideo, UserIntent, Video};
use rv_web::handlers::{KeywordResponse, ScoreRequest, ScoreResponse, SearchRequest, SearchResponse};
use rv_web::{KEYWORDS_PATH, SCORE_PATH, SEARCH_PATH};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Calls the three endpoints of a running `rv serve`.
pub struct PipelineClient {
    client: Client,
    base: Url,
}

impl PipelineClient {
    pub fn new(server: &str) -> Result<Self> {
        let base = Url::parse(server).with_context(|| format!("invalid server URL '{}'", server))?;
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = self.base.join(path)?;
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .with_context(|| format!("cannot reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            bail!("{} ({})", message, status.as_u16());
        }
        response
            .json::<R>()
            .await
            .map_err(|e| anyhow!("unexpected response from {}: {}", url, e))
    }

    pub async fn generate_keyword(&self, intent: &UserIntent) -> Result<String> {
        let response: KeywordResponse = self.post(KEYWORDS_PATH, intent).await?;
        Ok(response.keyword)
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Video>> {
        let request = SearchRequest {
            keywords: keyword.to_string(),
        };
        let response: SearchResponse = self.post(SEARCH_PATH, &request).await?;
        Ok(response.videos)
    }

    pub async fn score(&self, intent: &UserIntent, videos: Vec<Video>) -> Result<Vec<ScoredVideo>> {
        let request = ScoreRequest {
            user_input: intent.clone(),
            videos,
        };
        let response: ScoreResponse = self.post(SCORE_PATH, &request).await?;
        Ok(response.videos)
    }
}
