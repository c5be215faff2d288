use std::sync::Arc;
use futures::future::try_join_all;
use tracing::info;
use rv_core::{ChannelQuery, Error, Result, SearchBackend, SearchConfig, Video};

/// Fans a keyword out to every configured channel and merges the results.
#[derive(Debug, Clone)]
pub struct VideoSearch {
    backend: Arc<dyn SearchBackend>,
    config: SearchConfig,
}

impl VideoSearch {
    pub fn new(backend: Arc<dyn SearchBackend>, config: SearchConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches all channels concurrently.
    ///
    /// Results are concatenated in channel order, at most `per_channel_limit`
    /// per channel and `max_total` overall. Any failing channel fails the call.
    pub async fn search(&self, keyword: &str) -> Result<Vec<Video>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::InvalidInput("search keyword is empty".to_string()));
        }

        let limit = self.config.per_channel_limit;
        info!(
            "🔍 Searching {} channels for '{}'",
            self.config.channel_ids().len(),
            keyword
        );

        let searches = self.config.channel_ids().iter().map(|channel_id| {
            let backend = self.backend.clone();
            let query = ChannelQuery {
                channel_id: channel_id.clone(),
                keyword: keyword.to_string(),
                max_results: limit,
            };
            async move {
                let mut videos = backend.search_channel(&query).await?;
                videos.truncate(limit);
                info!("📺 Channel {} returned {} videos", query.channel_id, videos.len());
                Ok::<_, Error>(videos)
            }
        });

        let mut videos: Vec<Video> = try_join_all(searches).await?.into_iter().flatten().collect();
        videos.truncate(self.config.max_total);

        info!("✨ Found {} videos", videos.len());
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct MockBackend {
        counts: HashMap<String, usize>,
    }

    #[async_trait]
    impl SearchBackend for MockBackend {
        async fn search_channel(&self, query: &ChannelQuery) -> Result<Vec<Video>> {
            let count = self.counts.get(&query.channel_id).copied().unwrap_or(0);
            Ok((0..count)
                .map(|i| {
                    let id = format!("{}-{}", query.channel_id, i);
                    Video {
                        url: Video::watch_url(&id),
                        video_id: id,
                        title: String::new(),
                        description: String::new(),
                        thumbnail_url: String::new(),
                        channel_title: query.channel_id.clone(),
                        published_at: "2024-01-01T00:00:00Z".parse().unwrap(),
                    }
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_backend_overflow_is_capped() {
        let backend = MockBackend {
            counts: HashMap::from([
                ("a".to_string(), 8),
                ("b".to_string(), 8),
                ("c".to_string(), 8),
                ("d".to_string(), 8),
            ]),
        };
        let config = SearchConfig::new(["a", "b", "c", "d"]).unwrap();
        let search = VideoSearch::new(Arc::new(backend), config);

        let videos = search.search("egg").await.unwrap();
        assert_eq!(videos.len(), 10);
        let from_a = videos.iter().filter(|v| v.channel_title == "a").count();
        assert_eq!(from_a, 3);
        assert_eq!(videos[9].video_id, "d-0");
    }

    #[tokio::test]
    async fn test_blank_keyword_is_rejected() {
        let backend = MockBackend { counts: HashMap::new() };
        let search = VideoSearch::new(Arc::new(backend), SearchConfig::new(["a"]).unwrap());
        assert!(matches!(search.search("  ").await, Err(Error::InvalidInput(_))));
    }
}
