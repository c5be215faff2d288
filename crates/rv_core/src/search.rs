use async_trait::async_trait;
use std::fmt;
use crate::{Error, Result, Video};

pub const DEFAULT_PER_CHANNEL_LIMIT: usize = 3;
pub const DEFAULT_MAX_TOTAL: usize = 10;

/// Which channels to search and how much to keep from them.
///
/// Built once at startup and handed to the search stage; nothing reads
/// channel ids from the environment after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    channel_ids: Vec<String>,
    pub per_channel_limit: usize,
    pub max_total: usize,
}

impl SearchConfig {
    pub fn new<I, S>(channel_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let channel_ids: Vec<String> = channel_ids
            .into_iter()
            .map(|id| {
                let id: String = id.into();
                id.trim().to_string()
            })
            .collect();

        if channel_ids.is_empty() {
            return Err(Error::Config("at least one channel id is required".to_string()));
        }
        if let Some(position) = channel_ids.iter().position(|id| id.is_empty()) {
            return Err(Error::Config(format!("channel id #{} is empty", position + 1)));
        }

        Ok(Self {
            channel_ids,
            per_channel_limit: DEFAULT_PER_CHANNEL_LIMIT,
            max_total: DEFAULT_MAX_TOTAL,
        })
    }

    pub fn with_per_channel_limit(mut self, limit: usize) -> Self {
        self.per_channel_limit = limit;
        self
    }

    pub fn with_max_total(mut self, max_total: usize) -> Self {
        self.max_total = max_total;
        self
    }

    pub fn channel_ids(&self) -> &[String] {
        &self.channel_ids
    }
}

/// A single per-channel search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelQuery {
    pub channel_id: String,
    pub keyword: String,
    pub max_results: usize,
}

#[async_trait]
pub trait SearchBackend: Send + Sync + fmt::Debug {
    /// Top results for one channel, ordered by relevance, videos only
    async fn search_channel(&self, query: &ChannelQuery) -> Result<Vec<Video>>;
}
