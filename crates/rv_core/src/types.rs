use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// What the user asked for: how they feel, what is in the fridge, how long they have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIntent {
    pub mood: String,
    pub ingredients: Vec<String>,
    /// Minutes
    pub max_cooking_time: u32,
}

impl UserIntent {
    /// Trims ingredient names, drops blank ones and rejects intents no stage can work with.
    pub fn normalized(self) -> Result<Self> {
        let ingredients: Vec<String> = self
            .ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect();

        if ingredients.is_empty() {
            return Err(Error::InvalidInput("at least one ingredient is required".to_string()));
        }
        if self.max_cooking_time == 0 {
            return Err(Error::InvalidInput("maxCookingTime must be a positive number of minutes".to_string()));
        }

        Ok(Self {
            mood: self.mood.trim().to_string(),
            ingredients,
            max_cooking_time: self.max_cooking_time,
        })
    }

    pub fn ingredient_list(&self) -> String {
        self.ingredients.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "thumbnail", alias = "thumbnailUrl", default)]
    pub thumbnail_url: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub url: String,
}

impl Video {
    pub fn watch_url(video_id: &str) -> String {
        format!("{}{}", WATCH_URL, video_id)
    }
}

/// A [`Video`] with the relevance judgement attached. Serializes flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVideo {
    #[serde(flatten)]
    pub video: Video,
    pub score: u8,
    pub reason: String,
}

impl ScoredVideo {
    pub const UNSCORED_REASON: &'static str = "could not be evaluated";

    pub fn new(video: Video, score: u8, reason: impl Into<String>) -> Self {
        Self {
            video,
            score: score.min(100),
            reason: reason.into(),
        }
    }

    pub fn unscored(video: Video) -> Self {
        Self::new(video, 0, Self::UNSCORED_REASON)
    }
}
