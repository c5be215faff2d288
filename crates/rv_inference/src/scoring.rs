use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;
use serde_json::Value;
use tracing::{info, warn};
use rv_core::{contract, Result, ScoredVideo, TextModel, UserIntent, Video};
use crate::single_line;

pub const DESCRIPTION_LIMIT: usize = 200;
pub(crate) const SCORING_PROMPT_HEADER: &str = "You are an assistant that rates cooking videos.";
pub(crate) const VIDEO_LABEL: &str = "Video";

/// Asks the model how well each candidate matches the intent and ranks them.
#[derive(Debug, Clone)]
pub struct VideoScorer {
    model: Arc<dyn TextModel>,
}

#[derive(Debug, Clone, PartialEq)]
struct ScoreEntry {
    video: Option<usize>,
    score: u8,
    reason: String,
}

impl VideoScorer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub fn build_prompt(&self, intent: &UserIntent, videos: &[Video]) -> String {
        let mut blocks = String::new();
        for (index, video) in videos.iter().enumerate() {
            let description: String = video.description.chars().take(DESCRIPTION_LIMIT).collect();
            let description = single_line(&description);
            let _ = write!(
                blocks,
                "\n{} {}:\n- Title: {}\n- Description: {}\n- Channel: {}\n",
                VIDEO_LABEL,
                index + 1,
                single_line(&video.title),
                description,
                single_line(&video.channel_title),
            );
        }

        format!(
            r#"{header}
Compare the user's request with each video and rate how well it fits on a scale from 0 to 100.

# User request
Mood: {mood}
Ingredients: {ingredients}
Cooking time: within {minutes} minutes

# Videos
{blocks}
# Rating criteria
- Uses the requested ingredients: high importance
- Title or description mentions "easy", "quick" or similar: medium importance
- Fits the mood: medium importance
- The Ryuji and Dareuma channels mostly publish simple recipes: for reference

# Output format
Answer with a JSON array and nothing else, one element per video, in the same order as the list above.
Put the video's number in "video":
[
  {{"video": 1, "score": 85, "reason": "short explanation"}},
  {{"video": 2, "score": 70, "reason": "short explanation"}}
]
"#,
            header = SCORING_PROMPT_HEADER,
            mood = single_line(&intent.mood),
            ingredients = single_line(&intent.ingredient_list()),
            minutes = intent.max_cooking_time,
            blocks = blocks,
        )
    }

    /// Scores `videos` and returns them sorted by descending score.
    ///
    /// The output always has one entry per input video. Ties keep input order.
    pub async fn score(&self, intent: &UserIntent, videos: Vec<Video>) -> Result<Vec<ScoredVideo>> {
        if videos.is_empty() {
            info!("No candidate videos to score");
            return Ok(Vec::new());
        }

        info!("📊 Scoring {} videos with {}", videos.len(), self.model.name());
        let prompt = self.build_prompt(intent, &videos);
        let text = self.model.generate(&prompt).await?;
        let entries = contract::parse_array(&text)?;

        if entries.len() != videos.len() {
            warn!(
                "Model returned {} scores for {} videos, unmatched videos are marked unscored",
                entries.len(),
                videos.len()
            );
        }

        let scored = rank(merge_scores(videos, &entries));
        if let Some(best) = scored.first() {
            info!("✨ Best match: {} ({})", best.video.title, best.score);
        }
        Ok(scored)
    }
}

fn parse_entry(value: &Value) -> Option<ScoreEntry> {
    let object = value.as_object()?;
    let score = object.get("score")?.as_f64()?;
    if !score.is_finite() {
        return None;
    }
    let reason = object
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(ScoredVideo::UNSCORED_REASON)
        .to_string();
    let video = object
        .get("video")
        .and_then(Value::as_u64)
        .and_then(|number| usize::try_from(number).ok());

    Some(ScoreEntry {
        video,
        score: score.round().clamp(0.0, 100.0) as u8,
        reason,
    })
}

/// Correlates model entries with videos.
///
/// When every well-formed entry names a distinct, in-range video number the
/// numbers are trusted; otherwise entries are matched by array position.
fn merge_scores(videos: Vec<Video>, entries: &[Value]) -> Vec<ScoredVideo> {
    let parsed: Vec<Option<ScoreEntry>> = entries.iter().map(parse_entry).collect();
    let count = videos.len();

    let mut seen = HashSet::new();
    let numbered = parsed.iter().any(Option::is_some)
        && parsed.iter().flatten().all(|entry| {
            matches!(entry.video, Some(n) if (1..=count).contains(&n) && seen.insert(n))
        });

    let mut slots: Vec<Option<ScoreEntry>> = vec![None; count];
    for (position, entry) in parsed.into_iter().enumerate() {
        let Some(entry) = entry else { continue };
        let slot = if numbered {
            entry.video.map(|n| n - 1)
        } else {
            Some(position)
        };
        if let Some(slot) = slot.filter(|slot| *slot < count) {
            slots[slot] = Some(entry);
        }
    }

    videos
        .into_iter()
        .zip(slots)
        .map(|(video, entry)| match entry {
            Some(entry) => ScoredVideo::new(video, entry.score, entry.reason),
            None => ScoredVideo::unscored(video),
        })
        .collect()
}

fn rank(mut videos: Vec<ScoredVideo>) -> Vec<ScoredVideo> {
    // stable: equal scores keep their input order
    videos.sort_by(|a, b| b.score.cmp(&a.score));
    videos
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video(id: &str) -> Video {
        Video {
            video_id: id.to_string(),
            title: format!("title {}", id),
            description: format!("description {}", id),
            thumbnail_url: String::new(),
            channel_title: "channel".to_string(),
            published_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            url: Video::watch_url(id),
        }
    }

    fn ids(videos: &[ScoredVideo]) -> Vec<&str> {
        videos.iter().map(|v| v.video.video_id.as_str()).collect()
    }

    #[test]
    fn test_merge_by_position() {
        let entries = vec![
            json!({"score": 10, "reason": "a"}),
            json!({"score": 90, "reason": "b"}),
        ];
        let merged = merge_scores(vec![video("a"), video("b")], &entries);
        assert_eq!(merged[0].score, 10);
        assert_eq!(merged[1].score, 90);
        assert_eq!(merged[1].reason, "b");
    }

    #[test]
    fn test_merge_by_video_number() {
        let entries = vec![
            json!({"video": 2, "score": 90, "reason": "second"}),
            json!({"video": 1, "score": 10, "reason": "first"}),
        ];
        let merged = merge_scores(vec![video("a"), video("b")], &entries);
        assert_eq!(merged[0].reason, "first");
        assert_eq!(merged[1].reason, "second");
    }

    #[test]
    fn test_duplicate_numbers_fall_back_to_position() {
        let entries = vec![
            json!({"video": 1, "score": 40, "reason": "x"}),
            json!({"video": 1, "score": 60, "reason": "y"}),
        ];
        let merged = merge_scores(vec![video("a"), video("b")], &entries);
        assert_eq!(merged[0].score, 40);
        assert_eq!(merged[1].score, 60);
    }

    #[test]
    fn test_short_and_malformed_entries_default() {
        let entries = vec![json!("not an object"), json!({"score": "high"})];
        let merged = merge_scores(vec![video("a"), video("b"), video("c")], &entries);
        assert_eq!(merged.len(), 3);
        for scored in &merged {
            assert_eq!(scored.score, 0);
            assert_eq!(scored.reason, "could not be evaluated");
        }
    }

    #[test]
    fn test_scores_are_rounded_and_clamped() {
        let entries = vec![
            json!({"score": 140}),
            json!({"score": -5, "reason": "bad"}),
            json!({"score": 72.6, "reason": "ok"}),
        ];
        let merged = merge_scores(vec![video("a"), video("b"), video("c")], &entries);
        assert_eq!(merged[0].score, 100);
        assert_eq!(merged[0].reason, "could not be evaluated");
        assert_eq!(merged[1].score, 0);
        assert_eq!(merged[2].score, 73);
    }

    #[test]
    fn test_rank_is_stable() {
        let ranked = rank(vec![
            ScoredVideo::new(video("a"), 50, "x"),
            ScoredVideo::new(video("b"), 80, "x"),
            ScoredVideo::new(video("c"), 50, "x"),
            ScoredVideo::new(video("d"), 80, "x"),
        ]);
        assert_eq!(ids(&ranked), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_prompt_truncates_description() {
        let mut long = video("a");
        long.description = "あ".repeat(300);
        let scorer = VideoScorer::new(Arc::new(crate::models::DummyModel::new()));
        let intent = UserIntent {
            mood: "happy".to_string(),
            ingredients: vec!["egg".to_string()],
            max_cooking_time: 10,
        };
        let prompt = scorer.build_prompt(&intent, &[long, video("b")]);
        assert!(prompt.contains(&format!("- Description: {}\n", "あ".repeat(200))));
        assert!(!prompt.contains(&"あ".repeat(201)));
        assert!(prompt.contains("Video 1:"));
        assert!(prompt.contains("Video 2:"));
        assert!(prompt.contains("- Title: title b"));
    }
}
