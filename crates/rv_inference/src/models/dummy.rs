use std::fmt;
use serde_json::json;
use rv_core::{Result, TextModel};
use crate::keywords::INGREDIENTS_LABEL;
use crate::scoring::{SCORING_PROMPT_HEADER, VIDEO_LABEL};

/// Offline stand-in that answers the keyword and scoring prompts deterministically.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }

    fn keyword_answer(prompt: &str) -> String {
        let ingredients = prompt
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix(INGREDIENTS_LABEL))
            .unwrap_or_default();

        let mut terms: Vec<&str> = ingredients
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .collect();
        terms.extend(["easy", "quick"]);

        json!({ "keyword": terms.join(" ") }).to_string()
    }

    fn score_answer(prompt: &str) -> String {
        let videos = prompt
            .lines()
            .filter_map(|line| line.strip_prefix(VIDEO_LABEL))
            .filter_map(|rest| rest.trim().strip_suffix(':'))
            .filter_map(|number| number.parse::<usize>().ok())
            .map(|number| json!({ "video": number, "score": 50, "reason": "dummy score" }))
            .collect::<Vec<_>>();

        format!("```json\n{}\n```", serde_json::Value::Array(videos))
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.starts_with(SCORING_PROMPT_HEADER) {
            Ok(Self::score_answer(prompt))
        } else {
            Ok(Self::keyword_answer(prompt))
        }
    }
}
