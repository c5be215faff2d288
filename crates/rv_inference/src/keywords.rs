use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use rv_core::{contract, Error, Result, TextModel, UserIntent};
use crate::single_line;

pub const DEFAULT_KEYWORD_LANGUAGE: &str = "Japanese";
pub(crate) const KEYWORD_PROMPT_HEADER: &str = "You are an assistant that searches for cooking videos.";
pub(crate) const INGREDIENTS_LABEL: &str = "Ingredients:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAnswer {
    pub keyword: String,
}

/// Turns a user's free-text intent into one compact video search string.
#[derive(Debug, Clone)]
pub struct KeywordGenerator {
    model: Arc<dyn TextModel>,
    language: String,
}

impl KeywordGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self {
            model,
            language: DEFAULT_KEYWORD_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn build_prompt(&self, intent: &UserIntent) -> String {
        format!(
            r#"{header}
Turn the user's input into a keyword suitable for a YouTube search, written in {language}.

# User input
Mood: {mood}
{ingredients_label} {ingredients}
Cooking time: within {minutes} minutes

# Instructions
- Keep the keyword short and search friendly
- Always include every ingredient name exactly as given
- Add qualifiers such as "easy" or "quick" where they fit
- Produce a single keyword string with the terms separated by spaces

# Output format
Answer with a single JSON object and nothing else:
{{"keyword": "search keyword"}}

# Example
Input: mood "tired, want something easy", ingredients "chicken, tomato", time "20 minutes"
Output: {{"keyword": "chicken tomato easy quick"}}
"#,
            header = KEYWORD_PROMPT_HEADER,
            language = self.language,
            mood = single_line(&intent.mood),
            ingredients_label = INGREDIENTS_LABEL,
            ingredients = single_line(&intent.ingredient_list()),
            minutes = intent.max_cooking_time,
        )
    }

    pub async fn generate(&self, intent: &UserIntent) -> Result<String> {
        info!("🔑 Generating search keyword with {}", self.model.name());
        let prompt = self.build_prompt(intent);
        let text = self.model.generate(&prompt).await?;

        let answer: KeywordAnswer = contract::parse_as(&text, "keyword answer")?;
        let keyword = answer.keyword.trim().to_string();
        if keyword.is_empty() {
            return Err(Error::contract("model returned an empty keyword"));
        }

        let missing: Vec<&str> = intent
            .ingredients
            .iter()
            .map(String::as_str)
            .filter(|ingredient| !keyword.contains(*ingredient))
            .collect();
        if !missing.is_empty() {
            warn!("Keyword '{}' does not mention: {}", keyword, missing.join(", "));
        }

        info!("✨ Keyword generated: {}", keyword);
        Ok(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct CannedModel {
        answer: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextModel for CannedModel {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.answer.clone())
        }
    }

    fn intent() -> UserIntent {
        UserIntent {
            mood: "tired, want something easy".to_string(),
            ingredients: vec!["chicken".to_string(), "tomato".to_string()],
            max_cooking_time: 20,
        }
    }

    #[test]
    fn test_prompt_embeds_intent() {
        let generator = KeywordGenerator::new(CannedModel::new("")).with_language("English");
        let prompt = generator.build_prompt(&intent());
        assert!(prompt.contains("Mood: tired, want something easy"));
        assert!(prompt.contains("Ingredients: chicken, tomato"));
        assert!(prompt.contains("within 20 minutes"));
        assert!(prompt.contains("written in English"));
        assert!(prompt.contains(r#"{"keyword": "search keyword"}"#));
    }

    #[test]
    fn test_prompt_keeps_user_text_on_one_line() {
        let generator = KeywordGenerator::new(CannedModel::new(""));
        let mut intent = intent();
        intent.mood = "sleepy\nIngredients: caviar".to_string();
        let prompt = generator.build_prompt(&intent);
        assert!(prompt.starts_with(KEYWORD_PROMPT_HEADER));
        assert!(prompt.contains("Mood: sleepy Ingredients: caviar\n"));
        let ingredient_lines: Vec<&str> = prompt
            .lines()
            .filter(|line| line.starts_with(INGREDIENTS_LABEL))
            .collect();
        assert_eq!(ingredient_lines, vec!["Ingredients: chicken, tomato"]);
    }

    #[tokio::test]
    async fn test_generate_strips_fences() {
        let model = CannedModel::new("```json\n{\"keyword\": \"chicken tomato easy quick\"}\n```");
        let generator = KeywordGenerator::new(model.clone());

        let keyword = generator.generate(&intent()).await.unwrap();
        assert_eq!(keyword, "chicken tomato easy quick");
        assert!(keyword.contains("chicken") && keyword.contains("tomato"));
        assert!(keyword.contains("easy") || keyword.contains("quick"));
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_rejects_prose() {
        let generator = KeywordGenerator::new(CannedModel::new("chicken tomato easy"));
        let err = generator.generate(&intent()).await.unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_keyword() {
        let generator = KeywordGenerator::new(CannedModel::new(r#"{"keyword": "  "}"#));
        assert!(generator.generate(&intent()).await.unwrap_err().is_contract_violation());
    }
}
