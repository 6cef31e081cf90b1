use ns_core::{Analysis, Article, ChatModel, Pacer, Validation};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::analyzer::article_text;
use crate::retry::{RetryOutcome, RetryPolicy};
use crate::stage::{string_field, JsonStage};

pub const VALIDATION_FIELDS: [&str; 2] = ["is_valid", "notes"];

/// Second LLM stage: fact-check an [`Analysis`] against its article.
#[derive(Debug)]
pub struct Validator {
    stage: JsonStage,
}

impl Validator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { stage: JsonStage::new(model) }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.stage = self.stage.with_policy(policy);
        self
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.stage = self.stage.with_pacer(pacer);
        self
    }

    pub fn model_name(&self) -> &str {
        self.stage.model_name()
    }

    pub fn build_prompt(article: &Article, analysis: &Analysis) -> String {
        format!(
            r#"You are a fact-checker reviewing an AI's analysis of a news article.

Original Article:
{}

AI Analysis:
- Gist: {}
- Sentiment: {}
- Tone: {}

Answer these questions:
1. Does the gist accurately and factually summarize the article?
2. Is the sentiment classification (positive/negative/neutral) justified by the article's content?
3. Is the tone assessment accurate given the article's language and style?

Respond ONLY with a single JSON object in exactly this format:
{{
  "is_valid": true,
  "notes": "Explain your verdict. If invalid, point out the specific errors or mismatches."
}}

Do not include any text before or after the JSON."#,
            article_text(article),
            analysis.gist,
            analysis.sentiment,
            analysis.tone
        )
    }

    /// Never fails: any unrecovered problem yields [`Validation::fallback`].
    pub async fn validate(&self, article: &Article, analysis: &Analysis) -> Validation {
        let prompt = Self::build_prompt(article, analysis);
        match self.stage.request(&prompt, &VALIDATION_FIELDS, extract_validation).await {
            RetryOutcome::Success { value, attempts } => {
                debug!("Validated '{}' in {} attempt(s)", article.title, attempts);
                value
            }
            RetryOutcome::TransientFailure { cause, attempts } => {
                warn!("Error validating '{}' after {} attempts: {}", article.title, attempts, cause);
                Validation::fallback(cause)
            }
            RetryOutcome::StructuralFailure { cause, .. } => {
                warn!("Unusable validation for '{}': {}", article.title, cause);
                Validation::fallback(cause)
            }
        }
    }
}

fn extract_validation(object: &Map<String, Value>) -> Result<Validation, String> {
    let is_valid = match object.get("is_valid") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => true,
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => false,
        _ => return Err("Field 'is_valid' must be a boolean".to_string()),
    };
    Ok(Validation {
        is_valid,
        notes: string_field(object, "notes")?,
        error: None,
    })
}
