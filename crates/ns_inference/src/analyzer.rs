use ns_core::{Analysis, Article, ChatModel, Pacer, Sentiment};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::retry::{RetryOutcome, RetryPolicy};
use crate::stage::{string_field, JsonStage};

pub const ANALYSIS_FIELDS: [&str; 3] = ["gist", "sentiment", "tone"];

/// First LLM stage: gist, sentiment and tone for one article.
#[derive(Debug)]
pub struct Analyzer {
    stage: JsonStage,
}

impl Analyzer {
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

    pub fn build_prompt(article: &Article) -> String {
        format!(
            r#"Analyze the following news article and provide:
1. Gist: a 1-2 sentence summary of the news
2. Sentiment: exactly one of positive, negative or neutral
3. Tone: one or more of urgent, analytical, satirical, balanced, critical, optimistic, alarmist

Article:
{}

Respond ONLY with a single JSON object in exactly this format:
{{
  "gist": "your 1-2 sentence summary here",
  "sentiment": "positive/negative/neutral",
  "tone": "analytical"
}}

Do not include any text before or after the JSON."#,
            article_text(article)
        )
    }

    /// Never fails: any unrecovered problem yields [`Analysis::fallback`].
    pub async fn analyze(&self, article: &Article) -> Analysis {
        let prompt = Self::build_prompt(article);
        match self.stage.request(&prompt, &ANALYSIS_FIELDS, extract_analysis).await {
            RetryOutcome::Success { value, attempts } => {
                debug!("Analyzed '{}' in {} attempt(s)", article.title, attempts);
                value
            }
            RetryOutcome::TransientFailure { cause, attempts } => {
                warn!("Error analyzing '{}' after {} attempts: {}", article.title, attempts, cause);
                Analysis::fallback(cause)
            }
            RetryOutcome::StructuralFailure { cause, .. } => {
                warn!("Unusable analysis for '{}': {}", article.title, cause);
                Analysis::fallback(cause)
            }
        }
    }
}

pub(crate) fn article_text(article: &Article) -> String {
    format!(
        "Title: {}\nDescription: {}\nContent: {}",
        article.title, article.description, article.content
    )
}

fn extract_analysis(object: &Map<String, Value>) -> Result<Analysis, String> {
    let gist = string_field(object, "gist")?;
    let sentiment = string_field(object, "sentiment")?.parse::<Sentiment>()?;
    let tone = match object.get("tone") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::trim).ok_or_else(|| "Field 'tone' must contain strings".to_string()))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "),
        _ => return Err("Field 'tone' must be a string or a list of strings".to_string()),
    };
    Ok(Analysis {
        gist,
        sentiment,
        tone,
        error: None,
    })
}
