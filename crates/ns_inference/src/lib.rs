//! LLM-backed stages of the news pipeline.
//!
//! [`Analyzer`] turns an article into a gist/sentiment/tone judgment and
//! [`Validator`] fact-checks that judgment against the article. Both sit on
//! top of a [`ChatModel`](ns_core::ChatModel) and share one [`RetryPolicy`];
//! neither ever returns an error to its caller.

pub mod analyzer;
pub mod json;
pub mod models;
pub mod retry;
pub mod stage;
pub mod validator;

pub use analyzer::Analyzer;
pub use models::create_model;
pub use retry::{AttemptFailure, RetryOutcome, RetryPolicy};
pub use stage::JsonStage;
pub use validator::Validator;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/";
pub const DEFAULT_ANALYSIS_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_VALIDATION_MODEL: &str = "openai/gpt-oss-20b";

#[derive(Clone)]
pub struct Config {
    /// Backend name: "groq" or "dummy"
    pub backend: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_name: String,
}

impl Config {
    pub fn new(backend: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model_name: model_name.into(),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::{Analyzer, Config, RetryPolicy, Validator};
    pub use ns_core::{Analysis, Article, ChatModel, Error, Result, Sentiment, Validation};
}
