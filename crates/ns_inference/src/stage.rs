use ns_core::{ChatModel, Pacer, TokioPacer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::json;
use crate::retry::{AttemptFailure, RetryOutcome, RetryPolicy};

/// Shape check and conversion from the untyped reply to a typed record.
pub type Extractor<T> = fn(&Map<String, Value>) -> Result<T, String>;

/// One prompt → one JSON object, with retries.
///
/// Transport errors and unparseable replies are retried under the policy.
/// A reply that parses but misses a required key, or that the extractor
/// rejects, ends the request at once.
pub struct JsonStage {
    model: Arc<dyn ChatModel>,
    policy: RetryPolicy,
    pacer: Arc<dyn Pacer>,
}

impl fmt::Debug for JsonStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStage")
            .field("model", &self.model.name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl JsonStage {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            policy: RetryPolicy::default(),
            pacer: Arc::new(TokioPacer),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn request<T>(&self, prompt: &str, fields: &[&str], extract: Extractor<T>) -> RetryOutcome<T> {
        let model = self.model.as_ref();
        self.policy
            .run(self.pacer.as_ref(), move |attempt| async move {
                debug!("Calling {} (attempt {})", model.name(), attempt);
                let text = model.complete(prompt).await?;
                let document = json::parse_document(&text)
                    .map_err(|e| AttemptFailure::Transient(format!("Invalid JSON in response: {}", e)))?;
                let object = json::require_fields(&document, fields).map_err(AttemptFailure::Structural)?;
                extract(object).map_err(AttemptFailure::Structural)
            })
            .await
    }
}

pub(crate) fn string_field(object: &Map<String, Value>, key: &str) -> Result<String, String> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(format!("Field '{}' must be a string, got {}", key, other)),
        None => Err(format!("Missing required field '{}'", key)),
    }
}
