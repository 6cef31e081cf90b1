use async_trait::async_trait;
use ns_core::{ChatError, ChatModel};
use serde_json::json;
use std::fmt;

/// Offline model answering both stage prompts with canned JSON derived
/// from the prompt text.
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
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

fn line_value<'a>(prompt: &'a str, prefix: &str) -> Option<&'a str> {
    prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix(prefix))
        .map(str::trim)
}

#[async_trait]
impl ChatModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let reply = if prompt.contains("\"is_valid\"") {
            let gist = line_value(prompt, "- Gist:").unwrap_or_default();
            json!({
                "is_valid": !gist.is_empty(),
                "notes": "Offline check: the gist restates the article description.",
            })
        } else {
            // Take first 20 words of the description as the gist
            let description = line_value(prompt, "Description:").unwrap_or("No description.");
            let gist: Vec<&str> = description.split_whitespace().take(20).collect();
            json!({
                "gist": gist.join(" "),
                "sentiment": "neutral",
                "tone": "balanced",
            })
        };
        Ok(format!("```json\n{}\n```", reply))
    }
}
