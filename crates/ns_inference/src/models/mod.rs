use ns_core::{ChatModel, Error, Result};
use std::sync::Arc;

use crate::Config;

pub mod dummy;
pub mod groq;
pub mod scripted;

pub use dummy::DummyModel;
pub use groq::GroqModel;
pub use scripted::ScriptedModel;

pub const AVAILABLE_BACKENDS: &[&str] = &["groq", "dummy"];

pub fn create_model(config: &Config) -> Result<Arc<dyn ChatModel>> {
    match config.backend.as_str() {
        "groq" => Ok(Arc::new(GroqModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model backend '{}'. Available backends: {}",
            other,
            AVAILABLE_BACKENDS.join(", ")
        ))),
    }
}
