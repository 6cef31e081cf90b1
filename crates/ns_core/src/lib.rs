pub mod error;
pub mod models;
pub mod pacing;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use models::{ChatError, ChatModel};
pub use pacing::{NoopPacer, Pacer, RecordingPacer, TokioPacer};
pub use source::ArticleSource;
pub use types::{Analysis, Article, ArticleReport, PipelineResult, Sentiment, Validation};
