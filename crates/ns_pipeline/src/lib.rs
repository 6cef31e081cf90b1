//! Fetch → analyze → validate → report, streamed as ordered events.

pub mod events;
pub mod orchestrator;
pub mod report;

pub use events::{PipelineEvent, Step};
pub use orchestrator::{Pipeline, PipelineSettings, RunHandle, RunOutcome, RunRequest, RunState};

pub mod prelude {
    pub use super::{Pipeline, PipelineEvent, RunHandle, RunOutcome, RunRequest, Step};
    pub use ns_core::{ArticleReport, Error, PipelineResult, Result};
}
