use ns_core::{ArticleReport, PipelineResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Fetch,
    Analyze,
    Validate,
    Done,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Fetch => "fetch",
            Step::Analyze => "analyze",
            Step::Validate => "validate",
            Step::Done => "done",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPayload {
    pub message: String,
    pub step: Step,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub articles: Vec<PipelineResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullResultPayload {
    pub articles: Vec<ArticleReport>,
}

/// One frame of a run's event stream.
///
/// Within a run the order is fixed: fetch logs, analyze logs, validate
/// logs, the done log, `Result`, `FullResult`, `Close`. An `Error` may
/// replace any suffix of that sequence and is always the last event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Log(LogPayload),
    Error(MessagePayload),
    Result(ResultPayload),
    FullResult(FullResultPayload),
    Close(MessagePayload),
}

impl PipelineEvent {
    pub fn log(step: Step, message: impl Into<String>) -> Self {
        PipelineEvent::Log(LogPayload {
            message: message.into(),
            step,
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        PipelineEvent::Error(MessagePayload { message: message.into() })
    }

    pub fn result(articles: Vec<PipelineResult>) -> Self {
        PipelineEvent::Result(ResultPayload { articles })
    }

    pub fn full_result(articles: Vec<ArticleReport>) -> Self {
        PipelineEvent::FullResult(FullResultPayload { articles })
    }

    pub fn close(message: impl Into<String>) -> Self {
        PipelineEvent::Close(MessagePayload { message: message.into() })
    }

    /// SSE `event:` name
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineEvent::Log(_) => "log",
            PipelineEvent::Error(_) => "error",
            PipelineEvent::Result(_) => "result",
            PipelineEvent::FullResult(_) => "full_result",
            PipelineEvent::Close(_) => "close",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineEvent::Error(_) | PipelineEvent::Close(_))
    }

    /// SSE `data:` payload
    pub fn data(&self) -> serde_json::Result<String> {
        match self {
            PipelineEvent::Log(p) => serde_json::to_string(p),
            PipelineEvent::Error(p) | PipelineEvent::Close(p) => serde_json::to_string(p),
            PipelineEvent::Result(p) => serde_json::to_string(p),
            PipelineEvent::FullResult(p) => serde_json::to_string(p),
        }
    }
}
