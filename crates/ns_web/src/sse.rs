use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use ns_pipeline::orchestrator::{DEFAULT_COUNT, DEFAULT_TOPIC};
use ns_pipeline::{PipelineEvent, RunHandle, RunRequest};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::AppState;

/// Undelivered events a run may queue before it waits for the client.
const EVENT_BUFFER: usize = 16;
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub topic: Option<String>,
    pub count: Option<usize>,
}

impl AnalyzeParams {
    fn into_request(self) -> RunRequest {
        RunRequest::new(
            self.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            self.count.unwrap_or(DEFAULT_COUNT),
        )
    }
}

/// GET /api/analyze - one pipeline run streamed as SSE frames
///
/// The run is cancelled as soon as the response stream is dropped, which
/// is how axum reports a client hang-up.
pub async fn analyze_stream(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let request = params.into_request();
    info!("📡 New analysis stream: topic='{}' count={}", request.topic, request.count);

    let RunHandle { mut events, cancel, .. } = state.pipeline.spawn(request, EVENT_BUFFER);
    let expose_full_result = state.expose_full_result;

    let stream = async_stream::stream! {
        let _cancel_on_drop = cancel.drop_guard();

        while let Some(event) = events.recv().await {
            if matches!(event, PipelineEvent::FullResult(_)) && !expose_full_result {
                continue;
            }
            let kind = event.kind();
            match event.data() {
                Ok(data) => {
                    debug!("SSE: sending {} event", kind);
                    yield Ok(Event::default().event(kind).data(data));
                }
                Err(e) => {
                    warn!("SSE: failed to serialize {} event: {}", kind, e);
                    yield Ok(serialization_failure(&e));
                    break;
                }
            }
            if event.is_terminal() {
                break;
            }
        }
        debug!("SSE: analysis stream finished");
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL).text("heartbeat"))
}

fn serialization_failure(e: &serde_json::Error) -> Event {
    let payload = serde_json::json!({ "message": format!("Internal Server Error: {}", e) });
    Event::default().event("error").data(payload.to_string())
}
