use ns_pipeline::Pipeline;
use std::sync::Arc;

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Forward `full_result` frames to clients
    pub expose_full_result: bool,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            expose_full_result: false,
        }
    }

    pub fn with_full_result(mut self, expose: bool) -> Self {
        self.expose_full_result = expose;
        self
    }
}
