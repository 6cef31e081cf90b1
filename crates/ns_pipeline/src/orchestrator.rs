use futures::FutureExt;
use ns_core::{ArticleReport, ArticleSource, Error, NoopPacer, Pacer, PipelineResult, TokioPacer};
use ns_inference::{Analyzer, Validator};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::events::{PipelineEvent, Step};

pub const DEFAULT_TOPIC: &str = "Indian Politics";
pub const DEFAULT_COUNT: usize = 12;
/// Largest batch the article provider will return in one page
pub const MAX_COUNT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub topic: String,
    pub count: usize,
}

impl RunRequest {
    /// `count` is clamped to `1..=MAX_COUNT`; a blank topic becomes the default.
    pub fn new(topic: impl Into<String>, count: usize) -> Self {
        let topic = topic.into();
        let topic = if topic.trim().is_empty() {
            DEFAULT_TOPIC.to_string()
        } else {
            topic.trim().to_string()
        };
        Self {
            topic,
            count: count.clamp(1, MAX_COUNT),
        }
    }
}

impl Default for RunRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC, DEFAULT_COUNT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Fetching,
    Fetched,
    FetchEmpty,
    Analyzing,
    Analyzed,
    Validating,
    Validated,
    Done,
    Error,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { articles: usize },
    SourceEmpty,
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Pause after the start banner and after the fetch
    pub stage_delay: Duration,
    /// Pause after each article's analysis and each article's validation
    pub article_delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            stage_delay: Duration::from_millis(500),
            article_delay: Duration::from_secs(1),
        }
    }
}

/// The fixed three-stage pipeline. One instance serves any number of
/// runs; runs share nothing but the collaborators.
pub struct Pipeline {
    source: Arc<dyn ArticleSource>,
    analyzer: Analyzer,
    validator: Validator,
    pacer: Arc<dyn Pacer>,
    settings: PipelineSettings,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("source", &self.source.name())
            .field("analyzer", &self.analyzer.model_name())
            .field("validator", &self.validator.model_name())
            .field("settings", &self.settings)
            .finish()
    }
}

/// A run executing on its own task.
///
/// Dropping `events` (or cancelling `cancel`) stops the run at its next
/// checkpoint.
pub struct RunHandle {
    pub events: mpsc::Receiver<PipelineEvent>,
    pub cancel: CancellationToken,
    pub task: JoinHandle<RunOutcome>,
}

enum Halt {
    Cancelled,
    Failed(Error),
}

impl Pipeline {
    pub fn new(source: Arc<dyn ArticleSource>, analyzer: Analyzer, validator: Validator) -> Self {
        Self {
            source,
            analyzer,
            validator,
            pacer: Arc::new(TokioPacer),
            settings: PipelineSettings::default(),
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Zero pacing everywhere in the run loop.
    pub fn without_pacing(self) -> Self {
        self.with_pacer(Arc::new(NoopPacer))
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Start a run on a new task, buffering at most `buffer` undelivered events.
    pub fn spawn(self: &Arc<Self>, request: RunRequest, buffer: usize) -> RunHandle {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let cancel = CancellationToken::new();
        let pipeline = Arc::clone(self);
        let token = cancel.clone();
        let task = tokio::spawn(async move { pipeline.run(request, tx, token).await });
        RunHandle {
            events: rx,
            cancel,
            task,
        }
    }

    /// Drive one run to completion, sending its events to `events`.
    pub async fn run(
        &self,
        request: RunRequest,
        events: mpsc::Sender<PipelineEvent>,
        cancel: CancellationToken,
    ) -> RunOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id, topic = %request.topic, count = request.count);
        async move {
            let mut run = Run {
                pipeline: self,
                events: &events,
                cancel: &cancel,
                state: RunState::Init,
            };
            match run.drive(&request).await {
                Ok(outcome) => {
                    info!("🏁 Run finished: {:?}", outcome);
                    outcome
                }
                Err(Halt::Cancelled) => {
                    run.transition(RunState::Cancelled);
                    info!("Client disconnected, run stopped");
                    RunOutcome::Cancelled
                }
                Err(Halt::Failed(e)) => {
                    run.transition(RunState::Error);
                    error!("Error in pipeline run: {}", e);
                    let _ = events
                        .send(PipelineEvent::error(format!("Internal Server Error: {}", e)))
                        .await;
                    RunOutcome::Failed(e.to_string())
                }
            }
        }
        .instrument(span)
        .await
    }
}

struct Run<'a> {
    pipeline: &'a Pipeline,
    events: &'a mpsc::Sender<PipelineEvent>,
    cancel: &'a CancellationToken,
    state: RunState,
}

impl<'a> Run<'a> {
    fn transition(&mut self, next: RunState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn checkpoint(&self) -> Result<(), Halt> {
        if self.cancel.is_cancelled() || self.events.is_closed() {
            Err(Halt::Cancelled)
        } else {
            Ok(())
        }
    }

    async fn emit(&self, event: PipelineEvent) -> Result<(), Halt> {
        self.events.send(event).await.map_err(|_| Halt::Cancelled)
    }

    async fn pause(&self, duration: Duration) {
        tokio::select! {
            _ = self.pipeline.pacer.pause(duration) => {}
            _ = self.cancel.cancelled() => {}
        }
    }

    /// Await a collaborator, turning a panic into a run-level failure.
    async fn guarded<T>(&self, what: &str, work: impl Future<Output = T>) -> Result<T, Halt> {
        AssertUnwindSafe(work)
            .catch_unwind()
            .await
            .map_err(|panic| Halt::Failed(Error::Pipeline(format!("{} panicked: {}", what, panic_message(&*panic)))))
    }

    async fn drive(&mut self, request: &RunRequest) -> Result<RunOutcome, Halt> {
        let pipeline = self.pipeline;
        let settings = pipeline.settings;

        self.checkpoint()?;
        self.transition(RunState::Fetching);
        self.emit(PipelineEvent::log(
            Step::Fetch,
            format!("Initializing pipeline for '{}' ({} articles)...", request.topic, request.count),
        ))
        .await?;
        self.pause(settings.stage_delay).await;

        self.emit(PipelineEvent::log(Step::Fetch, format!("Connecting to {}...", pipeline.source.name())))
            .await?;
        let articles = self
            .guarded("article source", pipeline.source.fetch(&request.topic, request.count))
            .await?;

        if articles.is_empty() {
            self.transition(RunState::FetchEmpty);
            self.emit(PipelineEvent::error("No articles found or API error.")).await?;
            return Ok(RunOutcome::SourceEmpty);
        }
        let total = articles.len();
        self.transition(RunState::Fetched);
        self.emit(PipelineEvent::log(
            Step::Fetch,
            format!("Retrieved {} articles successfully", total),
        ))
        .await?;
        self.pause(settings.stage_delay).await;

        self.transition(RunState::Analyzing);
        self.emit(PipelineEvent::log(Step::Analyze, "Starting LLM Analysis (Stage 1)...")).await?;
        let mut analyses = Vec::with_capacity(total);
        for (index, article) in articles.iter().enumerate() {
            self.checkpoint()?;
            self.emit(PipelineEvent::log(
                Step::Analyze,
                format!("Analyzed article {}/{}: Sentiment analysis complete", index + 1, total),
            ))
            .await?;
            let analysis = self.guarded("analysis stage", pipeline.analyzer.analyze(article)).await?;
            analyses.push(analysis);
            self.pause(settings.article_delay).await;
        }
        self.transition(RunState::Analyzed);
        self.emit(PipelineEvent::log(
            Step::Analyze,
            "Analysis stage 1 complete - moving to validation",
        ))
        .await?;

        self.transition(RunState::Validating);
        self.emit(PipelineEvent::log(Step::Validate, "Starting LLM Validation (Stage 2)...")).await?;
        let mut reports = Vec::with_capacity(total);
        for (index, (article, analysis)) in articles.into_iter().zip(analyses).enumerate() {
            self.checkpoint()?;
            self.emit(PipelineEvent::log(
                Step::Validate,
                format!("Validating article {}/{}...", index + 1, total),
            ))
            .await?;
            let validation = self
                .guarded("validation stage", pipeline.validator.validate(&article, &analysis))
                .await?;
            reports.push(ArticleReport {
                article,
                analysis,
                validation,
            });
            self.pause(settings.article_delay).await;
        }
        self.transition(RunState::Validated);
        self.emit(PipelineEvent::log(Step::Validate, "All articles validated successfully")).await?;

        self.checkpoint()?;
        self.transition(RunState::Done);
        self.emit(PipelineEvent::log(Step::Done, "Pipeline complete - results ready")).await?;
        let results: Vec<PipelineResult> = reports
            .iter()
            .enumerate()
            .map(|(index, report)| PipelineResult::from_report(index + 1, report))
            .collect();
        self.emit(PipelineEvent::result(results)).await?;
        self.emit(PipelineEvent::full_result(reports)).await?;
        self.emit(PipelineEvent::close("Stream closed")).await?;

        Ok(RunOutcome::Completed { articles: total })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ns_core::{Article, ChatError, ChatModel};
    use ns_inference::models::ScriptedModel;
    use ns_sources::StaticSource;

    const ANALYSIS: &str = r#"{"gist": "A summary.", "sentiment": "Negative", "tone": "critical"}"#;
    const VALID: &str = r#"{"is_valid": true, "notes": "Accurate."}"#;

    fn articles(n: usize) -> Vec<Article> {
        (1..=n)
            .map(|i| Article {
                title: format!("Article {}", i),
                description: format!("Description {}", i),
                content: format!("Content {}", i),
                url: format!("https://example.com/{}", i),
                published_at: "2024-01-15T10:00:00Z".to_string(),
                source: "Test News".to_string(),
            })
            .collect()
    }

    fn ok(s: &str) -> Result<String, ChatError> {
        Ok(s.to_string())
    }

    fn pipeline(
        source: Vec<Article>,
        analysis: Arc<dyn ChatModel>,
        validation: Arc<dyn ChatModel>,
    ) -> Pipeline {
        let pacer: Arc<dyn Pacer> = Arc::new(NoopPacer);
        Pipeline::new(
            Arc::new(StaticSource::new(source)),
            Analyzer::new(analysis).with_pacer(pacer.clone()),
            Validator::new(validation).with_pacer(pacer.clone()),
        )
        .with_pacer(pacer)
    }

    async fn run_to_end(pipeline: &Pipeline, cancel: CancellationToken) -> (RunOutcome, Vec<PipelineEvent>) {
        let (tx, mut rx) = mpsc::channel(8);
        let drain = async move {
            let mut events = Vec::new();
            while let Some(event) = rx.recv().await {
                events.push(event);
            }
            events
        };
        tokio::join!(pipeline.run(RunRequest::new("Indian Politics", 12), tx, cancel), drain)
    }

    fn log_messages(events: &[PipelineEvent], step: Step) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::Log(p) if p.step == step => Some(p.message.clone()),
                _ => None,
            })
            .collect()
    }

    fn step_rank(event: &PipelineEvent) -> u8 {
        match event {
            PipelineEvent::Log(p) => match p.step {
                Step::Fetch => 0,
                Step::Analyze => 1,
                Step::Validate => 2,
                Step::Done => 3,
            },
            PipelineEvent::Result(_) => 4,
            PipelineEvent::FullResult(_) => 5,
            PipelineEvent::Close(_) => 6,
            PipelineEvent::Error(_) => 7,
        }
    }

    /// Cancels the token the first time it is asked to complete a prompt.
    #[derive(Debug)]
    struct CancellingModel {
        token: CancellationToken,
    }

    #[async_trait]
    impl ChatModel for CancellingModel {
        fn name(&self) -> &str {
            "Cancelling"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, ChatError> {
            self.token.cancel();
            Ok(ANALYSIS.to_string())
        }
    }

    #[derive(Debug)]
    struct PanickingModel;

    #[async_trait]
    impl ChatModel for PanickingModel {
        fn name(&self) -> &str {
            "Panicking"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, ChatError> {
            panic!("provider client bug")
        }
    }

    #[tokio::test]
    async fn test_events_follow_stage_order() {
        let n = 4;
        let analysis = Arc::new(ScriptedModel::new(vec![ok(ANALYSIS); n]));
        let validation = Arc::new(ScriptedModel::new(vec![ok(VALID); n]));
        let (outcome, events) = run_to_end(&pipeline(articles(n), analysis, validation), CancellationToken::new()).await;

        assert_eq!(outcome, RunOutcome::Completed { articles: n });
        let ranks: Vec<u8> = events.iter().map(step_rank).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "out of order: {:?}", ranks);

        let analyzing: Vec<String> = log_messages(&events, Step::Analyze)
            .into_iter()
            .filter(|m| m.starts_with("Analyzed article"))
            .collect();
        let expected: Vec<String> = (1..=n)
            .map(|i| format!("Analyzed article {}/{}: Sentiment analysis complete", i, n))
            .collect();
        assert_eq!(analyzing, expected);

        let validating: Vec<String> = log_messages(&events, Step::Validate)
            .into_iter()
            .filter(|m| m.starts_with("Validating article"))
            .collect();
        assert_eq!(validating.len(), n);
        assert_eq!(validating[0], format!("Validating article 1/{}...", n));
        assert_eq!(
            log_messages(&events, Step::Validate).last().map(String::as_str),
            Some("All articles validated successfully")
        );

        assert_eq!(events.iter().filter(|e| e.kind() == "result").count(), 1);
        assert_eq!(events.iter().filter(|e| e.kind() == "close").count(), 1);
        assert_eq!(events.last().map(PipelineEvent::kind), Some("close"));
        assert!(!events.iter().any(|e| e.kind() == "error"));
    }

    #[tokio::test]
    async fn test_result_has_one_row_per_article_in_fetch_order() {
        let n = 5;
        let analysis = Arc::new(ScriptedModel::new(vec![ok(ANALYSIS); n]));
        let validation = Arc::new(ScriptedModel::new(vec![ok(VALID); n]));
        let (_, events) = run_to_end(&pipeline(articles(n), analysis, validation), CancellationToken::new()).await;

        let rows = events
            .iter()
            .find_map(|e| match e {
                PipelineEvent::Result(p) => Some(p.articles.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows.len(), n);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.id, i + 1);
            assert_eq!(row.title, format!("Article {}", i + 1));
            assert_eq!(row.sentiment, "negative");
            assert_eq!(row.summary, "A summary.");
            assert!(row.validation_passed);
        }

        let full = events
            .iter()
            .find_map(|e| match e {
                PipelineEvent::FullResult(p) => Some(p.articles.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(full.len(), n);
        assert_eq!(full[2].article.url, "https://example.com/3");
    }

    #[tokio::test]
    async fn test_empty_source_emits_single_error() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let (outcome, events) = run_to_end(&pipeline(vec![], model.clone(), model.clone()), CancellationToken::new()).await;

        assert_eq!(outcome, RunOutcome::SourceEmpty);
        let errors: Vec<&PipelineEvent> = events.iter().filter(|e| e.kind() == "error").collect();
        assert_eq!(errors, vec![&PipelineEvent::error("No articles found or API error.")]);
        assert_eq!(events.last(), errors.last().copied());
        assert!(!events.iter().any(|e| matches!(e.kind(), "result" | "full_result" | "close")));
        assert!(log_messages(&events, Step::Analyze).is_empty());
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_partial_failures_never_abort_the_batch() {
        // article 2 validation recovers after two transient failures,
        // article 3 validation exhausts its retries
        let analysis = Arc::new(ScriptedModel::new(vec![ok(ANALYSIS); 3]));
        let validation = Arc::new(ScriptedModel::new(vec![
            ok(VALID),
            Err(ChatError::Transport("reset".into())),
            ok("not json at all"),
            ok(VALID),
            Err(ChatError::RateLimited),
            Err(ChatError::Transport("reset".into())),
            Err(ChatError::Status { status: 502, body: "bad gateway".into() }),
        ]));
        let (outcome, events) = run_to_end(&pipeline(articles(3), analysis, validation.clone()), CancellationToken::new()).await;

        assert_eq!(outcome, RunOutcome::Completed { articles: 3 });
        assert_eq!(validation.calls(), 7);
        let rows = events
            .iter()
            .find_map(|e| match e {
                PipelineEvent::Result(p) => Some(p.articles.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].validation_passed);
        assert!(rows[1].validation_passed);
        assert_eq!(rows[1].validation_note, "Accurate.");
        assert!(!rows[2].validation_passed);
        assert!(rows[2].validation_note.starts_with("Validation failed due to error:"));
        assert!(rows[2].validation_note.contains("502"));
    }

    #[tokio::test]
    async fn test_analysis_fallback_flows_into_result() {
        let analysis = Arc::new(ScriptedModel::new(vec![ok(r#"{"gist": "only gist"}"#), ok(ANALYSIS)]));
        let validation = Arc::new(ScriptedModel::new(vec![ok(VALID); 2]));
        let (_, events) = run_to_end(&pipeline(articles(2), analysis, validation), CancellationToken::new()).await;
        let rows = events
            .iter()
            .find_map(|e| match e {
                PipelineEvent::Result(p) => Some(p.articles.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows[0].summary, "Unable to analyze article");
        assert_eq!(rows[0].sentiment, "neutral");
        assert_eq!(rows[1].summary, "A summary.");
    }

    #[tokio::test]
    async fn test_cancellation_before_second_article_stops_run() {
        let cancel = CancellationToken::new();
        let analysis = Arc::new(CancellingModel { token: cancel.clone() });
        let validation = Arc::new(ScriptedModel::new(vec![ok(VALID); 3]));
        let (outcome, events) = run_to_end(&pipeline(articles(3), analysis, validation.clone()), cancel).await;

        assert_eq!(outcome, RunOutcome::Cancelled);
        let analyzing: Vec<String> = log_messages(&events, Step::Analyze)
            .into_iter()
            .filter(|m| m.starts_with("Analyzed article"))
            .collect();
        assert_eq!(analyzing.len(), 1);
        assert!(analyzing[0].starts_with("Analyzed article 1/3"));
        assert!(log_messages(&events, Step::Validate).is_empty());
        assert!(!events.iter().any(|e| matches!(e.kind(), "result" | "close" | "error")));
        assert_eq!(validation.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancellation_during_validation_stops_before_next_article() {
        let cancel = CancellationToken::new();
        let analysis = Arc::new(ScriptedModel::new(vec![ok(ANALYSIS); 3]));
        let validation = Arc::new(CancellingModel { token: cancel.clone() });
        let (outcome, events) = run_to_end(&pipeline(articles(3), analysis.clone(), validation), cancel).await;

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(analysis.calls(), 3);
        let validating: Vec<String> = log_messages(&events, Step::Validate)
            .into_iter()
            .filter(|m| m.starts_with("Validating article"))
            .collect();
        assert_eq!(validating, vec!["Validating article 1/3...".to_string()]);
        assert!(!log_messages(&events, Step::Validate).contains(&"All articles validated successfully".to_string()));
        assert!(log_messages(&events, Step::Done).is_empty());
        assert!(!events
            .iter()
            .any(|e| matches!(e.kind(), "result" | "full_result" | "close" | "error")));
    }

    #[tokio::test]
    async fn test_cancelled_before_start_emits_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let model = Arc::new(ScriptedModel::new(vec![]));
        let (outcome, events) = run_to_end(&pipeline(articles(2), model.clone(), model), cancel).await;
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_consumer_disconnect_stops_run() {
        let analysis = Arc::new(ScriptedModel::new(vec![ok(ANALYSIS); 3]));
        let validation = Arc::new(ScriptedModel::new(vec![ok(VALID); 3]));
        let pipeline = Arc::new(pipeline(articles(3), analysis.clone(), validation.clone()));
        let mut handle = pipeline.spawn(RunRequest::new("Indian Politics", 3), 1);

        // read until the first article is announced, then hang up
        while let Some(event) = handle.events.recv().await {
            if matches!(&event, PipelineEvent::Log(p) if p.message.starts_with("Analyzed article 1/")) {
                break;
            }
        }
        drop(handle.events);

        assert_eq!(handle.task.await.unwrap(), RunOutcome::Cancelled);
        assert!(analysis.calls() < 3);
        assert_eq!(validation.calls(), 0);
    }

    #[tokio::test]
    async fn test_collaborator_panic_becomes_terminal_error() {
        let validation = Arc::new(ScriptedModel::new(vec![]));
        let (outcome, events) =
            run_to_end(&pipeline(articles(2), Arc::new(PanickingModel), validation), CancellationToken::new()).await;

        assert!(matches!(outcome, RunOutcome::Failed(ref m) if m.contains("provider client bug")));
        let last = events.last().unwrap();
        assert_eq!(last.kind(), "error");
        assert_eq!(events.iter().filter(|e| e.kind() == "error").count(), 1);
        assert!(!events.iter().any(|e| matches!(e.kind(), "result" | "close")));
    }

    #[tokio::test]
    async fn test_pacing_between_articles() {
        let pacer = Arc::new(ns_core::RecordingPacer::new());
        let analysis = Arc::new(ScriptedModel::new(vec![ok(ANALYSIS); 2]));
        let validation = Arc::new(ScriptedModel::new(vec![ok(VALID); 2]));
        let pipeline = Pipeline::new(
            Arc::new(StaticSource::new(articles(2))),
            Analyzer::new(analysis).with_pacer(Arc::new(NoopPacer)),
            Validator::new(validation).with_pacer(Arc::new(NoopPacer)),
        )
        .with_pacer(pacer.clone());
        let (outcome, _) = run_to_end(&pipeline, CancellationToken::new()).await;
        assert_eq!(outcome, RunOutcome::Completed { articles: 2 });

        let settings = PipelineSettings::default();
        let mut expected = vec![settings.stage_delay; 2];
        expected.extend(vec![settings.article_delay; 4]);
        assert_eq!(pacer.pauses(), expected);
    }

    #[test]
    fn test_run_request_clamps_count_and_defaults_topic() {
        assert_eq!(RunRequest::new("Technology", 0).count, 1);
        assert_eq!(RunRequest::new("Technology", 5000).count, MAX_COUNT);
        assert_eq!(RunRequest::new("   ", 3).topic, DEFAULT_TOPIC);
        assert_eq!(RunRequest::default(), RunRequest::new("Indian Politics", 12));
    }
}
