use anyhow::{bail, Context};
use clap::Parser;
use ns_inference::{DEFAULT_ANALYSIS_MODEL, DEFAULT_BASE_URL, DEFAULT_VALIDATION_MODEL};
use ns_pipeline::orchestrator::{DEFAULT_COUNT, DEFAULT_TOPIC};
use ns_pipeline::report::write_outputs;
use ns_pipeline::{Pipeline, PipelineEvent, RunOutcome, RunRequest};
use ns_web::{create_app, serve, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

mod config;
mod logging;

use config::{PipelineConfig, SourceKind};

#[derive(Parser, Debug)]
#[command(name = "ns", author, version, about = "Two-stage LLM news sentiment pipeline", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = SourceKind::Newsapi)]
    source: SourceKind,
    #[arg(long, default_value = "groq", help = "Model backend to use. Available backends: groq (default), dummy")]
    model: String,
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    newsapi_key: Option<String>,
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    groq_api_key: Option<String>,
    #[arg(long, env = "LLM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "ANALYSIS_MODEL", default_value = DEFAULT_ANALYSIS_MODEL)]
    analysis_model: String,
    #[arg(long, env = "VALIDATION_MODEL", default_value = DEFAULT_VALIDATION_MODEL)]
    validation_model: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the streaming HTTP API
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
        #[arg(
            long,
            env = "CORS_ORIGINS",
            value_delimiter = ',',
            default_value = "http://localhost:3000,http://127.0.0.1:3000"
        )]
        cors_origins: Vec<String>,
        /// Forward `full_result` events to clients
        #[arg(long, env = "EXPOSE_FULL_RESULT")]
        expose_full_result: bool,
    },
    /// Run one batch and write the JSON and Markdown reports
    Run {
        #[arg(long, default_value = DEFAULT_TOPIC)]
        topic: String,
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
    /// List the models the provider offers
    Models {
        /// Also write the list as JSON to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            source: self.source,
            newsapi_key: self.newsapi_key.clone(),
            backend: self.model.clone(),
            llm_api_key: self.groq_api_key.clone(),
            base_url: self.base_url.clone(),
            analysis_model: self.analysis_model.clone(),
            validation_model: self.validation_model.clone(),
        }
    }
}

async fn run_batch(pipeline: Arc<Pipeline>, request: RunRequest, output: PathBuf) -> anyhow::Result<()> {
    let source_name = pipeline.source_name().to_string();
    info!("🗞️ Running pipeline for '{}' ({} articles)", request.topic, request.count);
    let mut handle = pipeline.spawn(request, 16);

    let cancel = handle.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping run");
            cancel.cancel();
        }
    });

    let mut reports = None;
    while let Some(event) = handle.events.recv().await {
        match event {
            PipelineEvent::Log(p) => info!("[{}] {}", p.step, p.message),
            PipelineEvent::Error(p) => error!("✗ {}", p.message),
            PipelineEvent::Result(p) => {
                info!("📊 {} articles analyzed", p.articles.len());
                for row in &p.articles {
                    let mark = if row.validation_passed { "✓" } else { "✗" };
                    info!("  {}. [{}] {} {}", row.id, row.sentiment, mark, row.title);
                }
            }
            PipelineEvent::FullResult(p) => reports = Some(p.articles),
            PipelineEvent::Close(p) => debug!("{}", p.message),
        }
    }

    match handle.task.await.context("pipeline task failed")? {
        RunOutcome::Completed { .. } => {
            let reports = reports.context("run completed without a full result")?;
            let written = write_outputs(&output, &reports, &source_name)
                .await
                .with_context(|| format!("failed to write reports to {}", output.display()))?;
            info!("✨ Pipeline completed, {} files written to {}", written.len(), output.display());
            Ok(())
        }
        RunOutcome::SourceEmpty => bail!("No articles fetched"),
        RunOutcome::Cancelled => {
            warn!("Run cancelled, no reports written");
            Ok(())
        }
        RunOutcome::Failed(e) => bail!("Pipeline failed: {}", e),
    }
}

async fn list_models(config: &PipelineConfig, save: Option<PathBuf>) -> anyhow::Result<()> {
    let client = config.listing_client()?;
    let models = client.list_models().await.context("failed to list models")?;
    info!("🧠 {} models available", models.len());
    for model in &models {
        println!("{}", model);
    }
    if let Some(path) = save {
        let json = serde_json::to_string_pretty(&models)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("✓ Saved model list to {}", path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a missing .env is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();
    logging::init_logging();
    let cli = Cli::parse();
    let config = cli.pipeline_config();
    debug!("{:?}", config);

    match cli.command {
        Commands::Serve {
            bind,
            cors_origins,
            expose_full_result,
        } => {
            let pipeline = Arc::new(config.build_pipeline()?);
            let state = AppState::new(pipeline).with_full_result(expose_full_result);
            info!("🌐 Allowed origins: {}", cors_origins.join(", "));
            serve(bind, create_app(state, &cors_origins)).await?;
        }
        Commands::Run { topic, count, output } => {
            let pipeline = Arc::new(config.build_pipeline()?);
            run_batch(pipeline, RunRequest::new(topic, count), output).await?;
        }
        Commands::Models { save } => list_models(&config, save).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["ns", "--source", "fixture", "--model", "dummy", "run"]).unwrap();
        assert_eq!(cli.source, SourceKind::Fixture);
        match cli.command {
            Commands::Run { topic, count, output } => {
                assert_eq!(topic, "Indian Politics");
                assert_eq!(count, 12);
                assert_eq!(output, PathBuf::from("output"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_origins_split_on_commas() {
        let cli = Cli::try_parse_from([
            "ns",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--cors-origins",
            "http://a.example,http://b.example",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve { bind, cors_origins, .. } => {
                assert_eq!(bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
                assert_eq!(cors_origins, vec!["http://a.example", "http://b.example"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_offline_batch_writes_reports() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output");
        let config = PipelineConfig {
            source: SourceKind::Fixture,
            newsapi_key: None,
            backend: "dummy".to_string(),
            llm_api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            validation_model: DEFAULT_VALIDATION_MODEL.to_string(),
        };
        let pipeline = Arc::new(config.build_pipeline().unwrap().without_pacing());
        run_batch(pipeline, RunRequest::new("Technology", 2), output.clone()).await.unwrap();

        let report = std::fs::read_to_string(output.join("final_report.md")).unwrap();
        assert!(report.contains("**Articles Analyzed:** 2"));
        assert!(report.contains("**Source:** Static fixture"));
    }
}
