use clap::ValueEnum;
use ns_core::{ArticleSource, Result};
use ns_inference::models::{create_model, GroqModel};
use ns_inference::{Analyzer, Config as ModelConfig, Validator};
use ns_pipeline::Pipeline;
use ns_sources::{NewsApiConfig, NewsApiSource, StaticSource};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// NewsAPI `/v2/everything`
    Newsapi,
    /// Built-in sample articles, no network
    Fixture,
}

/// Everything needed to assemble the pipeline's collaborators.
#[derive(Clone)]
pub struct PipelineConfig {
    pub source: SourceKind,
    pub newsapi_key: Option<String>,
    pub backend: String,
    pub llm_api_key: Option<String>,
    pub base_url: String,
    pub analysis_model: String,
    pub validation_model: String,
}

impl PipelineConfig {
    pub fn model_config(&self, model_name: &str) -> ModelConfig {
        ModelConfig::new(self.backend.as_str(), model_name)
            .with_api_key(self.llm_api_key.clone())
            .with_base_url(self.base_url.as_str())
    }

    pub fn build_source(&self) -> Result<Arc<dyn ArticleSource>> {
        match self.source {
            SourceKind::Newsapi => {
                let key = self.newsapi_key.clone().unwrap_or_default();
                Ok(Arc::new(NewsApiSource::new(NewsApiConfig::new(key))?))
            }
            SourceKind::Fixture => Ok(Arc::new(StaticSource::sample())),
        }
    }

    pub fn build_pipeline(&self) -> Result<Pipeline> {
        let source = self.build_source()?;
        info!("📰 Article source initialized ({})", source.name());

        let analysis = create_model(&self.model_config(&self.analysis_model))?;
        let validation = create_model(&self.model_config(&self.validation_model))?;
        info!(
            "🧠 Models initialized: analysis={} ({}), validation={} ({})",
            self.analysis_model,
            analysis.name(),
            self.validation_model,
            validation.name()
        );

        Ok(Pipeline::new(source, Analyzer::new(analysis), Validator::new(validation)))
    }

    /// Client for model listing, which only the hosted backend supports.
    pub fn listing_client(&self) -> Result<GroqModel> {
        if self.backend != "groq" {
            return Err(ns_core::Error::Config(format!(
                "Model listing is not supported by the '{}' backend",
                self.backend
            )));
        }
        GroqModel::new(&self.model_config(&self.analysis_model))
    }
}

impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("source", &self.source)
            .field("newsapi_key", &self.newsapi_key.as_ref().map(|_| "<redacted>"))
            .field("backend", &self.backend)
            .field("llm_api_key", &self.llm_api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("analysis_model", &self.analysis_model)
            .field("validation_model", &self.validation_model)
            .finish()
    }
}
