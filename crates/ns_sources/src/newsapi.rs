use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use ns_core::{Article, ArticleSource, Error, Pacer, Result, TokioPacer};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::topics::topic_query;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Clone)]
pub struct NewsApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Only articles published within this many days are requested
    pub window_days: i64,
    pub rate_limit_wait: Duration,
}

impl NewsApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            window_days: 7,
            rate_limit_wait: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("window_days", &self.window_days)
            .field("rate_limit_wait", &self.rate_limit_wait)
            .finish()
    }
}

#[derive(Deserialize)]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Deserialize, Default)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<RawSource>,
}

#[derive(Deserialize, Default)]
struct RawSource {
    name: Option<String>,
}

pub struct NewsApiSource {
    client: Client,
    config: NewsApiConfig,
    endpoint: Url,
    pacer: Arc<dyn Pacer>,
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl NewsApiSource {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Config("NEWSAPI_KEY not found in environment variables".to_string()));
        }
        let endpoint = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("Invalid NewsAPI URL {}: {}", config.base_url, e)))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            endpoint,
            pacer: Arc::new(TokioPacer),
        })
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    fn query_params(&self, topic: &str, count: usize) -> Vec<(&'static str, String)> {
        let to = Utc::now();
        let from = to - ChronoDuration::days(self.config.window_days);
        vec![
            ("q", topic_query(topic).to_string()),
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
            ("language", "en".to_string()),
            ("sortBy", "publishedAt".to_string()),
            ("pageSize", count.to_string()),
            ("apiKey", self.config.api_key.clone()),
        ]
    }

    async fn send(&self, params: &[(&'static str, String)]) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.endpoint.clone()).query(params).send().await
    }

    async fn try_fetch(&self, topic: &str, count: usize) -> Result<Vec<Article>> {
        let params = self.query_params(topic, count);
        debug!("Requesting up to {} articles for '{}'", count, topic);

        let mut response = self.send(&params).await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            warn!(
                "NewsAPI rate limit hit, waiting {}s before retrying",
                self.config.rate_limit_wait.as_secs()
            );
            self.pacer.pause(self.config.rate_limit_wait).await;
            response = self.send(&params).await?;
        }

        let body: NewsApiResponse = response.error_for_status()?.json().await?;
        if body.status != "ok" {
            return Err(Error::Source(format!(
                "NewsAPI error: {}",
                body.message.as_deref().unwrap_or("Unknown error")
            )));
        }
        Ok(clean_articles(body.articles, count))
    }
}

/// Drop records without a title or description, trim text fields and cap
/// the batch at `count`.
fn clean_articles(raw: Vec<RawArticle>, count: usize) -> Vec<Article> {
    raw.into_iter()
        .filter_map(|a| {
            Article {
                title: a.title.unwrap_or_default(),
                description: a.description.unwrap_or_default(),
                content: a.content.unwrap_or_default(),
                url: a.url.unwrap_or_default(),
                published_at: a.published_at.unwrap_or_default(),
                source: a
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
            }
            .cleaned()
        })
        .take(count)
        .collect()
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch(&self, topic: &str, count: usize) -> Vec<Article> {
        if count == 0 {
            return Vec::new();
        }
        match self.try_fetch(topic, count).await {
            Ok(articles) => {
                info!("📰 NewsAPI returned {} usable articles for '{}'", articles.len(), topic);
                articles
            }
            Err(Error::Http(e)) if e.is_timeout() => {
                warn!("NewsAPI request timed out after {} seconds", self.config.timeout.as_secs());
                Vec::new()
            }
            Err(e) => {
                warn!("NewsAPI fetch failed: {}", e);
                Vec::new()
            }
        }
    }
}
