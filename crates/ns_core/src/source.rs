use async_trait::async_trait;
use crate::types::Article;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human readable provider name, used in progress messages and reports
    fn name(&self) -> &str;

    /// Fetch at most `count` recent articles for `topic`.
    ///
    /// Never fails: provider errors, timeouts and non-success statuses all
    /// come back as an empty batch. An empty batch means "no data" and must
    /// not be retried by the caller.
    async fn fetch(&self, topic: &str, count: usize) -> Vec<Article>;
}
