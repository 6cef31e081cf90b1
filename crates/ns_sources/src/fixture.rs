use async_trait::async_trait;
use ns_core::{Article, ArticleSource};

/// In-memory source serving a fixed batch, for offline runs and tests.
///
/// Articles go through the same cleaning as provider records, so blank
/// entries never reach the stages.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    articles: Vec<Article>,
}

impl StaticSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A handful of plausible articles.
    pub fn sample() -> Self {
        let make = |i: usize, title: &str, description: &str| Article {
            title: title.to_string(),
            description: description.to_string(),
            content: format!("{} More details follow in the full report.", description),
            url: format!("https://news.example.com/articles/{}", i),
            published_at: format!("2024-01-{:02}T10:00:00Z", 10 + i),
            source: "Example Wire".to_string(),
        };
        Self::new(vec![
            make(1, "Parliament passes new data protection bill", "Lawmakers approved the bill after a lengthy debate."),
            make(2, "State elections see record turnout", "Officials reported the highest participation in two decades."),
            make(3, "Opposition walks out over budget allocation", "Opposition members protested cuts to rural programmes."),
            make(4, "Government announces infrastructure package", "The plan targets highways, railways and ports."),
        ])
    }
}

#[async_trait]
impl ArticleSource for StaticSource {
    fn name(&self) -> &str {
        "Static fixture"
    }

    async fn fetch(&self, _topic: &str, count: usize) -> Vec<Article> {
        self.articles
            .iter()
            .cloned()
            .filter_map(Article::cleaned)
            .take(count)
            .collect()
    }
}
