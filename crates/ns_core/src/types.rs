use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cleaned news item. Title and description are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub source: String,
}

impl Article {
    /// Trim the text fields, rejecting the article when title or description ends up empty.
    pub fn cleaned(mut self) -> Option<Self> {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.content = self.content.trim().to_string();
        if self.title.is_empty() || self.description.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment: {}", other)),
        }
    }
}

/// First-stage judgment of one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub gist: String,
    pub sentiment: Sentiment,
    pub tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Analysis {
    pub const FALLBACK_GIST: &'static str = "Unable to analyze article";
    pub const FALLBACK_TONE: &'static str = "unknown";

    pub fn fallback(cause: impl Into<String>) -> Self {
        Self {
            gist: Self::FALLBACK_GIST.to_string(),
            sentiment: Sentiment::Neutral,
            tone: Self::FALLBACK_TONE.to_string(),
            error: Some(cause.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Second-stage fact-check of an analysis against its article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub is_valid: bool,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    pub fn fallback(cause: impl Into<String>) -> Self {
        let cause = cause.into();
        Self {
            is_valid: false,
            notes: format!("Validation failed due to error: {}", cause),
            error: Some(cause),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything known about one article at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleReport {
    pub article: Article,
    pub analysis: Analysis,
    pub validation: Validation,
}

/// Client-facing summary row, one per fetched article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub id: usize,
    pub title: String,
    pub sentiment: String,
    pub validation_passed: bool,
    pub validation_note: String,
    pub summary: String,
    pub url: String,
}

impl PipelineResult {
    /// `id` is the 1-based position of the article in fetch order.
    pub fn from_report(id: usize, report: &ArticleReport) -> Self {
        let url = if report.article.url.is_empty() {
            "#".to_string()
        } else {
            report.article.url.clone()
        };
        Self {
            id,
            title: report.article.title.clone(),
            sentiment: report.analysis.sentiment.as_str().to_string(),
            validation_passed: report.validation.is_valid,
            validation_note: report.validation.notes.clone(),
            summary: report.analysis.gist.clone(),
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            title: "India announces new economic policy".to_string(),
            description: "The government unveiled a reform package.".to_string(),
            content: "India has announced major economic reforms...".to_string(),
            url: "https://example.com/article".to_string(),
            published_at: "2024-01-15T10:00:00Z".to_string(),
            source: "Test News".to_string(),
        }
    }

    #[test]
    fn test_cleaned_trims_and_rejects_blank_fields() {
        let padded = Article {
            title: "  India announces new economic policy ".to_string(),
            content: " body ".to_string(),
            ..sample_article()
        };
        let cleaned = padded.cleaned().unwrap();
        assert_eq!(cleaned.title, "India announces new economic policy");
        assert_eq!(cleaned.content, "body");

        let blank_title = Article { title: " \t".to_string(), ..sample_article() };
        assert!(blank_title.cleaned().is_none());
        let blank_description = Article { description: String::new(), ..sample_article() };
        assert!(blank_description.cleaned().is_none());
    }

    #[test]
    fn test_sentiment_parsing_is_case_insensitive() {
        assert_eq!("Positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!(" NEGATIVE ".parse::<Sentiment>().unwrap(), Sentiment::Negative);
        assert!("mixed".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_analysis_fallback_is_complete() {
        let analysis = Analysis::fallback("boom");
        assert_eq!(analysis.gist, "Unable to analyze article");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.tone, "unknown");
        assert_eq!(analysis.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_validation_fallback_explains_failure() {
        let validation = Validation::fallback("timeout");
        assert!(!validation.is_valid);
        assert!(validation.notes.contains("timeout"));
        assert_eq!(validation.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_pipeline_result_wire_names() {
        let report = ArticleReport {
            article: sample_article(),
            analysis: Analysis {
                gist: "Reforms announced.".to_string(),
                sentiment: Sentiment::Positive,
                tone: "analytical".to_string(),
                error: None,
            },
            validation: Validation {
                is_valid: true,
                notes: "Accurate".to_string(),
                error: None,
            },
        };
        let value = serde_json::to_value(PipelineResult::from_report(1, &report)).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["sentiment"], "positive");
        assert_eq!(value["validationPassed"], true);
        assert_eq!(value["validationNote"], "Accurate");
        assert_eq!(value["summary"], "Reforms announced.");
        assert_eq!(value["url"], "https://example.com/article");
    }

    #[test]
    fn test_pipeline_result_placeholder_url() {
        let mut article = sample_article();
        article.url.clear();
        let report = ArticleReport {
            article,
            analysis: Analysis::fallback("x"),
            validation: Validation::fallback("y"),
        };
        assert_eq!(PipelineResult::from_report(3, &report).url, "#");
    }

    #[test]
    fn test_article_uses_published_at_wire_name() {
        let value = serde_json::to_value(sample_article()).unwrap();
        assert_eq!(value["publishedAt"], "2024-01-15T10:00:00Z");
        assert!(value.get("published_at").is_none());
    }

    #[test]
    fn test_analysis_omits_absent_error() {
        let value = serde_json::to_value(Analysis {
            gist: "g".to_string(),
            sentiment: Sentiment::Neutral,
            tone: "balanced".to_string(),
            error: None,
        })
        .unwrap();
        assert!(value.get("error").is_none());
    }
}
