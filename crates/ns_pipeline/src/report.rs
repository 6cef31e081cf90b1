use chrono::{DateTime, Local};
use ns_core::{Analysis, Article, ArticleReport, Result, Sentiment};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

pub const RAW_ARTICLES_FILE: &str = "raw_articles.json";
pub const ANALYSIS_FILE: &str = "analysis_results.json";
pub const VALIDATED_FILE: &str = "validated_results.json";
pub const REPORT_FILE: &str = "final_report.md";

#[derive(Serialize)]
struct AnalyzedArticle<'a> {
    article: &'a Article,
    analysis: &'a Analysis,
}

pub fn count_sentiments(reports: &[ArticleReport]) -> HashMap<Sentiment, usize> {
    let mut counts = HashMap::from([
        (Sentiment::Positive, 0),
        (Sentiment::Negative, 0),
        (Sentiment::Neutral, 0),
    ]);
    for report in reports {
        *counts.entry(report.analysis.sentiment).or_insert(0) += 1;
    }
    counts
}

/// Human-readable summary of a finished batch.
pub fn render_markdown(reports: &[ArticleReport], source_name: &str, generated_at: DateTime<Local>) -> String {
    let counts = count_sentiments(reports);
    let mut out = String::new();

    let _ = writeln!(out, "# News Analysis Report");
    let _ = writeln!(out, "**Date:** {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "**Articles Analyzed:** {}", reports.len());
    let _ = writeln!(out, "**Source:** {}", source_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out);
    for (label, sentiment) in [
        ("Positive", Sentiment::Positive),
        ("Negative", Sentiment::Negative),
        ("Neutral", Sentiment::Neutral),
    ] {
        let _ = writeln!(out, "- {}: {} articles", label, counts.get(&sentiment).copied().unwrap_or(0));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "## Detailed Analysis");
    let _ = writeln!(out);

    for (index, report) in reports.iter().enumerate() {
        let url = if report.article.url.is_empty() { "#" } else { report.article.url.as_str() };
        let mark = if report.validation.is_valid { "✓" } else { "✗" };
        let _ = writeln!(out, "### Article {}: \"{}\"", index + 1, report.article.title);
        let _ = writeln!(out, "- **Source:** [{}]({})", url, url);
        let _ = writeln!(out, "- **Gist:** {}", report.analysis.gist);
        let _ = writeln!(out, "- **LLM#1 Sentiment:** {}", report.analysis.sentiment);
        let _ = writeln!(out, "- **LLM#2 Validation:** {} {}", mark, report.validation.notes);
        let _ = writeln!(out, "- **Tone:** {}", report.analysis.tone);
        let _ = writeln!(out);
    }
    out
}

/// Write the batch artifacts into `dir`, creating it if needed.
pub async fn write_outputs(dir: &Path, reports: &[ArticleReport], source_name: &str) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;

    let articles: Vec<&Article> = reports.iter().map(|r| &r.article).collect();
    let analyzed: Vec<AnalyzedArticle> = reports
        .iter()
        .map(|r| AnalyzedArticle {
            article: &r.article,
            analysis: &r.analysis,
        })
        .collect();

    let files = [
        (RAW_ARTICLES_FILE, serde_json::to_string_pretty(&articles)?),
        (ANALYSIS_FILE, serde_json::to_string_pretty(&analyzed)?),
        (VALIDATED_FILE, serde_json::to_string_pretty(reports)?),
        (REPORT_FILE, render_markdown(reports, source_name, Local::now())),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        tokio::fs::write(&path, contents).await?;
        info!("✓ Saved {}", path.display());
        written.push(path);
    }
    Ok(written)
}
