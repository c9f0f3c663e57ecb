use serde::{Deserialize, Serialize};

/// Prefix of the summary text recorded for an article that could not be summarized.
pub const FAILURE_MARKER: &str = "summary failed:";

/// A search hit: the headline and the absolute address of the article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLink {
    pub title: String,
    pub url: String,
}

impl ArticleLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// What happened to one article on its way through extraction and summarization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleOutcome {
    Summarized(String),
    Failed(String),
}

impl ArticleOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ArticleOutcome::Failed(_))
    }

    /// The text that stands in for this article in responses and in the trend prompt.
    pub fn summary_text(&self) -> String {
        match self {
            ArticleOutcome::Summarized(summary) => summary.clone(),
            ArticleOutcome::Failed(reason) => format!("{} {}", FAILURE_MARKER, reason),
        }
    }
}

impl<E: std::fmt::Display> From<std::result::Result<String, E>> for ArticleOutcome {
    fn from(result: std::result::Result<String, E>) -> Self {
        match result {
            Ok(summary) => ArticleOutcome::Summarized(summary),
            Err(e) => ArticleOutcome::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleResult {
    pub title: String,
    pub url: String,
    pub summary: String,
}

impl ArticleResult {
    pub fn from_outcome(link: ArticleLink, outcome: &ArticleOutcome) -> Self {
        Self {
            title: link.title,
            url: link.url,
            summary: outcome.summary_text(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.summary.starts_with(FAILURE_MARKER)
    }
}

/// The response for one keyword: the resolved purpose, the consolidated digest
/// and every discovered article in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDigest {
    pub keyword: String,
    pub purpose: String,
    pub trend_digest: String,
    pub trend_articles: Vec<ArticleResult>,
}
