use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("keyword is required")]
    MissingKeyword,

    #[error("no related news articles found")]
    NoArticles { keyword: String },

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors caused by the request itself (bad keyword, nothing to summarize)
    /// rather than by a failing upstream.
    pub fn is_request_level(&self) -> bool {
        matches!(self, Error::MissingKeyword | Error::NoArticles { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
