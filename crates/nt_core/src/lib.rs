pub mod error;
pub mod fetch;
pub mod models;
pub mod purpose;
pub mod types;

pub use error::{Error, Result};
pub use fetch::PageFetcher;
pub use models::InferenceModel;
pub use purpose::{PurposeResolver, PurposeRule};
pub use types::{ArticleLink, ArticleOutcome, ArticleResult, TrendDigest, FAILURE_MARKER};

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
