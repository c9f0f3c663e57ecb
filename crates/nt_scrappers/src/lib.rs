pub mod cli;
pub mod extract;
pub mod fetch;
pub mod manager;
pub mod search;
mod logging;
mod utils;

pub use cli::{handle_command, TrendCommands};
pub use extract::{BodyExtractor, ContentTemplate, KNOWN_TEMPLATES};
pub use fetch::HttpFetcher;
pub use logging::init_logging;
pub use manager::{PipelineConfig, TrendManager, DEFAULT_MAX_ARTICLES};
pub use search::{LinkCascade, LinkDiscoverer, LinkTier, SearchConfig};

pub mod prelude {
    pub use super::manager::{PipelineConfig, TrendManager};
    pub use nt_core::{ArticleLink, ArticleResult, Error, Result, TrendDigest};
}
