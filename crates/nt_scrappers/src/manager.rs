use futures::future::join_all;
use nt_core::{
    ArticleLink, ArticleOutcome, ArticleResult, Error, InferenceModel, PageFetcher, PurposeResolver,
    Result, TrendDigest,
};
use nt_inference::{ArticleSummarizer, TrendAggregator};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use crate::extract::BodyExtractor;
use crate::search::{LinkDiscoverer, SearchConfig};

pub const DEFAULT_MAX_ARTICLES: usize = 5;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub max_articles: usize,
    /// Articles extracted and summarized at the same time; 1 keeps them strictly sequential
    pub concurrency: usize,
    pub model_timeout: Duration,
    pub search: SearchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_articles: DEFAULT_MAX_ARTICLES,
            concurrency: 1,
            model_timeout: nt_inference::DEFAULT_TIMEOUT,
            search: SearchConfig::default(),
        }
    }
}

/// Runs one keyword through purpose resolution, link discovery, per-article
/// extraction and summarization, and trend aggregation.
pub struct TrendManager {
    resolver: Arc<PurposeResolver>,
    discoverer: LinkDiscoverer,
    extractor: BodyExtractor,
    summarizer: ArticleSummarizer,
    aggregator: TrendAggregator,
    model_name: String,
    config: PipelineConfig,
}

impl TrendManager {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        inference: Arc<dyn InferenceModel>,
        resolver: PurposeResolver,
        config: PipelineConfig,
    ) -> Result<Self> {
        Ok(Self {
            resolver: Arc::new(resolver),
            discoverer: LinkDiscoverer::new(fetcher.clone(), &config.search)?,
            extractor: BodyExtractor::new(fetcher)?,
            summarizer: ArticleSummarizer::new(inference.clone(), config.model_timeout),
            aggregator: TrendAggregator::new(inference.clone(), config.model_timeout),
            model_name: inference.name().to_string(),
            config,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn resolve_purpose(&self, keyword: &str) -> String {
        self.resolver.resolve(keyword)
    }

    #[instrument(level = "info", skip(self))]
    pub async fn run(&self, keyword: &str) -> Result<TrendDigest> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::MissingKeyword);
        }

        let purpose = self.resolve_purpose(keyword);
        info!(%purpose, "🎯 Resolved purpose");

        let links = self.discoverer.discover(keyword, self.config.max_articles).await?;
        info!(count = links.len(), "🔍 Processing discovered articles");

        let outcomes = self.process_articles(&links, &purpose).await;
        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        info!(failed, total = outcomes.len(), "📑 Article summaries collected");

        let summaries: Vec<String> = outcomes.iter().map(ArticleOutcome::summary_text).collect();
        let trend_digest = self.aggregator.aggregate(&summaries, &purpose).await?;
        info!("✨ Trend digest generated");

        let trend_articles = links
            .into_iter()
            .zip(outcomes.iter())
            .map(|(link, outcome)| ArticleResult::from_outcome(link, outcome))
            .collect();

        Ok(TrendDigest {
            keyword: keyword.to_string(),
            purpose,
            trend_digest,
            trend_articles,
        })
    }

    /// One outcome per link, in link order. At most `concurrency` articles are in flight.
    async fn process_articles(&self, links: &[ArticleLink], purpose: &str) -> Vec<ArticleOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let total = links.len();

        let futures = links.iter().enumerate().map(|(i, link)| {
            let semaphore = semaphore.clone();
            async move {
                let outcome = match semaphore.acquire().await {
                    Ok(_permit) => ArticleOutcome::from(self.summarize_link(link, purpose).await),
                    Err(e) => ArticleOutcome::Failed(e.to_string()),
                };
                match &outcome {
                    ArticleOutcome::Summarized(_) => {
                        info!(article = i + 1, total, url = %link.url, "📝 Article summarized")
                    }
                    ArticleOutcome::Failed(reason) => {
                        warn!(article = i + 1, total, url = %link.url, %reason, "⚠️ Article failed")
                    }
                }
                outcome
            }
        });

        join_all(futures).await
    }

    async fn summarize_link(&self, link: &ArticleLink, purpose: &str) -> Result<String> {
        let text = self.extractor.extract(&link.url).await?;
        self.summarizer.summarize(&text, purpose).await
    }
}
