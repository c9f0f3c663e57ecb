//! Article body extraction.
//!
//! Known publisher containers are tried in order; the first one with text wins.
//! Pages from unknown publishers fall back to their `<p>` elements.

use nt_core::{Error, PageFetcher, Result};
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::debug;

use crate::utils::{element_text, parse_selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentTemplate {
    pub publisher: &'static str,
    pub selector: &'static str,
}

pub const KNOWN_TEMPLATES: &[ContentTemplate] = &[
    ContentTemplate { publisher: "Naver News", selector: "div#dic_area" },
    ContentTemplate { publisher: "JoongAng Ilbo", selector: "div.article_body" },
    ContentTemplate { publisher: "Hankyoreh", selector: "div.article-text" },
    ContentTemplate { publisher: "Yonhap News", selector: "div.story-news.article" },
];

pub struct BodyExtractor {
    fetcher: Arc<dyn PageFetcher>,
    templates: Vec<(&'static str, Selector)>,
    paragraphs: Selector,
}

impl BodyExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        Self::with_templates(fetcher, KNOWN_TEMPLATES)
    }

    pub fn with_templates(fetcher: Arc<dyn PageFetcher>, templates: &[ContentTemplate]) -> Result<Self> {
        let templates = templates
            .iter()
            .map(|t| parse_selector(t.selector).map(|selector| (t.publisher, selector)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fetcher,
            templates,
            paragraphs: parse_selector("p")?,
        })
    }

    pub async fn extract(&self, url: &str) -> Result<String> {
        let html = self.fetcher.fetch(url).await?;
        self.extract_text(&html)
            .ok_or_else(|| Error::Extraction(format!("no article text found at {}", url)))
    }

    /// Body text of an already fetched page, `None` when nothing usable is found.
    pub fn extract_text(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        for (publisher, selector) in &self.templates {
            if let Some(text) = document
                .select(selector)
                .next()
                .map(|node| element_text(&node))
                .filter(|text| !text.is_empty())
            {
                debug!(publisher = *publisher, chars = text.chars().count(), "Matched content template");
                return Some(text);
            }
        }

        let text = document
            .select(&self.paragraphs)
            .map(|p| element_text(&p))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            None
        } else {
            debug!(chars = text.chars().count(), "Fell back to paragraph text");
            Some(text)
        }
    }
}
