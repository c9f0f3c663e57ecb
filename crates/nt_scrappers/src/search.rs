//! Search-result link discovery.
//!
//! The search page is scanned by an ordered list of [`LinkTier`]s. Matches are
//! appended in document order and the scan returns as soon as the cap is reached,
//! so later tiers only run when the earlier ones came up short.

use nt_core::{ArticleLink, Error, PageFetcher, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::utils::{absolute_href, absolute_http_url, element_text, parse_selector};

pub const DEFAULT_SEARCH_URL: &str = "https://search.naver.com/search.naver";
pub const DEFAULT_NEWS_DOMAINS: &[&str] = &["news.naver.com"];

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search endpoint; `where=news&query=<keyword>` is appended
    pub search_url: String,
    /// Hosts accepted by the generic fallback tier
    pub news_domains: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            news_domains: DEFAULT_NEWS_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// One structural heuristic over a search results page.
pub trait LinkTier: Send + Sync {
    fn name(&self) -> &str;

    /// All qualifying links in document order
    fn links(&self, document: &Html) -> Vec<ArticleLink>;
}

/// Title attribute if present, otherwise the anchor text.
fn anchor_title(anchor: &ElementRef<'_>) -> String {
    anchor
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| element_text(anchor))
}

/// Anchors carrying a result-title marker class. Only absolute http(s) hrefs qualify.
pub struct TitleClassTier {
    name: String,
    selector: Selector,
}

impl TitleClassTier {
    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self {
            name: selector.to_string(),
            selector: parse_selector(selector)?,
        })
    }
}

impl LinkTier for TitleClassTier {
    fn name(&self) -> &str {
        &self.name
    }

    fn links(&self, document: &Html) -> Vec<ArticleLink> {
        document
            .select(&self.selector)
            .filter_map(|anchor| {
                let href = absolute_href(anchor.value().attr("href")?)?;
                Some(ArticleLink::new(anchor_title(&anchor), href))
            })
            .collect()
    }
}

/// Any anchor pointing at a known news host or one of its subdomains.
pub struct NewsDomainTier {
    domains: Vec<String>,
    selector: Selector,
}

impl NewsDomainTier {
    pub fn new(domains: Vec<String>) -> Result<Self> {
        Ok(Self {
            domains,
            selector: parse_selector("a[href]")?,
        })
    }

    fn is_news_host(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        self.domains
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{}", domain)))
    }
}

impl LinkTier for NewsDomainTier {
    fn name(&self) -> &str {
        "news-domain"
    }

    fn links(&self, document: &Html) -> Vec<ArticleLink> {
        document
            .select(&self.selector)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?;
                if !self.is_news_host(&absolute_http_url(href)?) {
                    return None;
                }
                Some(ArticleLink::new(anchor_title(&anchor), absolute_href(href)?))
            })
            .collect()
    }
}

/// Ordered list of tiers evaluated against one document.
pub struct LinkCascade {
    tiers: Vec<Box<dyn LinkTier>>,
}

impl LinkCascade {
    pub fn new(tiers: Vec<Box<dyn LinkTier>>) -> Self {
        Self { tiers }
    }

    /// `a.news_tit`, then `a.tit`, then any link into a known news domain.
    pub fn standard(news_domains: Vec<String>) -> Result<Self> {
        Ok(Self::new(vec![
            Box::new(TitleClassTier::new("a.news_tit")?),
            Box::new(TitleClassTier::new("a.tit")?),
            Box::new(NewsDomainTier::new(news_domains)?),
        ]))
    }

    /// Links already taken by an earlier tier are skipped, so an anchor matched by
    /// several tiers is kept once, at its first position.
    pub fn select(&self, html: &str, max_articles: usize) -> Vec<ArticleLink> {
        let max_articles = max_articles.max(1);
        let document = Html::parse_document(html);
        let mut links = Vec::new();
        let mut seen = HashSet::new();

        for tier in &self.tiers {
            let before = links.len();
            for link in tier.links(&document) {
                if !seen.insert(link.url.clone()) {
                    continue;
                }
                links.push(link);
                if links.len() >= max_articles {
                    debug!(tier = tier.name(), count = links.len(), "Link cap reached");
                    return links;
                }
            }
            debug!(tier = tier.name(), added = links.len() - before, "Link tier exhausted");
        }

        links
    }
}

pub struct LinkDiscoverer {
    fetcher: Arc<dyn PageFetcher>,
    cascade: LinkCascade,
    search_url: String,
}

impl LinkDiscoverer {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &SearchConfig) -> Result<Self> {
        Ok(Self::with_cascade(
            fetcher,
            LinkCascade::standard(config.news_domains.clone())?,
            config.search_url.clone(),
        ))
    }

    pub fn with_cascade(fetcher: Arc<dyn PageFetcher>, cascade: LinkCascade, search_url: String) -> Self {
        Self {
            fetcher,
            cascade,
            search_url,
        }
    }

    pub fn search_url_for(&self, keyword: &str) -> Result<String> {
        Url::parse_with_params(&self.search_url, &[("where", "news"), ("query", keyword)])
            .map(String::from)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.search_url, e)))
    }

    pub async fn discover(&self, keyword: &str, max_articles: usize) -> Result<Vec<ArticleLink>> {
        let url = self.search_url_for(keyword)?;
        let html = self.fetcher.fetch(&url).await?;
        let links = self.cascade.select(&html, max_articles);

        if links.is_empty() {
            return Err(Error::NoArticles {
                keyword: keyword.to_string(),
            });
        }
        info!(%keyword, count = links.len(), "Discovered article links");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StaticPage {
        html: String,
        requested: Mutex<Vec<String>>,
    }

    impl StaticPage {
        fn new(html: &str) -> Arc<Self> {
            Arc::new(Self {
                html: html.to_string(),
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.html.clone())
        }
    }

    struct CountingTier {
        calls: Arc<AtomicUsize>,
        links: Vec<ArticleLink>,
    }

    impl LinkTier for CountingTier {
        fn name(&self) -> &str {
            "counting"
        }

        fn links(&self, _document: &Html) -> Vec<ArticleLink> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.links.clone()
        }
    }

    fn numbered_links(prefix: &str, count: usize) -> Vec<ArticleLink> {
        (0..count)
            .map(|i| ArticleLink::new(format!("{} {}", prefix, i), format!("https://example.com/{}/{}", prefix, i)))
            .collect()
    }

    const SEARCH_PAGE: &str = r#"
        <html><body>
            <a class="news_tit" href="https://www.hani.co.kr/arti/1" title=" 비트코인 급등 ">ignored text</a>
            <a class="news_tit" href="/relative/2">relative</a>
            <a class="news_tit" href="https://www.yna.co.kr/view/3">  연합 <b>속보</b> </a>
            <a class="tit" href="https://www.joongang.co.kr/article/4">중앙</a>
            <a href="https://n.news.naver.com/mnews/article/5">네이버 뉴스</a>
            <a href="https://blog.naver.com/post/6">블로그</a>
            <a href="https://fakenews.naver.com.evil.example/7">가짜</a>
        </body></html>
    "#;

    #[test]
    fn test_standard_cascade_accumulates_in_order() {
        let cascade = LinkCascade::standard(vec!["news.naver.com".to_string()]).unwrap();
        let links = cascade.select(SEARCH_PAGE, 10);

        assert_eq!(
            links,
            vec![
                ArticleLink::new("비트코인 급등", "https://www.hani.co.kr/arti/1"),
                ArticleLink::new("연합 속보", "https://www.yna.co.kr/view/3"),
                ArticleLink::new("중앙", "https://www.joongang.co.kr/article/4"),
                ArticleLink::new("네이버 뉴스", "https://n.news.naver.com/mnews/article/5"),
            ]
        );
    }

    #[test]
    fn test_cascade_stops_at_cap() {
        let cascade = LinkCascade::standard(vec!["news.naver.com".to_string()]).unwrap();
        let links = cascade.select(SEARCH_PAGE, 3);
        assert_eq!(links.len(), 3);
        assert_eq!(links[2].url, "https://www.joongang.co.kr/article/4");
    }

    #[test]
    fn test_later_tiers_skipped_when_first_tier_fills_cap() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));
        let cascade = LinkCascade::new(vec![
            Box::new(CountingTier { calls: first.clone(), links: numbered_links("a", 7) }),
            Box::new(CountingTier { calls: second.clone(), links: numbered_links("b", 3) }),
            Box::new(CountingTier { calls: third.clone(), links: numbered_links("c", 3) }),
        ]);

        let links = cascade.select("<html></html>", 5);

        assert_eq!(links.len(), 5);
        assert!(links.iter().all(|l| l.url.contains("/a/")));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
        assert_eq!(third.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fallback_tier_consulted_when_short() {
        let first = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));
        let cascade = LinkCascade::new(vec![
            Box::new(CountingTier { calls: first.clone(), links: numbered_links("a", 1) }),
            Box::new(CountingTier { calls: third.clone(), links: numbered_links("c", 10) }),
        ]);

        let links = cascade.select("<html></html>", 5);
        assert_eq!(links.len(), 5);
        assert_eq!(links[0].url, "https://example.com/a/0");
        assert_eq!(links[1].url, "https://example.com/c/0");
        assert_eq!(third.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_anchor_matched_by_two_tiers_kept_once() {
        let cascade = LinkCascade::standard(vec!["news.naver.com".to_string()]).unwrap();
        let links = cascade.select(
            r#"<a class="news_tit" href="https://n.news.naver.com/article/1">첫째</a>
               <a class="news_tit" href="https://n.news.naver.com/article/2">둘째</a>"#,
            5,
        );

        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://n.news.naver.com/article/1", "https://n.news.naver.com/article/2"]
        );
    }

    #[test]
    fn test_duplicates_do_not_count_toward_cap() {
        let cascade = LinkCascade::new(vec![
            Box::new(CountingTier { calls: Arc::new(AtomicUsize::new(0)), links: numbered_links("a", 2) }),
            Box::new(CountingTier { calls: Arc::new(AtomicUsize::new(0)), links: numbered_links("a", 4) }),
        ]);

        let links = cascade.select("<html></html>", 3);
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://example.com/a/0", "https://example.com/a/1", "https://example.com/a/2"]
        );
    }

    #[test]
    fn test_title_tier_rewrites_protocol_relative_href() {
        let tier = TitleClassTier::new("a.news_tit").unwrap();
        let document = Html::parse_document(r#"<a class="news_tit" href="//n.news.naver.com/article/1">기사</a>"#);
        let links = tier.links(&document);
        assert_eq!(links, vec![ArticleLink::new("기사", "https://n.news.naver.com/article/1")]);
        assert!(Url::parse(&links[0].url).is_ok());
    }

    #[test]
    fn test_news_domain_tier_matches_host_only() {
        let tier = NewsDomainTier::new(vec!["news.naver.com".to_string()]).unwrap();
        let document = Html::parse_document(
            r#"<a href="//news.naver.com/main/read?id=1">protocol relative</a>
               <a href="https://example.com/?u=news.naver.com">query mention</a>"#,
        );
        let links = tier.links(&document);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://news.naver.com/main/read?id=1");
    }

    #[tokio::test]
    async fn test_discover_encodes_keyword() {
        let page = StaticPage::new(SEARCH_PAGE);
        let discoverer = LinkDiscoverer::new(page.clone(), &SearchConfig::default()).unwrap();

        let links = discoverer.discover("미국 증시", 2).await.unwrap();
        assert_eq!(links.len(), 2);

        let requested = page.requested.lock().unwrap();
        assert_eq!(requested.len(), 1);
        let url = Url::parse(&requested[0]).unwrap();
        assert_eq!(url.host_str(), Some("search.naver.com"));
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("where".to_string(), "news".to_string())));
        assert!(query.contains(&("query".to_string(), "미국 증시".to_string())));
    }

    #[tokio::test]
    async fn test_discover_fails_when_every_tier_is_empty() {
        let page = StaticPage::new(r#"<a href="https://blog.naver.com/x">blog</a><a class="tit" href="/y">y</a>"#);
        let discoverer = LinkDiscoverer::new(page, &SearchConfig::default()).unwrap();

        let err = discoverer.discover("날씨", 5).await.unwrap_err();
        assert!(matches!(err, Error::NoArticles { ref keyword } if keyword == "날씨"));
    }
}
