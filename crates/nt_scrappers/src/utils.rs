//! Common helpers for the selector cascades

use nt_core::{normalize_whitespace, Error, Result};
use scraper::{ElementRef, Selector};
use url::Url;

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Scraping(format!("Invalid selector {}: {}", selector, e)))
}

/// Whitespace-normalized text content of an element.
pub fn element_text(element: &ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

/// Parses `href` as an absolute http(s) URL. Protocol-relative links are read as https.
pub fn absolute_http_url(href: &str) -> Option<Url> {
    let href = href.trim();
    let parsed = match href.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{}", rest)),
        None => Url::parse(href),
    }
    .ok()?;

    match parsed.scheme() {
        "http" | "https" => Some(parsed),
        _ => None,
    }
}

/// Absolute form of an article href. Protocol-relative hrefs are rewritten to https,
/// absolute ones are kept as written.
pub fn absolute_href(href: &str) -> Option<String> {
    let url = absolute_http_url(href)?;
    let href = href.trim();
    if href.starts_with("//") {
        Some(url.to_string())
    } else {
        Some(href.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_absolute_http_url() {
        assert!(absolute_http_url("https://n.news.naver.com/article/1").is_some());
        assert!(absolute_http_url(" http://example.com ").is_some());
        assert_eq!(
            absolute_http_url("//news.naver.com/main").unwrap().host_str(),
            Some("news.naver.com")
        );
        assert!(absolute_http_url("/relative/path").is_none());
        assert!(absolute_http_url("javascript:void(0)").is_none());
        assert!(absolute_http_url("mailto:desk@example.com").is_none());
    }

    #[test]
    fn test_absolute_href() {
        assert_eq!(
            absolute_href("//n.news.naver.com/article/1").as_deref(),
            Some("https://n.news.naver.com/article/1")
        );
        assert_eq!(
            absolute_href(" http://example.com/a?b=1 ").as_deref(),
            Some("http://example.com/a?b=1")
        );
        assert!(absolute_href("/relative").is_none());
    }

    #[test]
    fn test_element_text_normalizes() {
        let document = Html::parse_fragment("<div>  Bit<b>coin</b>\n\n  rallies   again </div>");
        let selector = parse_selector("div").unwrap();
        let element = document.select(&selector).next().unwrap();
        assert_eq!(element_text(&element), "Bitcoin rallies again");
    }

    #[test]
    fn test_invalid_selector() {
        assert!(parse_selector("div[").is_err());
    }
}
