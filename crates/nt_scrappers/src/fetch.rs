use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use nt_core::{PageFetcher, Result};
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use tracing::debug;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_BYTES: usize = 1024;

/// `PageFetcher` backed by a shared `reqwest` client with browser-like headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes, content_type.as_deref());
        debug!(%url, bytes = bytes.len(), "Fetched page");
        Ok(body)
    }
}

/// Decodes a page using the header charset, then a `<meta>` declaration, then UTF-8.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(|ct| charset_param(&ct.to_ascii_lowercase()))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(bytes).and_then(|label| Encoding::for_label(label.as_bytes())))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!(encoding = used.name(), "Page contained malformed sequences");
    }
    text.into_owned()
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(META_SNIFF_BYTES)]).to_ascii_lowercase();
    let mut rest = head.as_str();
    while let Some(start) = rest.find("<meta") {
        let tag = &rest[start..];
        let end = tag.find('>').unwrap_or(tag.len());
        if let Some(charset) = charset_param(&tag[..end]) {
            return Some(charset);
        }
        rest = &tag[end..];
    }
    None
}

/// Value of a `charset=` parameter in already lowercased text.
fn charset_param(text: &str) -> Option<String> {
    let idx = text.find("charset")?;
    let value = text[idx + "charset".len()..].trim_start().strip_prefix('=')?;
    let charset: String = value
        .trim_start()
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!charset.is_empty()).then_some(charset)
}
