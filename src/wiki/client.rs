//! MediaWiki API access for the Arch Wiki
//!
//! Two endpoints of `api.php` are used:
//! - `action=opensearch` returns `[query, [titles], [descriptions], [urls]]`
//! - `action=parse&prop=text` returns `{"parse": {"text": {"*": "<html>"}}}`

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::html::CONTENT_CONTAINER_IDS;
use crate::models::WikiPageRef;

/// Root of the Arch Wiki, also used as the fallback link for users
pub const ARCH_WIKI_URL: &str = "https://wiki.archlinux.org";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("archlinux-ai-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("wiki request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("wiki returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected wiki response: {0}")]
    Malformed(String),
}

/// Access to a wiki's search and rendered-page endpoints
pub trait WikiApi {
    /// Search for `query`, returning at most `limit` hits in relevance order
    fn search(&self, query: &str, limit: usize) -> Result<Vec<WikiPageRef>, WikiError>;

    /// Fetch the rendered HTML body of the page named `title`
    fn page_html(&self, title: &str) -> Result<String, WikiError>;
}

impl<T: WikiApi + ?Sized> WikiApi for &T {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<WikiPageRef>, WikiError> {
        (**self).search(query, limit)
    }

    fn page_html(&self, title: &str) -> Result<String, WikiError> {
        (**self).page_html(title)
    }
}

/// Blocking client for a MediaWiki `api.php`. The HTTP connection pool is reused across calls.
#[derive(Debug, Clone)]
pub struct ArchWikiClient {
    client: Client,
    base_url: String,
}

impl ArchWikiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WikiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self) -> String {
        format!("{}/api.php", self.base_url)
    }

    fn get_json(&self, params: &[(&str, &str)], timeout: Duration) -> Result<Value, WikiError> {
        let response = self.client.get(self.api_url()).query(params).timeout(timeout).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status(status));
        }
        Ok(response.json()?)
    }
}

impl WikiApi for ArchWikiClient {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<WikiPageRef>, WikiError> {
        let limit = limit.to_string();
        let params = [
            ("action", "opensearch"),
            ("search", query),
            ("limit", limit.as_str()),
            ("format", "json"),
        ];
        debug!(query, "searching wiki");
        let body = self.get_json(&params, SEARCH_TIMEOUT)?;
        parse_opensearch(&body)
    }

    fn page_html(&self, title: &str) -> Result<String, WikiError> {
        let params = [
            ("action", "parse"),
            ("page", title),
            ("prop", "text"),
            ("disableeditsection", "1"),
            ("format", "json"),
        ];
        debug!(title, "fetching wiki page");
        let body = self.get_json(&params, PAGE_TIMEOUT)?;
        parse_page_html(&body)
    }
}

/// Parse an opensearch response: titles at index 1, URLs at index 3
pub fn parse_opensearch(body: &Value) -> Result<Vec<WikiPageRef>, WikiError> {
    let string_list = |index: usize| -> Result<Vec<String>, WikiError> {
        let list = body
            .get(index)
            .and_then(Value::as_array)
            .ok_or_else(|| WikiError::Malformed(format!("opensearch element {index} missing")))?;
        Ok(list.iter().filter_map(Value::as_str).map(str::to_string).collect())
    };

    let titles = string_list(1)?;
    let urls = string_list(3)?;

    Ok(titles.into_iter().zip(urls).map(|(title, url)| WikiPageRef { title, url }).collect())
}

/// Pull the rendered HTML out of a `parse` response
///
/// The API returns only the parser output, without the skin's content wrapper, so the
/// fragment is placed back inside a `mw-content-text` container.
pub fn parse_page_html(body: &Value) -> Result<String, WikiError> {
    if let Some(error) = body.get("error") {
        let info = error.get("info").and_then(Value::as_str).unwrap_or("unknown error");
        return Err(WikiError::Malformed(info.to_string()));
    }

    body.pointer("/parse/text/*")
        .and_then(Value::as_str)
        .map(|fragment| format!(r#"<div id="{}">{}</div>"#, CONTENT_CONTAINER_IDS[0], fragment))
        .ok_or_else(|| WikiError::Malformed("parse.text missing".to_string()))
}
