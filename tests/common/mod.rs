//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use archlinux_ai_cli::assistant::{BackendError, TextGenerator};
use archlinux_ai_cli::models::{HistoryEntry, WikiPageRef};
use archlinux_ai_cli::wiki::{WikiApi, WikiError};
use reqwest::StatusCode;
use tempfile::TempDir;

pub const WIKI_URL: &str = "https://wiki.archlinux.org";

/// Wrap `body` in a page whose content container is `mw-content-text`
pub fn wiki_page_html(body: &str) -> String {
    format!(
        r#"<html><head><title>Page</title><script>var x = 1;</script></head>
<body><nav>Navigation menu</nav><div id="mw-content-text">{}</div><footer>Footer links</footer></body></html>"#,
        body
    )
}

pub fn page_ref(title: &str) -> WikiPageRef {
    WikiPageRef {
        title: title.to_string(),
        url: format!("{}/title/{}", WIKI_URL, title.replace(' ', "_")),
    }
}

/// In-memory wiki with call counters
#[derive(Default)]
pub struct FakeWiki {
    results: Vec<WikiPageRef>,
    pages: HashMap<String, String>,
    search_fails: bool,
    pub search_calls: Cell<usize>,
    pub fetched: RefCell<Vec<String>>,
}

impl FakeWiki {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search hit whose page fetch succeeds with `body` inside the content container
    pub fn with_page(mut self, title: &str, body: &str) -> Self {
        self.results.push(page_ref(title));
        self.pages.insert(title.to_string(), wiki_page_html(body));
        self
    }

    /// Add a search hit whose page returns `html` verbatim
    pub fn with_raw_page(mut self, title: &str, html: &str) -> Self {
        self.results.push(page_ref(title));
        self.pages.insert(title.to_string(), html.to_string());
        self
    }

    /// Add a search hit whose page fetch fails
    pub fn with_broken_page(mut self, title: &str) -> Self {
        self.results.push(page_ref(title));
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.search_fails = true;
        self
    }
}

impl WikiApi for FakeWiki {
    fn search(&self, _query: &str, limit: usize) -> Result<Vec<WikiPageRef>, WikiError> {
        self.search_calls.set(self.search_calls.get() + 1);
        if self.search_fails {
            return Err(WikiError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self.results.iter().take(limit).cloned().collect())
    }

    fn page_html(&self, title: &str) -> Result<String, WikiError> {
        self.fetched.borrow_mut().push(title.to_string());
        self.pages
            .get(title)
            .cloned()
            .ok_or_else(|| WikiError::Malformed(format!("connection reset fetching {title}")))
    }
}

/// Generator that records prompts and returns a canned reply
pub struct FakeGenerator {
    reply: Option<String>,
    pub calls: Cell<usize>,
    pub prompts: RefCell<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Some(reply.to_string()), calls: Cell::new(0), prompts: RefCell::new(Vec::new()) }
    }

    /// Every call fails with HTTP 429
    pub fn failing() -> Self {
        Self { reply: None, calls: Cell::new(0), prompts: RefCell::new(Vec::new()) }
    }
}

impl TextGenerator for FakeGenerator {
    fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.calls.set(self.calls.get() + 1);
        self.prompts.borrow_mut().push(prompt.to_string());
        self.reply.clone().ok_or_else(|| BackendError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "Resource has been exhausted (e.g. check quota).".to_string(),
        })
    }
}

/// Builder for a temporary HOME with an `archlinux-ai-cli` config directory
pub struct HomeDirBuilder {
    temp_dir: TempDir,
}

impl HomeDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Path to use as HOME
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().join(".config").join("archlinux-ai-cli")
    }

    pub fn with_api_key_file(self, key: &str) -> Self {
        fs::create_dir_all(self.config_dir()).expect("Failed to create config dir");
        fs::write(self.config_dir().join("api_key"), key).expect("Failed to write api_key");
        self
    }

    pub fn with_history(self, entries: &[HistoryEntry]) -> Self {
        let json = serde_json::to_string_pretty(entries).expect("Failed to serialize history");
        self.with_history_content(&json)
    }

    pub fn with_history_content(self, content: &str) -> Self {
        fs::create_dir_all(self.config_dir()).expect("Failed to create config dir");
        fs::write(self.config_dir().join("history.json"), content)
            .expect("Failed to write history.json");
        self
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for HomeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn history_entry(n: usize) -> HistoryEntry {
    HistoryEntry::now(format!("question {n}"), format!("answer {n}"))
}
