//! Wiki knowledge retrieval
//!
//! # Error Handling Strategy
//!
//! Retrieval never fails. Each network call degrades on its own:
//!
//! - **Search failure**: logged and treated as an empty result set, which yields
//!   [`WikiContext::NoPagesFound`]
//! - **Page failure**: logged and recorded as a page without text; the other pages are
//!   still fetched and the page appears in the blob with a placeholder
//!
//! Calls are strictly sequential: the search completes before the first fetch, and pages
//! are fetched one after another.

use tracing::{debug, warn};

use super::client::WikiApi;
use super::html::{extract_main_text, normalize_page_text};
use crate::models::{WikiContext, WikiPageContent, WikiPageRef};

/// Number of search hits requested
pub const SEARCH_RESULT_LIMIT: usize = 3;
/// Number of hits whose content is fetched; the rest are listed as links only
pub const FETCH_PAGE_LIMIT: usize = 2;
/// Maximum characters of page text kept per fetched page
pub const MAX_PAGE_CHARS: usize = 4000;

const CONTEXT_HEADER: &str = "Relevant Arch Wiki content:";
const CONTENT_UNAVAILABLE: &str = "(Content could not be retrieved)";
const MORE_PAGES_HEADER: &str = "Additional relevant pages:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrievalLimits {
    pub search_results: usize,
    pub fetched_pages: usize,
    pub max_page_chars: usize,
}

impl Default for RetrievalLimits {
    fn default() -> Self {
        Self {
            search_results: SEARCH_RESULT_LIMIT,
            fetched_pages: FETCH_PAGE_LIMIT,
            max_page_chars: MAX_PAGE_CHARS,
        }
    }
}

pub struct WikiRetriever<W> {
    wiki: W,
    limits: RetrievalLimits,
}

impl<W: WikiApi> WikiRetriever<W> {
    pub fn new(wiki: W) -> Self {
        Self::with_limits(wiki, RetrievalLimits::default())
    }

    pub fn with_limits(wiki: W, limits: RetrievalLimits) -> Self {
        Self { wiki, limits }
    }

    pub fn limits(&self) -> RetrievalLimits {
        self.limits
    }

    /// Search the wiki for `query` and assemble the context blob for the prompt
    pub fn retrieve(&self, query: &str) -> WikiContext {
        let refs = match self.wiki.search(query, self.limits.search_results) {
            Ok(refs) => refs,
            Err(e) => {
                warn!("Wiki search failed: {}", e);
                Vec::new()
            }
        };

        if refs.is_empty() {
            debug!(query, "no wiki pages found");
            return WikiContext::NoPagesFound;
        }

        let split = self.limits.fetched_pages.min(refs.len());
        let (to_fetch, links_only) = refs.split_at(split);
        let pages: Vec<WikiPageContent> = to_fetch.iter().map(|r| self.fetch_page(r)).collect();

        WikiContext::Found(build_context_blob(&pages, links_only))
    }

    fn fetch_page(&self, page: &WikiPageRef) -> WikiPageContent {
        let text = match self.wiki.page_html(&page.title) {
            Ok(html) => {
                let raw = extract_main_text(&html);
                let text = normalize_page_text(&raw, &page.title, self.limits.max_page_chars);
                if text.is_empty() {
                    debug!(title = %page.title, "page has no extractable content");
                    None
                } else {
                    Some(text)
                }
            }
            Err(e) => {
                warn!("Failed to fetch wiki page '{}': {}", page.title, e);
                None
            }
        };

        WikiPageContent { title: page.title.clone(), url: page.url.clone(), text }
    }
}

/// Render fetched pages and link-only references into one context blob
pub fn build_context_blob(pages: &[WikiPageContent], links_only: &[WikiPageRef]) -> String {
    let mut blob = String::from(CONTEXT_HEADER);
    blob.push('\n');

    for page in pages {
        blob.push_str(&format!("\n### {}\n", page.title));
        blob.push_str(&format!("URL: {}\n", page.url));
        blob.push_str(page.text.as_deref().unwrap_or(CONTENT_UNAVAILABLE));
        blob.push('\n');
    }

    if !links_only.is_empty() {
        blob.push('\n');
        blob.push_str(MORE_PAGES_HEADER);
        blob.push('\n');
        for link in links_only {
            blob.push_str(&format!("- {}: {}\n", link.title, link.url));
        }
    }

    blob
}
