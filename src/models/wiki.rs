use std::fmt;

/// Text returned in place of a context blob when the search finds nothing
pub const NO_PAGES_FOUND: &str = "No specific Arch Wiki pages found for this query.";

/// A search hit, in the relevance order returned by the wiki
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPageRef {
    pub title: String,
    pub url: String,
}

/// A fetched page. `text` is `None` when the page could not be retrieved or had no content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPageContent {
    pub title: String,
    pub url: String,
    pub text: Option<String>,
}

/// Outcome of a retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiContext {
    /// The search returned no pages; no backend call should be made
    NoPagesFound,
    /// Assembled context blob for the prompt
    Found(String),
}

impl WikiContext {
    /// Text shown to the user or embedded into the prompt
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoPagesFound => NO_PAGES_FOUND,
            Self::Found(blob) => blob,
        }
    }
}

impl fmt::Display for WikiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
