//! Data models for wiki retrieval and the answer history.
//!
//! - [`WikiPageRef`] - A search hit (title + URL)
//! - [`WikiPageContent`] - A fetched page with its normalized, bounded text
//! - [`WikiContext`] - Result of retrieval: either no pages or an assembled context blob
//! - [`HistoryEntry`] - One answered query persisted to the history log

pub mod history;
pub mod wiki;

pub use history::HistoryEntry;
pub use wiki::{NO_PAGES_FOUND, WikiContext, WikiPageContent, WikiPageRef};
