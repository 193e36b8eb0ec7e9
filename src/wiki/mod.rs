//! Arch Wiki retrieval: API client, HTML text extraction and context assembly

pub mod client;
pub mod html;
pub mod retriever;

pub use client::{ARCH_WIKI_URL, ArchWikiClient, WikiApi, WikiError};
pub use html::{extract_main_text, normalize_page_text};
pub use retriever::{RetrievalLimits, WikiRetriever, build_context_blob};
