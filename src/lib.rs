//! Arch Linux AI CLI - Answer Arch Linux questions from the Arch Wiki
//!
//! Each query runs a short, sequential pipeline:
//!
//! - Search the Arch Wiki and take the top hits
//! - Fetch and extract the main text of the first pages, bounded in length
//! - Assemble a context blob (titles, URLs, content, extra links)
//! - Send one prompt with that context to a generative model and return its answer
//!
//! Answers are appended to a bounded JSON history log in `~/.config/archlinux-ai-cli/`.
//!
//! # Example
//!
//! ```no_run
//! use archlinux_ai_cli::assistant::{Assistant, GeminiClient};
//! use archlinux_ai_cli::wiki::{ARCH_WIKI_URL, ArchWikiClient, WikiRetriever};
//!
//! let retriever = WikiRetriever::new(ArchWikiClient::new(ARCH_WIKI_URL)?);
//! let generator = GeminiClient::new("api-key", "gemini-2.0-flash")?;
//! let assistant = Assistant::new(retriever, generator, ARCH_WIKI_URL);
//! println!("{}", assistant.ask("How do I update my system?"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod assistant;
pub mod cli;
pub mod config;
pub mod history;
pub mod models;
pub mod utils;
pub mod wiki;

#[cfg(test)]
mod test_server;

// Re-export commonly used types
pub use assistant::{Assistant, compose_and_answer};
pub use history::HistoryStore;
pub use models::{HistoryEntry, WikiContext, WikiPageContent, WikiPageRef};
pub use wiki::{WikiRetriever, extract_main_text};
