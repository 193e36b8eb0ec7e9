//! Persistent log of answered queries
//!
//! Stored as a pretty-printed JSON array in `~/.config/archlinux-ai-cli/history.json`,
//! bounded to the newest [`MAX_HISTORY_ENTRIES`] entries.

pub mod store;

pub use store::{HISTORY_FILENAME, HistoryStore, MAX_HISTORY_ENTRIES, push_bounded};
