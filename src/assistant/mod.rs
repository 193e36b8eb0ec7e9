//! Prompt composition and the generative backend
//!
//! [`Assistant`] ties a [`WikiRetriever`] to a [`TextGenerator`]: one query produces one
//! retrieval followed by at most one backend call.

pub mod gemini;
pub mod prompt;

pub use gemini::{BackendError, DEFAULT_MODEL, GeminiClient, TextGenerator};
pub use prompt::{compose_and_answer, compose_prompt};

use crate::models::WikiContext;
use crate::wiki::{WikiApi, WikiRetriever};

pub struct Assistant<W, G> {
    retriever: WikiRetriever<W>,
    generator: G,
    wiki_url: String,
}

impl<W: WikiApi, G: TextGenerator> Assistant<W, G> {
    /// `wiki_url` is the link offered to the user when the backend fails
    pub fn new(retriever: WikiRetriever<W>, generator: G, wiki_url: impl Into<String>) -> Self {
        Self { retriever, generator, wiki_url: wiki_url.into() }
    }

    pub fn retrieve(&self, query: &str) -> WikiContext {
        self.retriever.retrieve(query)
    }

    pub fn answer(&self, query: &str, context: &WikiContext) -> String {
        compose_and_answer(&self.generator, query, context, &self.wiki_url)
    }

    /// Retrieve context for `query` and answer it
    pub fn ask(&self, query: &str) -> String {
        let context = self.retrieve(query);
        self.answer(query, &context)
    }
}
