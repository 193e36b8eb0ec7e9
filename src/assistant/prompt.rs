//! Prompt assembly and the single backend call per query

use tracing::warn;

use super::gemini::TextGenerator;
use crate::models::WikiContext;

/// Instructions placed before the wiki context in every prompt
pub const SYSTEM_PREAMBLE: &str = "\
You are an expert Arch Linux assistant. Answer the user's question using ONLY the Arch Wiki content provided below.

Rules:
1. Base every statement on the supplied wiki content. Do not rely on outside knowledge.
2. Cite the titles of the wiki pages you used.
3. Warn clearly before any potentially destructive operation (rm -rf, dd, partitioning, filesystem changes, forced package removal).
4. Explain what each suggested command does before the user runs it.
5. If the supplied content does not answer the question, say so plainly and point the user to the relevant wiki pages instead of guessing.";

/// Build the full prompt: preamble, wiki context, then the user's question
pub fn compose_prompt(query: &str, context: &str) -> String {
    format!(
        "{SYSTEM_PREAMBLE}\n\nWiki Context:\n{context}\n\nUser Question: {query}\n\n\
         Provide a helpful, accurate answer with the relevant commands explained and the wiki pages cited."
    )
}

/// Answer `query` from `context` with one backend call
///
/// [`WikiContext::NoPagesFound`] is returned as-is without calling the backend. A backend
/// failure becomes a message pointing the user at `wiki_url`; it is never retried.
pub fn compose_and_answer<G: TextGenerator>(
    generator: &G,
    query: &str,
    context: &WikiContext,
    wiki_url: &str,
) -> String {
    let blob = match context {
        WikiContext::NoPagesFound => return context.as_str().to_string(),
        WikiContext::Found(blob) => blob,
    };

    match generator.generate(&compose_prompt(query, blob)) {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Generative backend failed: {}", e);
            backend_failure_message(&e.to_string(), wiki_url)
        }
    }
}

/// Fallback answer when the backend call fails
pub fn backend_failure_message(detail: &str, wiki_url: &str) -> String {
    format!(
        "Error getting AI response: {detail}\n\nPlease consult the Arch Wiki directly: {wiki_url}"
    )
}
