//! Runtime configuration: API key, model, wiki location

pub mod credentials;

use std::env;

pub use credentials::{
    API_KEY_ENV, ApiKeySource, MISSING_API_KEY_MESSAGE, ResolvedApiKey, resolve_api_key,
};

use crate::assistant::DEFAULT_MODEL;
use crate::wiki::ARCH_WIKI_URL;

pub const MODEL_ENV: &str = "GOOGLE_AI_MODEL";
pub const WIKI_URL_ENV: &str = "ARCH_WIKI_URL";

/// Model name: `--model` flag, then `GOOGLE_AI_MODEL`, then [`DEFAULT_MODEL`]
pub fn resolve_model(flag: Option<&str>) -> String {
    first_non_blank([flag.map(str::to_string), env::var(MODEL_ENV).ok()])
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Wiki root: `ARCH_WIKI_URL`, then [`ARCH_WIKI_URL`]
pub fn resolve_wiki_url() -> String {
    first_non_blank([env::var(WIKI_URL_ENV).ok()])
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| ARCH_WIKI_URL.to_string())
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().map(|v| v.trim().to_string()).find(|v| !v.is_empty())
}
