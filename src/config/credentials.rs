//! API key resolution
//!
//! Sources are tried in order: `--api-key` flag, `GOOGLE_AI_API_KEY`, then the
//! `api_key` file in the config directory. The first non-blank value wins.

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

pub const API_KEY_ENV: &str = "GOOGLE_AI_API_KEY";
pub const API_KEY_FILENAME: &str = "api_key";

/// Printed when no source yields a key
pub const MISSING_API_KEY_MESSAGE: &str = "\
Error: No API key provided!

Set your Google AI Studio API key using one of these methods:
  1. Use the --api-key flag
  2. export GOOGLE_AI_API_KEY='your-key'
  3. Create ~/.config/archlinux-ai-cli/api_key containing the key

Get a free API key at: https://aistudio.google.com/app/apikey";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Environment,
    ConfigFile,
}

impl fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flag => "--api-key flag",
            Self::Environment => API_KEY_ENV,
            Self::ConfigFile => "config file",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApiKey {
    pub key: String,
    pub source: ApiKeySource,
}

type Resolver<'a> = Box<dyn Fn() -> Option<String> + 'a>;

/// Resolve the API key from the flag, the environment and `config_dir/api_key`
pub fn resolve_api_key(flag: Option<&str>, config_dir: Option<&Path>) -> Option<ResolvedApiKey> {
    resolve_api_key_from(flag, env::var(API_KEY_ENV).ok(), config_dir)
}

/// Same as [`resolve_api_key`] with the environment value passed in (for testing)
pub(crate) fn resolve_api_key_from(
    flag: Option<&str>,
    env_value: Option<String>,
    config_dir: Option<&Path>,
) -> Option<ResolvedApiKey> {
    let resolvers: [(ApiKeySource, Resolver<'_>); 3] = [
        (ApiKeySource::Flag, Box::new(move || flag.map(str::to_string))),
        (ApiKeySource::Environment, Box::new(move || env_value.clone())),
        (ApiKeySource::ConfigFile, Box::new(move || config_dir.and_then(read_key_file))),
    ];

    resolvers.into_iter().find_map(|(source, resolve)| {
        let key = non_blank(resolve()?)?;
        debug!(%source, "resolved API key");
        Some(ResolvedApiKey { key, source })
    })
}

fn read_key_file(config_dir: &Path) -> Option<String> {
    let path = config_dir.join(API_KEY_FILENAME);
    match fs::read_to_string(&path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            debug!("No API key file at {}: {}", path.display(), e);
            None
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
