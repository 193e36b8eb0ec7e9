use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

// Maximum size of a history file: 10MB
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Validates that a file's size is within acceptable limits (10MB)
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and subsequent file operations.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 10MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Display `path` with the home directory shown as `~`
///
/// Used when paths under `~/.config/archlinux-ai-cli` appear in warnings.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use archlinux_ai_cli::utils::format_path_with_tilde;
///
/// // "~/.config/archlinux-ai-cli/history.json" when HOME=/home/alice
/// let shown = format_path_with_tilde(Path::new("/home/alice/.config/archlinux-ai-cli/history.json"));
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    let home = env::var_os("HOME").map(PathBuf::from);
    tilde_relative(path, home.as_deref())
}

/// Only whole components are matched, so `/home/al` is not a prefix of `/home/alice`
pub(crate) fn tilde_relative(path: &Path, home: Option<&Path>) -> String {
    let rest = home
        .filter(|home| !home.as_os_str().is_empty())
        .and_then(|home| path.strip_prefix(home).ok());

    match rest {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}
