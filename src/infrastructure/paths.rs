//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// Returns the OmniSearch data directory, `/host/.local/share/zellij/omnisearch`.
///
/// `/host` is the cwd of the last focused terminal (usually `$HOME`), so on the
/// host this is typically `~/.local/share/zellij/omnisearch`.
///
/// # Examples
///
/// ```
/// use omnisearch::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/omnisearch"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("omnisearch")
}

/// Recent-query history file.
#[must_use]
pub fn history_file() -> PathBuf {
    get_data_dir().join("history.json")
}

/// JSON-lines span export file.
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join("omnisearch-traces.jsonl")
}

/// Maps `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use omnisearch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
