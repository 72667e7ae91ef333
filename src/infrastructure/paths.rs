//! Sandbox path helpers.

use std::path::{Path, PathBuf};

/// Mount point of the host filesystem inside the plugin sandbox.
const HOST_ROOT: &str = "/host";

/// Returns the plugin data directory, `/host/.local/share/zellij/pantry`.
///
/// `/host` is the cwd of the last focused terminal, which is usually the
/// user's home directory, so this typically lands in
/// `~/.local/share/zellij/pantry`. The JSON store and the trace file live
/// here.
///
/// # Examples
///
/// ```
/// use pantry::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/pantry"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    Path::new(HOST_ROOT).join(".local/share/zellij").join("pantry")
}

/// Maps `~` and `~/...` onto `/host`; every other path is returned as is.
///
/// # Examples
///
/// ```
/// use pantry::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("~/pantry.json"), PathBuf::from("/host/pantry.json"));
/// assert_eq!(expand_tilde("~"), PathBuf::from("/host"));
/// assert_eq!(expand_tilde("/data/pantry.json"), PathBuf::from("/data/pantry.json"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from(HOST_ROOT),
        Some(rest) if rest.starts_with('/') => PathBuf::from(format!("{HOST_ROOT}{rest}")),
        _ => PathBuf::from(path),
    }
}

/// Renders a sandbox path the way the user sees it on the host (`~/...`).
///
/// # Examples
///
/// ```
/// use pantry::infrastructure::strip_host_prefix;
/// use std::path::Path;
///
/// assert_eq!(strip_host_prefix(Path::new("/host/.local/pantry.json")), "~/.local/pantry.json");
/// assert_eq!(strip_host_prefix(Path::new("/tmp/pantry.json")), "/tmp/pantry.json");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &Path) -> String {
    path.strip_prefix(HOST_ROOT).map_or_else(
        |_| path.display().to_string(),
        |rest| {
            if rest.as_os_str().is_empty() {
                "~".to_string()
            } else {
                format!("~/{}", rest.display())
            }
        },
    )
}
