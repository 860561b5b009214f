//! Application name derivation from the destination path.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Name used when nothing usable can be derived from the destination.
pub const DEFAULT_NAME: &str = "hello-world";

fn invalid_chars() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r"[^A-Za-z0-9.-]+").expect("invalid name pattern"))
}

/// Derives a package-safe application name from the last segment of `path`.
///
/// Runs of characters outside `[A-Za-z0-9.-]` collapse into a single `-`,
/// leading `-`, `_` and `.` and trailing `-` are stripped, and the result is
/// lowercased. Falls back to [`DEFAULT_NAME`] when nothing remains.
///
/// # Example
/// ```
/// use kiln::name::resolve_name;
///
/// assert_eq!(resolve_name("projects/My App!!"), "my-app");
/// ```
pub fn resolve_name<P: AsRef<Path>>(path: P) -> String {
    let segment = match path.as_ref().file_name() {
        Some(segment) => segment.to_string_lossy(),
        None => return DEFAULT_NAME.to_string(),
    };

    let replaced = invalid_chars().replace_all(&segment, "-");
    let name = replaced
        .trim_start_matches(['-', '_', '.'])
        .trim_end_matches('-')
        .to_lowercase();

    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    }
}
