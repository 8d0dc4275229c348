//! Destination folder expansion.
//!
//! Folder strings in the registry may start with `~` and reference
//! environment variables (`$APPDATA`, `${LOCALAPPDATA}`). A folder that
//! references an unset variable resolves to the empty path: it never exists,
//! so every target installing into it is skipped with a warning instead of
//! landing somewhere relative to the working directory.
use std::path::PathBuf;

/// Expand `raw` against the real home directory and process environment.
#[must_use]
pub fn resolve(raw: &str) -> PathBuf {
    resolve_with(
        raw,
        || dirs::home_dir().map(|home| home.to_string_lossy().into_owned()),
        |var| std::env::var(var).ok(),
    )
}

/// Expand `raw` with an injected home directory and variable lookup.
///
/// `lookup` returns `None` for an unset variable, which makes the whole
/// folder resolve to the empty path.
pub fn resolve_with<H, L>(raw: &str, home: H, mut lookup: L) -> PathBuf
where
    H: FnOnce() -> Option<String>,
    L: FnMut(&str) -> Option<String>,
{
    shellexpand::full_with_context(raw, home, |var: &str| {
        lookup(var).map(Some).ok_or(UnsetVariable)
    })
    .map_or_else(|_| PathBuf::new(), |expanded| PathBuf::from(expanded.into_owned()))
}

/// Marker error for a variable that has no value.
#[derive(Debug)]
struct UnsetVariable;
