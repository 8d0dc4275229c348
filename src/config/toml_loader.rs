//! TOML registry parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Deserialize a registry document from an in-memory string.
///
/// `file` names the document in error messages (a path, or `"built-in"`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if the text is not valid TOML or
/// does not match the schema of `T`.
pub fn parse<T: DeserializeOwned>(content: &str, file: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        file: file.to_string(),
        message: e.message().to_string(),
    })
}

/// Load and deserialize a registry document from disk.
///
/// Returns `Ok(None)` when `path` does not exist so callers can fall back to
/// a default document.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse(&content, &path.display().to_string()).map(Some)
}
