//! Domain-specific error types for the grocery store.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`GroceryError`]) while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! - [`ConfigError`]: registry loading, glob compilation
//! - [`GroceryError`]: fail-fast preconditions of a run
//!
//! Per-target failures (one symlink, one copy) are deliberately absent: they
//! are recorded as [`TargetOutcome::Failed`](crate::engine::TargetOutcome)
//! values and only ever logged.

use thiserror::Error;

/// Errors that arise from loading the collection registry.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The registry document contains a syntax or schema error.
    #[error("Invalid registry {file}: {message}")]
    InvalidSyntax {
        /// Name of the registry document.
        file: String,
        /// Parser message.
        message: String,
    },

    /// A matcher or ignore pattern is not a valid glob.
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob compilation error.
        source: globset::Error,
    },

    /// A matcher pattern is absolute; patterns are always relative to the
    /// collection root.
    #[error("Matcher pattern must be relative to its collection: '{pattern}'")]
    AbsolutePattern {
        /// The offending pattern.
        pattern: String,
    },

    /// An I/O error occurred while reading the registry file.
    #[error("IO error reading registry file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Fail-fast preconditions; raised before any file is touched.
#[derive(Error, Debug)]
pub enum GroceryError {
    /// Override mode was requested without elevated privileges.
    #[error(
        "Override mode requires administrator permission (collection '{collection}' was not touched)"
    )]
    ElevationRequired {
        /// Source path of the collection that was refused.
        collection: String,
    },

    /// The paste command received no source name, even after prompting.
    #[error("No source file provided, operation cancelled")]
    NoSourceProvided,

    /// No collection contains a grocery with the requested name.
    #[error("Source file not found in any grocery collection: {name}")]
    SourceNotFound {
        /// The bare name that was searched for.
        name: String,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn invalid_syntax_display() {
        let e = ConfigError::InvalidSyntax {
            file: "grocery.toml".to_string(),
            message: "unexpected token".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid registry grocery.toml: unexpected token"
        );
    }

    #[test]
    fn invalid_pattern_display_and_source() {
        use std::error::Error as StdError;
        let source = globset::Glob::new("a/{b").expect_err("unclosed brace must fail");
        let e = ConfigError::InvalidPattern {
            pattern: "a/{b".to_string(),
            source,
        };
        assert!(e.to_string().contains("'a/{b'"));
        assert!(e.source().is_some());
    }

    #[test]
    fn absolute_pattern_display() {
        let e = ConfigError::AbsolutePattern {
            pattern: "/etc/*".to_string(),
        };
        assert!(e.to_string().contains("'/etc/*'"));
    }

    #[test]
    fn io_display() {
        let e = ConfigError::Io {
            path: "/store/grocery.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/store/grocery.toml"));
    }

    #[test]
    fn elevation_required_names_collection() {
        let e = GroceryError::ElevationRequired {
            collection: "grocery-store/personal/preferences".to_string(),
        };
        assert!(e.to_string().contains("administrator permission"));
        assert!(e.to_string().contains("personal/preferences"));
    }

    #[test]
    fn source_not_found_display() {
        let e = GroceryError::SourceNotFound {
            name: ".gitconfig".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Source file not found in any grocery collection: .gitconfig"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<GroceryError>();
    }

    #[test]
    fn grocery_error_converts_to_anyhow() {
        let e = GroceryError::NoSourceProvided;
        let anyhow_err: anyhow::Error = e.into();
        assert!(anyhow_err.downcast_ref::<GroceryError>().is_some());
    }
}
