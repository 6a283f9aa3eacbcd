//! Error types for the storefront navigation core.
//!
//! Library crates use [`StorefrontError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all storefront operations.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// JSON or TOML input could not be decoded.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Input is structurally present but missing a required field
    /// (a menu item without `url` or `type`, a menu without `items`).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A URL that should be absolute could not be parsed.
    #[error("unparseable URL '{url}': {source}")]
    UnparseableUrl {
        url: String,
        source: url::ParseError,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StorefrontError>;

impl StorefrontError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create an invalid-input error from any displayable message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Wrap a `url::ParseError` with the offending input.
    pub fn unparseable_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::UnparseableUrl {
            url: url.into(),
            source,
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = StorefrontError::config("missing store domain");
        assert_eq!(err.to_string(), "config error: missing store domain");

        let err = StorefrontError::invalid_input("menu item has no url");
        assert!(err.to_string().contains("menu item has no url"));
    }

    #[test]
    fn unparseable_url_names_the_input() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = StorefrontError::unparseable_url("not a url", source);
        assert!(err.to_string().starts_with("unparseable URL 'not a url'"));
    }
}
