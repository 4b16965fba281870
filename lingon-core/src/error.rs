//! Error types for Lingon operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, importing or formatting translations.
///
/// Missing translations are never reported through this type; they resolve
/// to the lookup key instead.
#[derive(Debug, Error)]
pub enum LingonError {
    /// Invalid locale string
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Reading a file or directory failed
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A translation file is not valid JSON
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Copying bundled translation files failed
    #[error("Failed to import bundled languages: {0}")]
    Bootstrap(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed message pattern or incompatible argument
    #[error("Format error: {0}")]
    Format(String),

    /// IO error without path context
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error without path context
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LingonError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to a JSON parse error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = LingonError::io(
            "/srv/app/languages/en_US",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/srv/app/languages/en_US"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_parse_error_mentions_path() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LingonError::parse("en_US/common.json", source);
        assert!(err.to_string().starts_with("Failed to parse en_US/common.json"));
    }
}
