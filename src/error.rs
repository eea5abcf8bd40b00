//! Error types for pockyll.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by remote bookmark-service operations and prompts.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for pockyll operations.
#[derive(Debug, Error)]
pub enum PockyllError {
    /// Configuration file missing or unreadable.
    #[error(
        "could not open the configuration file {path}: {source}. Are you in the \
         correct directory and/or did you run `pockyll init` prior to the \
         current command?"
    )]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file present but not a valid document.
    #[error("could not parse the configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Required credential fields absent from the configuration.
    #[error("incomplete configuration: please provide {} in the configuration file", missing.join(" and "))]
    IncompleteConfig { missing: Vec<&'static str> },

    /// Sync attempted without a stored access token.
    #[error("please authenticate the app before syncing (run `pockyll auth`)")]
    AuthRequired,

    /// Configured post/draft directory does not exist.
    #[error(
        "the linkpost destination path {path} does not exist; please \
         double-check spelling and create the destination path if applicable"
    )]
    MissingDestination { path: PathBuf },

    /// Remote API call failed.
    #[error("bookmark service error: {0}")]
    Api(SourceError),

    /// Browser launch or confirmation read failed.
    #[error("authentication prompt failed: {0}")]
    Prompt(SourceError),

    /// Standard IO error (automatically converted via #[from]).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PockyllError {
    /// Check if this error points at a missing or broken configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PockyllError::Config { .. }
                | PockyllError::ConfigParse { .. }
                | PockyllError::IncompleteConfig { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let error: PockyllError = io_error.into();

        assert!(matches!(error, PockyllError::Io(_)));
        assert!(error.to_string().contains("IO error"));
    }

    #[test]
    fn test_config_error_mentions_init() {
        let error = PockyllError::Config {
            path: PathBuf::from("_pockyll.yml"),
            source: IoError::new(ErrorKind::NotFound, "no such file"),
        };
        assert!(error.to_string().contains("pockyll init"));
        assert!(error.to_string().contains("_pockyll.yml"));
        assert!(error.is_config_error());
    }

    #[test]
    fn test_incomplete_config_names_missing_fields() {
        let error = PockyllError::IncompleteConfig {
            missing: vec!["consumer_key", "redirect_uri"],
        };
        let msg = error.to_string();
        assert!(msg.contains("consumer_key"));
        assert!(msg.contains("redirect_uri"));
        assert!(error.is_config_error());
    }

    #[test]
    fn test_auth_required_is_not_a_config_error() {
        let error = PockyllError::AuthRequired;
        assert!(error.to_string().contains("authenticate"));
        assert!(!error.is_config_error());
    }

    #[test]
    fn test_missing_destination_names_path() {
        let error = PockyllError::MissingDestination {
            path: PathBuf::from("_posts/linkposts"),
        };
        assert!(error.to_string().contains("_posts/linkposts"));
    }
}
