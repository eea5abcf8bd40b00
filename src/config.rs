//! YAML-backed configuration document.
//!
//! One document per project directory, round-tripped on every run. The path is
//! always passed in explicitly so the workflow stays testable against scratch
//! directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::PockyllError;

/// Conventional file name in the project directory.
pub const CONFIG_FILE_NAME: &str = "_pockyll.yml";

fn default_sync_tags() -> Vec<String> {
    vec!["blog".to_string()]
}

fn default_post_dir() -> PathBuf {
    PathBuf::from("_posts/linkposts")
}

fn default_draft_dir() -> PathBuf {
    PathBuf::from("_drafts/linkposts")
}

/// The persisted configuration document.
///
/// Optional fields deserialize as `None` when hand-edited out of the file, and
/// the directory/tag fields fall back to their documented defaults, so a
/// manually trimmed document keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Credential identifying the application to the bookmark service.
    pub consumer_key: Option<String>,
    /// Redirect URI registered with the bookmark service.
    pub redirect_uri: Option<String>,
    /// Present once the interactive authentication flow has succeeded.
    pub access_token: Option<String>,
    /// Only bookmarks carrying these tags are fetched.
    #[serde(default = "default_sync_tags")]
    pub sync_tags: Vec<String>,
    /// Cursor marking the last successful sync point; `None` fetches everything.
    pub since: Option<u64>,
    /// Destination for finished linkposts.
    #[serde(default = "default_post_dir")]
    pub post_dir: PathBuf,
    /// Destination for linkposts whose source record had no title.
    #[serde(default = "default_draft_dir")]
    pub draft_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            consumer_key: None,
            redirect_uri: None,
            access_token: None,
            sync_tags: default_sync_tags(),
            since: None,
            post_dir: default_post_dir(),
            draft_dir: default_draft_dir(),
        }
    }
}

impl Config {
    /// Write a document with default values to `path`, overwriting any
    /// existing file, and return it.
    pub fn create_default(path: &Path) -> Result<Config, PockyllError> {
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Config, PockyllError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = ?e, path = %path.display(), "failed to read config file");
                return Err(PockyllError::Config {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        let config: Config = match serde_yaml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                error!(error = ?e, path = %path.display(), "failed to parse config YAML");
                return Err(PockyllError::ConfigParse {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Serialize the document and overwrite the file at `path`.
    pub fn save(&self, path: &Path) -> Result<(), PockyllError> {
        let raw = serde_yaml::to_string(self).map_err(|e| PockyllError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, raw)?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }
}
