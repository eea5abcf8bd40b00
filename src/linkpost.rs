//! Turning one bookmark record into a linkpost file.
//!
//! The file format is fixed; downstream static-site tooling matches on it.
//! Writes are create-only: an existing file is never rewritten.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use tracing::info;

use crate::error::PockyllError;

/// Title rendered for records the service could not resolve a title for.
pub const DRAFT_TITLE: &str = "FIXME";

/// Where a record lands, decided by title completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Post,
    Draft,
}

/// A record with an empty or absent title still gets written, just as a draft.
pub fn classify(title: Option<&str>) -> Kind {
    match title {
        Some(title) if !title.is_empty() => Kind::Post,
        _ => Kind::Draft,
    }
}

/// Deterministic filename: `<date>-<id>.markdown`.
pub fn file_name(timestamp: &DateTime<FixedOffset>, id: &str) -> String {
    format!("{}-{}.markdown", timestamp.format("%Y-%m-%d"), id)
}

/// Render the fixed linkpost template.
pub fn render(title: &str, url: &str, timestamp: &DateTime<FixedOffset>) -> String {
    format!(
        "---\n\
         title: '{title}'\n\
         date: {date}\n\
         type: 'reference'\n\
         ref: {url}\n\
         ---\n\
         \n\
         [{title}]({url})\n",
        date = timestamp.format("%Y-%m-%dT%H:%M:%S%z"),
    )
}

/// Write the linkpost for one record into `dir`.
///
/// Returns `Ok(true)` if the file was written, `Ok(false)` if a file with the
/// same name already exists (the record is skipped, not overwritten). A missing
/// destination directory is fatal: the contract does not auto-create it.
pub fn write(
    dir: &Path,
    id: &str,
    title: &str,
    url: &str,
    timestamp: &DateTime<FixedOffset>,
) -> Result<bool, PockyllError> {
    if !dir.is_dir() {
        return Err(PockyllError::MissingDestination {
            path: dir.to_path_buf(),
        });
    }
    let path = dir.join(file_name(timestamp, id));
    // create_new keeps the write create-only even if something else made the
    // file between the directory check and here.
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => {
            file.write_all(render(title, url, timestamp).as_bytes())?;
            info!(path = %path.display(), "wrote linkpost");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            info!(path = %path.display(), "linkpost already exists, skipping");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
