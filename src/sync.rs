//! The sync pass: one fetch, one linkpost per usable record, cursor advance.

use std::path::Path;

use chrono::Local;
use tracing::{info, warn};

use crate::client::{BookmarkSource, ListQuery};
use crate::config::Config;
use crate::error::PockyllError;
use crate::linkpost::{self, Kind};

/// Counters for one sync pass.
///
/// `skipped` covers both records missing mandatory fields and filename
/// collisions; neither touches an existing file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub posts: usize,
    pub drafts: usize,
    pub skipped: usize,
}

impl SyncReport {
    /// Zero fetched records: success, but nothing to do.
    pub fn is_empty(&self) -> bool {
        self.fetched == 0
    }
}

/// Run one sync pass against `source`, writing linkposts into the directories
/// named by `config` and persisting the advanced cursor to `config_path`.
///
/// The cursor is only advanced after the fetch succeeded in full, and only to
/// the value the service returned alongside the list.
pub fn run(
    config_path: &Path,
    config: &mut Config,
    source: &dyn BookmarkSource,
) -> Result<SyncReport, PockyllError> {
    let access_token = config
        .access_token
        .clone()
        .ok_or(PockyllError::AuthRequired)?;
    let consumer_key = config
        .consumer_key
        .clone()
        .ok_or_else(|| PockyllError::IncompleteConfig {
            missing: vec!["consumer_key"],
        })?;

    info!(since = ?config.since, tags = ?config.sync_tags, "requesting new items");
    let response = source
        .list(ListQuery {
            consumer_key,
            access_token,
            tags: config.sync_tags.clone(),
            since: config.since,
        })
        .map_err(PockyllError::Api)?;

    if response.bookmarks.is_empty() {
        info!("no new bookmarks");
        return Ok(SyncReport::default());
    }

    let mut report = SyncReport {
        fetched: response.bookmarks.len(),
        ..SyncReport::default()
    };
    info!(count = report.fetched, "syncing items");

    for bookmark in &response.bookmarks {
        let (id, url) = match (&bookmark.id, &bookmark.url) {
            (Some(id), Some(url)) => (id.as_str(), url.as_str()),
            _ => {
                warn!(
                    id = ?bookmark.id,
                    url = ?bookmark.url,
                    title = ?bookmark.title,
                    "skipping bookmark with missing mandatory fields"
                );
                report.skipped += 1;
                continue;
            }
        };

        // The service can omit the added time; the original tool invented
        // "now" in that case. Preserved, but flagged in the log because it can
        // misorder posts.
        let timestamp = match bookmark.added_at {
            Some(timestamp) => timestamp,
            None => {
                warn!(id = %id, "bookmark has no added time, falling back to the current time");
                Local::now().fixed_offset()
            }
        };

        let kind = linkpost::classify(bookmark.title.as_deref());
        let (dir, title) = match (kind, bookmark.title.as_deref()) {
            (Kind::Post, Some(title)) => (config.post_dir.as_path(), title),
            _ => (config.draft_dir.as_path(), linkpost::DRAFT_TITLE),
        };

        if linkpost::write(dir, id, title, url, &timestamp)? {
            match kind {
                Kind::Post => report.posts += 1,
                Kind::Draft => report.drafts += 1,
            }
        } else {
            report.skipped += 1;
        }
    }

    match response.since {
        Some(since) => {
            config.since = Some(since);
            config.save(config_path)?;
            info!(since, "cursor advanced");
        }
        None => {
            warn!("response carried no cursor; leaving the stored cursor untouched");
        }
    }

    info!(
        fetched = report.fetched,
        posts = report.posts,
        drafts = report.drafts,
        skipped = report.skipped,
        "sync pass complete"
    );
    Ok(report)
}
