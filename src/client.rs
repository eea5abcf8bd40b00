//! Bookmark-service client: the capability trait the workflows depend on, plus
//! the concrete Pocket v3 implementation.
//!
//! The trait is annotated for `mockall` so consumers can generate deterministic
//! mocks for unit/integration tests, mirroring how the real client is used.

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::SourceError;

const POCKET_BASE_URL: &str = "https://getpocket.com";

/// One bookmark record as returned by the remote service.
///
/// Everything is optional at this layer; the sync pass decides what a missing
/// field means (mandatory, draft classification, timestamp fallback).
#[derive(Debug, Clone, Default)]
pub struct Bookmark {
    pub id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub added_at: Option<DateTime<FixedOffset>>,
}

/// Result of one list call: the fetched records plus the cursor to resume from.
#[derive(Debug, Clone, Default)]
pub struct ListResponse {
    pub bookmarks: Vec<Bookmark>,
    pub since: Option<u64>,
}

/// Query parameters for one list call.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub consumer_key: String,
    pub access_token: String,
    pub tags: Vec<String>,
    pub since: Option<u64>,
}

/// Trait for the four remote operations the tool needs.
/// Implemented by the real Pocket client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait BookmarkSource: Send + Sync {
    /// Obtain a request token for the interactive authentication flow.
    fn request_token(
        &self,
        consumer_key: &str,
        redirect_uri: &str,
    ) -> Result<String, SourceError>;

    /// Build the authorization URL the user must visit.
    fn auth_url(&self, request_token: &str, redirect_uri: &str) -> String;

    /// Exchange an authorized request token for an access token.
    fn access_token(
        &self,
        consumer_key: &str,
        request_token: &str,
    ) -> Result<String, SourceError>;

    /// Fetch bookmarks matching the configured tags since the given cursor,
    /// sorted newest-first, irrespective of read/archived state.
    fn list(&self, query: ListQuery) -> Result<ListResponse, SourceError>;
}

/// Blocking HTTP client for the Pocket v3 API.
pub struct PocketClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl PocketClient {
    pub fn new() -> Self {
        Self::with_base_url(POCKET_BASE_URL)
    }

    /// Point the client at a different host, for tests against a stub server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "calling bookmark service");
        let response = self
            .http
            .post(&url)
            .header("X-Accept", "application/json")
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            return Err(format!("bookmark service returned {status} for {url}: {text}").into());
        }
        Ok(response.json()?)
    }
}

impl Default for PocketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkSource for PocketClient {
    fn request_token(
        &self,
        consumer_key: &str,
        redirect_uri: &str,
    ) -> Result<String, SourceError> {
        let response: RequestTokenResponse = self.post_json(
            "/v3/oauth/request",
            json!({
                "consumer_key": consumer_key,
                "redirect_uri": redirect_uri,
            }),
        )?;
        Ok(response.code)
    }

    fn auth_url(&self, request_token: &str, redirect_uri: &str) -> String {
        format!(
            "{}/auth/authorize?request_token={}&redirect_uri={}",
            self.base_url, request_token, redirect_uri
        )
    }

    fn access_token(
        &self,
        consumer_key: &str,
        request_token: &str,
    ) -> Result<String, SourceError> {
        let response: AccessTokenResponse = self.post_json(
            "/v3/oauth/authorize",
            json!({
                "consumer_key": consumer_key,
                "code": request_token,
            }),
        )?;
        Ok(response.access_token)
    }

    fn list(&self, query: ListQuery) -> Result<ListResponse, SourceError> {
        let mut body = json!({
            "consumer_key": query.consumer_key,
            "access_token": query.access_token,
            "state": "all",
            "sort": "newest",
            "detailType": "simple",
        });
        if !query.tags.is_empty() {
            body["tag"] = json!(query.tags.join(","));
        }
        if let Some(since) = query.since {
            body["since"] = json!(since);
        }
        let response: GetResponse = self.post_json("/v3/get", body)?;
        let bookmarks = response.list.into_iter().map(Bookmark::from).collect();
        Ok(ListResponse {
            bookmarks,
            since: response.since,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RequestTokenResponse {
    code: String,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default, deserialize_with = "list_items")]
    list: Vec<RawItem>,
    since: Option<u64>,
}

/// One item in the service's "simple" representation. Timestamps arrive as
/// epoch-second strings.
#[derive(Debug, Deserialize)]
struct RawItem {
    resolved_id: Option<String>,
    resolved_url: Option<String>,
    resolved_title: Option<String>,
    time_added: Option<String>,
}

impl From<RawItem> for Bookmark {
    fn from(item: RawItem) -> Self {
        let added_at = item
            .time_added
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|secs| Local.timestamp_opt(secs, 0).single())
            .map(|ts| ts.fixed_offset());
        Bookmark {
            id: item.resolved_id,
            url: item.resolved_url,
            title: item.resolved_title,
            added_at,
        }
    }
}

/// The service returns `list` as a map of id to item, except when nothing
/// matched, in which case it is an empty array. Accept both shapes.
fn list_items<'de, D>(deserializer: D) -> Result<Vec<RawItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(_, item)| serde_json::from_value(item).map_err(D::Error::custom))
            .collect(),
        serde_json::Value::Array(items) if items.is_empty() => Ok(Vec::new()),
        other => Err(D::Error::custom(format!(
            "unexpected shape for bookmark list: {other}"
        ))),
    }
}
