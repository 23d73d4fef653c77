//! Where map text comes from.

use async_trait::async_trait;
use mapchat_core::{MapchatError, MapchatResult};
use std::time::Duration;
use tracing::{info, warn};

/// Default base URL of the online Wardley maps API.
pub const DEFAULT_MAP_API_BASE: &str = "https://api.onlinewardleymaps.com/v1/maps";

/// Fetches the raw text of a map by id.
#[async_trait]
pub trait MapSource: Send + Sync {
    /// Returns the map text, or [`MapchatError::Fetch`] on any failure.
    async fn fetch(&self, map_id: &str) -> MapchatResult<String>;
}

/// `GET <base>/fetch?id=<map_id>` against the maps API.
///
/// Success means HTTP 200 and a JSON body with a string `text` field.
pub struct HttpMapSource {
    base_url: String,
    http: reqwest::Client,
}

impl HttpMapSource {
    /// Client for the maps API at `base_url`; a trailing `/` is dropped.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> MapchatResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| MapchatError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl MapSource for HttpMapSource {
    async fn fetch(&self, map_id: &str) -> MapchatResult<String> {
        if map_id.trim().is_empty() {
            return Err(MapchatError::Fetch("no map id given".to_string()));
        }

        let url = format!("{}/fetch", self.base_url);
        info!(map_id = %map_id, "Fetching map");

        let resp = self
            .http
            .get(&url)
            .query(&[("id", map_id)])
            .send()
            .await
            .map_err(|e| {
                warn!(map_id = %map_id, error = %e, "Map request failed");
                MapchatError::Fetch(format!("an error occurred while making the API request: {e}"))
            })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            warn!(map_id = %map_id, status = status.as_u16(), "Map request rejected");
            return Err(MapchatError::Fetch(format!(
                "the API request failed with status code {}",
                status.as_u16()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| MapchatError::Fetch(format!("malformed map response: {e}")))?;

        parse_map_response(&body)
    }
}

/// Pulls the `text` field out of a map API response body.
pub fn parse_map_response(body: &serde_json::Value) -> MapchatResult<String> {
    body["text"].as_str().map(str::to_string).ok_or_else(|| {
        MapchatError::Fetch("the response JSON does not contain the expected 'text' key".to_string())
    })
}
