//! Title detail lookups.
//!
//! A lookup never fails its caller: any transport error, non-200 status,
//! empty or malformed payload yields `None`, and the merge stage falls back to the
//! listing data for that title.

use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, StatusCode, header::ACCEPT};
use tracing::{debug, instrument, warn};
use url::Url;

use glean_shared::{ACCEPT_JSON, DetailRecord, GleanError, Result};

// ---------------------------------------------------------------------------
// DetailSource
// ---------------------------------------------------------------------------

/// Anything that can resolve a title identifier to a detail record.
pub trait DetailSource: Send + Sync {
    /// Look up one identifier. `None` on any failure.
    fn fetch_detail(&self, id: &str) -> impl Future<Output = Option<DetailRecord>> + Send;
}

/// Detail lookups against the JSON title API.
#[derive(Clone)]
pub struct ApiDetailSource {
    client: Client,
    api_base: Url,
}

impl ApiDetailSource {
    /// Create a source rooted at `api_base` (the identifier becomes the last path segment).
    pub fn new(client: Client, api_base: &str) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| GleanError::config(format!("invalid details api_base '{api_base}': {e}")))?;

        if api_base.cannot_be_a_base() {
            return Err(GleanError::config(format!(
                "details api_base '{api_base}' cannot be a base URL"
            )));
        }

        Ok(Self { client, api_base })
    }

    fn detail_url(&self, id: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    async fn request(&self, id: &str) -> Result<DetailRecord> {
        let url = self.detail_url(id);

        let response = self
            .client
            .get(url.as_str())
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| GleanError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GleanError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let payload = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GleanError::parse(format!("{url}: malformed detail payload: {e}")))?;

        // An empty object or `null` means the API knows nothing about the title.
        let is_empty = payload.is_null() || payload.as_object().is_some_and(|m| m.is_empty());
        if is_empty {
            return Err(GleanError::empty(format!("{url}: empty detail payload")));
        }

        serde_json::from_value(payload)
            .map_err(|e| GleanError::parse(format!("{url}: malformed detail payload: {e}")))
    }
}

impl DetailSource for ApiDetailSource {
    #[instrument(skip(self))]
    async fn fetch_detail(&self, id: &str) -> Option<DetailRecord> {
        match self.request(id).await {
            Ok(detail) => {
                debug!("detail fetched");
                Some(detail)
            }
            Err(e) => {
                warn!(error = %e, "detail lookup failed, falling back to listing data");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fan-out
// ---------------------------------------------------------------------------

/// Look up every identifier concurrently and wait for all of them.
///
/// Slot `i` of the result always belongs to `ids[i]`, whatever order the
/// lookups finish in.
#[instrument(skip_all, fields(count = ids.len()))]
pub async fn fetch_all<S>(source: Arc<S>, ids: &[String]) -> Vec<Option<DetailRecord>>
where
    S: DetailSource + 'static,
{
    let handles: Vec<_> = ids
        .iter()
        .map(|id| {
            let source = Arc::clone(&source);
            let id = id.clone();
            tokio::spawn(async move { source.fetch_detail(&id).await })
        })
        .collect();

    let mut details = Vec::with_capacity(handles.len());
    for (id, handle) in ids.iter().zip(handles) {
        match handle.await {
            Ok(detail) => details.push(detail),
            Err(e) => {
                warn!(%id, error = %e, "detail task did not complete");
                details.push(None);
            }
        }
    }

    let found = details.iter().filter(|d| d.is_some()).count();
    debug!(found, missing = details.len() - found, "detail lookups finished");
    details
}
