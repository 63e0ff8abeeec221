//! Heading outlines of reference pages.
//!
//! Fetches a topic page, walks its `h1`–`h6` headings in document order and
//! renders them as `#`-prefixed lines.

mod extract;

use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{info, instrument};
use url::Url;

use glean_shared::{ACCEPT_HTML, GleanError, Result};

pub use extract::{extract_outline, render_outline};

/// Fetches reference pages and renders their outlines.
#[derive(Clone)]
pub struct OutlineClient {
    client: Client,
    reference_base: Url,
}

impl OutlineClient {
    /// Create a client rooted at `reference_base` (the topic becomes the last path segment).
    pub fn new(client: Client, reference_base: &str) -> Result<Self> {
        let base = Url::parse(reference_base).map_err(|e| {
            GleanError::config(format!("invalid reference_base '{reference_base}': {e}"))
        })?;

        if base.cannot_be_a_base() {
            return Err(GleanError::config(format!(
                "reference_base '{reference_base}' cannot be a base URL"
            )));
        }

        Ok(Self {
            client,
            reference_base: base,
        })
    }

    /// Page URL for a topic; spaces become underscores.
    pub fn topic_url(&self, topic: &str) -> Url {
        let mut url = self.reference_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&topic.replace(' ', "_"));
        }
        url
    }

    /// Fetch the page for `topic` and render its outline.
    #[instrument(skip(self))]
    pub async fn fetch_outline(&self, topic: &str) -> Result<String> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GleanError::missing("country"));
        }

        let url = self.topic_url(topic);

        let response = self
            .client
            .get(url.as_str())
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(|e| {
                GleanError::Network(format!("failed to fetch reference page for {topic}: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GleanError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GleanError::Network(format!("{url}: body read failed: {e}")))?;

        let headings = extract_outline(&body);
        info!(%url, headings = headings.len(), "outline extracted");

        Ok(render_outline(&headings))
    }
}
