//! Outbound HTTP client setup.
//!
//! Every request carries a browser-like `User-Agent` and an `Accept-Language`
//! header; several listing sites reject bare library clients.

use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::config::HttpConfig;
use crate::error::{GleanError, Result};

/// `Accept` header for HTML page fetches.
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
                               image/avif,image/webp,image/apng,*/*;q=0.8";

/// `Accept` header for JSON API calls.
pub const ACCEPT_JSON: &str = "application/json";

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Build the shared client. No request timeout is set.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    let language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| GleanError::config(format!("invalid accept_language: {e}")))?;
    headers.insert(ACCEPT_LANGUAGE, language);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| GleanError::Network(format!("failed to build HTTP client: {e}")))
}
