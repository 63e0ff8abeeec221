//! End-to-end `movies` pipeline: search page → stubs → details → merge → JSON file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, StatusCode};
use reqwest::header::ACCEPT;
use tracing::{info, instrument};
use url::Url;

use glean_details::{ApiDetailSource, DetailSource};
use glean_listing::ListingExtractor;
use glean_shared::{
    ACCEPT_HTML, DetailsConfig, GleanError, HttpConfig, ListingConfig, MovieRecord, RatingRange,
    Result, build_client,
};

use crate::merge::merge;
use crate::output::write_records;

/// Configuration for the `run_movies` pipeline.
#[derive(Debug, Clone)]
pub struct MoviesConfig {
    /// Rating bounds for the search.
    pub range: RatingRange,
    /// Outbound request identity.
    pub http: HttpConfig,
    /// Listing layout and search URL.
    pub listing: ListingConfig,
    /// Detail API location.
    pub details: DetailsConfig,
    /// Where the merged records are written.
    pub output_path: PathBuf,
}

/// Result of the `run_movies` pipeline.
#[derive(Debug)]
pub struct MoviesResult {
    /// Path the records were written to.
    pub output_path: PathBuf,
    /// Merged records, in listing order.
    pub records: Vec<MovieRecord>,
    /// Records that received detail data.
    pub enriched: usize,
    /// Records that fell back to listing data only.
    pub fallbacks: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called once the listing has been parsed.
    fn stubs_found(&self, count: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &MoviesResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn stubs_found(&self, _count: usize) {}
    fn done(&self, _result: &MoviesResult) {}
}

/// Build the search URL for a rating range.
pub fn search_url(base: &str, range: &RatingRange, count: usize) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| GleanError::config(format!("invalid listing search_url '{base}': {e}")))?;

    url.query_pairs_mut()
        .append_pair("user_rating", &range.to_string())
        .append_pair("count", &count.to_string());

    Ok(url)
}

/// Fetch the listing page markup.
pub async fn fetch_listing(client: &Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.as_str())
        .header(ACCEPT, ACCEPT_HTML)
        .send()
        .await
        .map_err(|e| GleanError::Network(format!("failed to fetch search results: {e}")))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(GleanError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| GleanError::Network(format!("{url}: body read failed: {e}")))
}

/// Run the full `movies` pipeline against the configured endpoints.
pub async fn run_movies(
    config: &MoviesConfig,
    progress: &dyn ProgressReporter,
) -> Result<MoviesResult> {
    let client = build_client(&config.http)?;
    let source = Arc::new(ApiDetailSource::new(
        client.clone(),
        &config.details.api_base,
    )?);

    run_movies_with(config, &client, source, progress).await
}

/// Run the pipeline with an explicit client and detail source.
///
/// 1. Fetch the search page
/// 2. Extract stub records
/// 3. Look up all details concurrently
/// 4. Merge in listing order
/// 5. Write the output file
#[instrument(skip_all, fields(range = %config.range))]
pub async fn run_movies_with<S>(
    config: &MoviesConfig,
    client: &Client,
    source: Arc<S>,
    progress: &dyn ProgressReporter,
) -> Result<MoviesResult>
where
    S: DetailSource + 'static,
{
    let start = Instant::now();
    let extractor = ListingExtractor::new(&config.listing)?;

    // --- Phase 1: Search page ---
    progress.phase("Fetching search results");
    let url = search_url(
        &config.listing.search_url,
        &config.range,
        config.listing.max_items,
    )?;
    info!(%url, "fetching search page");
    let html = fetch_listing(client, &url).await?;

    // --- Phase 2: Stubs ---
    progress.phase("Parsing search results");
    let stubs = extractor.extract(&html)?;
    if stubs.is_empty() {
        return Err(GleanError::empty("no valid movies found"));
    }
    progress.stubs_found(stubs.len());
    info!(count = stubs.len(), "found movies, fetching details");

    // --- Phase 3: Details ---
    progress.phase("Fetching movie details");
    let ids: Vec<String> = stubs.iter().map(|s| s.id.clone()).collect();
    let details = glean_details::fetch_all(source, &ids).await;
    let enriched = details.iter().filter(|d| d.is_some()).count();

    // --- Phase 4: Merge ---
    let records = merge(&stubs, details);

    // --- Phase 5: Output ---
    progress.phase("Saving results");
    write_records(&config.output_path, &records)?;

    let result = MoviesResult {
        output_path: config.output_path.clone(),
        fallbacks: records.len() - enriched,
        enriched,
        records,
        elapsed: start.elapsed(),
    };

    info!(
        records = result.records.len(),
        enriched = result.enriched,
        fallbacks = result.fallbacks,
        duration_ms = result.elapsed.as_millis(),
        "movies pipeline completed"
    );

    progress.done(&result);
    Ok(result)
}
