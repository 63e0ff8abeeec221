//! Search-results page extraction.
//!
//! Turns the raw markup of a listing page into [`StubRecord`]s: one per result
//! container, capped at the configured maximum. Items without a usable link
//! are skipped; items whose identifier is malformed are logged and skipped.

mod fields;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

use glean_shared::{GleanError, ListingConfig, Result, StubRecord};

pub use fields::{extract_year, position_marker, strip_ordinal};

/// Result container on the listing page.
const ITEM_SELECTOR: &str = ".ipc-metadata-list-summary-item";
/// Link wrapping the result title.
const LINK_SELECTOR: &str = ".ipc-title-link-wrapper";
const TITLE_SELECTOR: &str = ".ipc-title__text";
const RATING_SELECTOR: &str = ".ipc-rating-star--rating";
const METADATA_SELECTOR: &str = ".dli-title-metadata-item";

// ---------------------------------------------------------------------------
// ListingExtractor
// ---------------------------------------------------------------------------

/// Pre-compiled selectors and identifier pattern for one listing layout.
pub struct ListingExtractor {
    item: Selector,
    link: Selector,
    title: Selector,
    rating: Selector,
    metadata: Selector,
    id_prefix: String,
    id_pattern: Regex,
    max_items: usize,
}

impl ListingExtractor {
    /// Compile selectors for the configured layout.
    pub fn new(config: &ListingConfig) -> Result<Self> {
        if config.id_prefix.is_empty() {
            return Err(GleanError::config("listing id_prefix must not be empty"));
        }

        let id_pattern = Regex::new(&format!(r"^{}\d+$", regex::escape(&config.id_prefix)))
            .map_err(|e| GleanError::config(format!("invalid id pattern: {e}")))?;

        Ok(Self {
            item: selector(ITEM_SELECTOR)?,
            link: selector(LINK_SELECTOR)?,
            title: selector(TITLE_SELECTOR)?,
            rating: selector(RATING_SELECTOR)?,
            metadata: selector(METADATA_SELECTOR)?,
            id_prefix: config.id_prefix.clone(),
            id_pattern,
            max_items: config.max_items,
        })
    }

    /// Extract stub records from a listing page.
    ///
    /// Fails only when the page has no result containers at all.
    #[instrument(skip_all, fields(bytes = html.len()))]
    pub fn extract(&self, html: &str) -> Result<Vec<StubRecord>> {
        let doc = Html::parse_document(html);
        let items: Vec<ElementRef<'_>> = doc.select(&self.item).take(self.max_items).collect();

        if items.is_empty() {
            return Err(GleanError::empty("no movie items found on search page"));
        }

        let mut stubs = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match self.extract_item(item, index) {
                Ok(Some(stub)) => stubs.push(stub),
                Ok(None) => debug!(index, "result has no title link, skipping"),
                Err(e) => warn!(index, error = %e, "failed to extract result, skipping"),
            }
        }

        debug!(count = stubs.len(), "extracted stub records");
        Ok(stubs)
    }

    /// Extract one result container.
    ///
    /// `Ok(None)` means the container carries no identifier link.
    fn extract_item(&self, item: ElementRef<'_>, index: usize) -> Result<Option<StubRecord>> {
        let Some(href) = item
            .select(&self.link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .filter(|href| !href.is_empty())
        else {
            return Ok(None);
        };

        let Some(segment) = href.split('/').find(|s| s.starts_with(&self.id_prefix)) else {
            return Ok(None);
        };

        if !self.id_pattern.is_match(segment) {
            return Err(GleanError::parse(format!(
                "malformed identifier '{segment}' in {href}"
            )));
        }

        let search_title = first_text(item, &self.title).unwrap_or_default();
        let rating = first_text(item, &self.rating).unwrap_or_default();
        let metadata: Vec<String> = item
            .select(&self.metadata)
            .map(|el| el.text().collect::<String>())
            .collect();

        Ok(Some(StubRecord {
            id: segment.to_string(),
            position: position_marker(&search_title, index),
            year: extract_year(metadata.iter().map(String::as_str)),
            search_title,
            rating,
        }))
    }
}

/// Trimmed text of the first element matching `sel` inside `item`.
fn first_text(item: ElementRef<'_>, sel: &Selector) -> Option<String> {
    item.select(sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| GleanError::parse(format!("invalid selector '{css}': {e}")))
}
