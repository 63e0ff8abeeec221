//! Core domain types shared by both pipelines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GleanError, Result};

/// Lowest accepted rating bound.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating bound.
pub const MAX_RATING: f64 = 10.0;

// ---------------------------------------------------------------------------
// Listing pipeline
// ---------------------------------------------------------------------------

/// Minimal movie data parsed from one listing-page result, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRecord {
    /// Site identifier, e.g. `tt0111161`.
    pub id: String,
    /// Formatted position marker, e.g. `"3. "`.
    pub position: String,
    /// Raw title text as shown on the listing (usually carries the ordinal).
    pub search_title: String,
    /// `""`, a single year, a closed range, or an open range with a trailing space.
    pub year: String,
    /// Rating text; empty when the listing shows none.
    pub rating: String,
}

/// Enrichment data returned by the title API.
///
/// The API has shipped both snake_case and camelCase field names,
/// so both are accepted. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(default)]
    pub id: Option<String>,
    /// Alternate (original-language) title.
    #[serde(default, alias = "originalTitle")]
    pub original_title: Option<String>,
    /// Primary display title.
    #[serde(default, alias = "primaryTitle")]
    pub primary_title: Option<String>,
}

/// A merged record as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    pub year: String,
    pub rating: String,
}

/// Validated, ordered rating bounds for a listing search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    min: f64,
    max: f64,
}

impl RatingRange {
    /// Build a range from two bounds, swapping them if given in reverse.
    ///
    /// Both bounds must lie in `[0, 10]`.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        for value in [a, b] {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(GleanError::validation(format!(
                    "rating {value} must be between {MIN_RATING} and {MAX_RATING}"
                )));
            }
        }

        let (min, max) = if a > b { (b, a) } else { (a, b) };
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl fmt::Display for RatingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", Bound(self.min), Bound(self.max))
    }
}

/// A rating bound that always shows a fractional part (`7.0`, `8.5`, `7.25`).
struct Bound(f64);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

// ---------------------------------------------------------------------------
// Outline pipeline
// ---------------------------------------------------------------------------

/// One heading of a document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
    /// Nesting level, 1 through 6.
    pub level: u8,
    /// Trimmed heading text.
    pub text: String,
}

impl fmt::Display for HeadingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", "#".repeat(self.level as usize), self.text)
    }
}
