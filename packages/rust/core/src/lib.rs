//! Pipeline orchestration for Glean.
//!
//! Ties listing extraction, detail enrichment and the merge stage into the
//! end-to-end movie workflow ([`pipeline::run_movies`]).

pub mod merge;
pub mod output;
pub mod pipeline;
