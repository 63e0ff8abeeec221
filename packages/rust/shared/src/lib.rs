//! Shared types, error model, configuration and HTTP setup for Glean.
//!
//! This crate is the foundation depended on by all other Glean crates.
//! It provides:
//! - [`GleanError`], the unified error type
//! - Domain types ([`StubRecord`], [`DetailRecord`], [`MovieRecord`], [`HeadingLine`])
//! - Configuration ([`AppConfig`], config loading)
//! - [`build_client`] for outbound requests

pub mod config;
pub mod error;
pub mod http;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DetailsConfig, HttpConfig, ListingConfig, OutlineConfig, ServerConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{GleanError, Result};
pub use http::{ACCEPT_HTML, ACCEPT_JSON, build_client};
pub use types::{
    DetailRecord, HeadingLine, MAX_RATING, MIN_RATING, MovieRecord, RatingRange, StubRecord,
};
