//! Application configuration for Glean.
//!
//! User config lives at `~/.glean/glean.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GleanError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "glean.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".glean";

// ---------------------------------------------------------------------------
// Config structs (matching glean.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Outbound request identity.
    #[serde(default)]
    pub http: HttpConfig,

    /// Listing search and output settings.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Title detail API.
    #[serde(default)]
    pub details: DetailsConfig,

    /// Reference site for outlines.
    #[serde(default)]
    pub outline: OutlineConfig,

    /// Outline HTTP server.
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Browser-like identification sent on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `Accept-Language` header value.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .into()
}
fn default_accept_language() -> String {
    "en-US,en;q=0.9".into()
}

/// `[listing]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Search page URL (query is appended per run).
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Maximum number of result containers considered.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Prefix that marks the identifier segment of a result link.
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Where the merged JSON is written.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            max_items: default_max_items(),
            id_prefix: default_id_prefix(),
            output_path: default_output_path(),
        }
    }
}

fn default_search_url() -> String {
    "https://www.imdb.com/search/title/".into()
}
fn default_max_items() -> usize {
    35
}
fn default_id_prefix() -> String {
    "tt".into()
}
fn default_output_path() -> String {
    "movies.json".into()
}

/// `[details]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsConfig {
    /// Base URL; the identifier is appended as the last path segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for DetailsConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    "https://rest.imdbapi.dev/v2/titles".into()
}

/// `[outline]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineConfig {
    /// Base URL; the topic is appended as the last path segment.
    #[serde(default = "default_reference_base")]
    pub reference_base: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            reference_base: default_reference_base(),
        }
    }
}

fn default_reference_base() -> String {
    "https://en.wikipedia.org/wiki".into()
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.glean/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| GleanError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.glean/glean.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GleanError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| GleanError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GleanError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GleanError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GleanError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
