//! Output file writing.

use std::path::Path;

use tracing::info;

use glean_shared::{GleanError, MovieRecord, Result};

/// Write records as a pretty-printed JSON array (two-space indent, UTF-8 kept literal).
pub fn write_records(path: &Path, records: &[MovieRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GleanError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(records)
        .map_err(|e| GleanError::parse(format!("failed to serialize records: {e}")))?;
    std::fs::write(path, json).map_err(|e| GleanError::io(path, e))?;

    info!(path = %path.display(), count = records.len(), "records written");
    Ok(())
}
