//! JSON search reports.
//!
//! The report carries the endpoints, the outcome and the counters of one
//! search:
//!
//! ```text
//! {
//!   "start": "Бумага",
//!   "target": "Философия",
//!   "outcome": { "status": "found", "chain": ["Бумага", "...", "Философия"] },
//!   "stats": { "pages_fetched": 12, "pages_unavailable": 0, ... }
//! }
//! ```

use crate::models::SearchReport;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `report` as pretty-printed JSON to `path`, creating parent
/// directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &SearchReport, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create report directory");
            return Err(e.into());
        }
    }

    let bytes = json.len();
    fs::write(path, json).await?;
    info!(bytes, "Wrote JSON search report");
    Ok(())
}
