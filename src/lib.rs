//! Renders coastal sensor readings into a color-coded static HTML dashboard.
//!
//! Readings are classified against fixed threshold bands ([`bands`],
//! [`metrics`]), bound to the gauges of a site profile ([`dashboard`]) and
//! written out as HTML ([`report`]) with optional CSV export ([`export`]).

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

pub mod bands;
pub mod carousel;
pub mod clock;
pub mod dashboard;
pub mod export;
pub mod metrics;
pub mod readings;
pub mod report;

/// Writes `bytes` to `path`, creating parent directories as needed.
pub async fn write_output_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
