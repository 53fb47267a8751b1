use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::extract::SummaryRow;

/// Archive one replay's detail body, exactly as received, as `<id>.json`.
pub fn write_raw_replay(dir: &Path, replay_id: &str, body: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{replay_id}.json"));
    fs::write(&path, body).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(path)
}

/// Write the summary table, header plus one row per replay, replacing any
/// previous run's file.
pub fn write_summary_csv(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("failed writing summary row")?;
    }
    writer.flush().context("failed flushing summary table")?;
    Ok(())
}
