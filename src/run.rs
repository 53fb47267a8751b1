use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::export;
use crate::extract::{self, SummaryRow};
use crate::http_client::ApiClient;
use crate::replay_fetch;

/// Archive one replay body and project it into the tracked player's row.
pub fn archive_and_summarize(
    out_dir: &Path,
    player_name: &str,
    replay_id: &str,
    body: &str,
) -> Result<SummaryRow> {
    export::write_raw_replay(out_dir, replay_id, body)?;
    let replay =
        replay_fetch::parse_replay_json(body).with_context(|| format!("replay {replay_id}"))?;
    extract::player_summary(&replay, player_name)
}

/// Full sequential pipeline: enumerate the group, then fetch, archive, and
/// extract one replay at a time, writing the summary table once at the end.
pub fn run(cfg: &Config) -> Result<()> {
    log::info!(
        "exporting group {} for player {:?}",
        cfg.group_id,
        cfg.player_name
    );

    let client = ApiClient::new(cfg)?;
    let ids = replay_fetch::list_group_replays(&client, &cfg.group_id)?;
    log::info!("found {} replay(s) in group {}", ids.len(), cfg.group_id);

    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("failed creating {}", cfg.out_dir.display()))?;

    let mut rows = Vec::with_capacity(ids.len());
    for id in &ids {
        let body = replay_fetch::fetch_replay(&client, id)?;
        rows.push(archive_and_summarize(&cfg.out_dir, &cfg.player_name, id, &body)?);
        log::debug!("archived replay {id}");
    }

    if rows.is_empty() {
        log::info!("no replays downloaded (group empty?)");
        return Ok(());
    }

    export::write_summary_csv(&cfg.summary_path, &rows)?;
    log::info!(
        "{} replay(s) -> {}",
        rows.len(),
        cfg.summary_path.display()
    );
    Ok(())
}
