use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::replay_fetch::{Replay, TeamSide};

/// Win/loss label for the tracked player. A tied goal total counts as a
/// loss (ties only occur on forfeits or incomplete data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

/// One summary-table row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub id: String,
    pub date: DateTime<Utc>,
    pub outcome: Outcome,
    pub shots: u32,
    pub goals: u32,
    pub saves: u32,
    pub assists: u32,
    pub demos: u32,
    pub boost_bpm: f64,
    pub avg_speed: f64,
}

pub fn team_goals(team: &TeamSide) -> u32 {
    team.players.iter().map(|p| p.stats.core.goals).sum()
}

/// Project one replay into the tracked player's summary row.
///
/// Team attribution checks blue's roster for the name; any miss puts the
/// player on orange, where the individual lookup below still fails if the
/// name is absent from that side too.
pub fn player_summary(replay: &Replay, player_name: &str) -> Result<SummaryRow> {
    let on_blue = replay.blue.players.iter().any(|p| p.name == player_name);
    let (your_team, other_team) = if on_blue {
        (&replay.blue, &replay.orange)
    } else {
        (&replay.orange, &replay.blue)
    };

    let outcome = if team_goals(your_team) > team_goals(other_team) {
        Outcome::Win
    } else {
        Outcome::Loss
    };

    let you = your_team
        .players
        .iter()
        .find(|p| p.name == player_name)
        .ok_or_else(|| anyhow!("player {player_name:?} not found in replay {}", replay.id))?;
    let stats = &you.stats;

    Ok(SummaryRow {
        id: replay.id.clone(),
        date: replay.created,
        outcome,
        shots: stats.core.shots,
        goals: stats.core.goals,
        saves: stats.core.saves,
        assists: stats.core.assists,
        demos: stats.demo.inflicted,
        boost_bpm: stats.boost.bpm,
        avg_speed: stats.movement.avg_speed,
    })
}
