use bc_group_export::extract::{Outcome, player_summary, team_goals};
use bc_group_export::replay_fetch::{
    BoostStats, CoreStats, DemoStats, MovementStats, PlayerEntry, PlayerStats, Replay, TeamSide,
};
use chrono::{TimeZone, Utc};

fn player(name: &str, goals: u32) -> PlayerEntry {
    PlayerEntry {
        name: name.to_string(),
        stats: PlayerStats {
            core: CoreStats {
                shots: goals * 2,
                goals,
                saves: 1,
                assists: 0,
            },
            boost: BoostStats { bpm: 340.0 },
            movement: MovementStats { avg_speed: 1440.0 },
            demo: DemoStats { inflicted: 1 },
        },
    }
}

fn replay(blue: Vec<PlayerEntry>, orange: Vec<PlayerEntry>) -> Replay {
    Replay {
        id: "synthetic".to_string(),
        created: Utc.with_ymd_and_hms(2026, 2, 3, 19, 41, 27).unwrap(),
        blue: TeamSide { players: blue },
        orange: TeamSide { players: orange },
    }
}

#[test]
fn win_when_your_team_outscores_theirs() {
    let replay = replay(
        vec![player("me", 2), player("mate", 1)],
        vec![player("them", 1)],
    );
    let row = player_summary(&replay, "me").expect("extraction should succeed");
    assert_eq!(row.outcome, Outcome::Win);
}

#[test]
fn loss_when_their_team_outscores_yours() {
    let replay = replay(
        vec![player("me", 1)],
        vec![player("them", 2), player("them2", 1)],
    );
    let row = player_summary(&replay, "me").expect("extraction should succeed");
    assert_eq!(row.outcome, Outcome::Loss);
}

#[test]
fn tied_goal_totals_count_as_loss() {
    let replay = replay(vec![player("me", 2)], vec![player("them", 2)]);
    let row = player_summary(&replay, "me").expect("extraction should succeed");
    assert_eq!(row.outcome, Outcome::Loss);
}

#[test]
fn stats_come_from_the_orange_roster_when_player_is_there() {
    let mut me = player("me", 0);
    me.stats.core.shots = 9;
    me.stats.core.saves = 4;
    me.stats.boost.bpm = 299.5;
    me.stats.movement.avg_speed = 1333.25;
    me.stats.demo.inflicted = 3;
    let replay = replay(vec![player("someone else", 3)], vec![me]);

    let row = player_summary(&replay, "me").expect("extraction should succeed");
    assert_eq!(row.outcome, Outcome::Loss);
    assert_eq!(row.shots, 9);
    assert_eq!(row.goals, 0);
    assert_eq!(row.saves, 4);
    assert_eq!(row.demos, 3);
    assert!((row.boost_bpm - 299.5).abs() < 1e-9);
    assert!((row.avg_speed - 1333.25).abs() < 1e-9);
}

#[test]
fn name_matching_is_exact_and_case_sensitive() {
    let replay = replay(vec![player("Me", 1)], vec![player("ME ", 1)]);
    assert!(player_summary(&replay, "me").is_err());
}

#[test]
fn player_absent_from_both_teams_is_an_error() {
    let replay = replay(vec![player("a", 1)], vec![player("b", 2)]);
    let err = player_summary(&replay, "ghost").expect_err("extraction should fail");
    let message = err.to_string();
    assert!(message.contains("ghost"), "unexpected error: {message}");
    assert!(message.contains("synthetic"), "unexpected error: {message}");
}

#[test]
fn extraction_is_pure_and_repeatable() {
    let replay = replay(vec![player("me", 2)], vec![player("them", 1)]);
    let first = player_summary(&replay, "me").expect("extraction should succeed");
    let second = player_summary(&replay, "me").expect("extraction should succeed");
    assert_eq!(first, second);
}

#[test]
fn team_goals_sums_over_the_roster() {
    let team = TeamSide {
        players: vec![player("a", 2), player("b", 0), player("c", 1)],
    };
    assert_eq!(team_goals(&team), 3);
}
