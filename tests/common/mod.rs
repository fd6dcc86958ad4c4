//! Shared fixtures for the replaystats integration tests.
//!
//! Builders for typed records plus `export_json`, which produces the same
//! document shape the replay decoder writes to disk.

#![allow(dead_code)]

use replaystats::model::{GoalEvent, PlayerStat, RawMatchRecord};

pub fn stat(name: &str, team: i64, score: i64) -> PlayerStat {
    PlayerStat {
        name: name.to_string(),
        team: Some(team as f64),
        score: score as f64,
        ..Default::default()
    }
}

/// A 30 fps match in which `player` is the tracked name.
pub fn record(
    player: Option<&str>,
    stats: Vec<PlayerStat>,
    team0_score: i64,
    team1_score: i64,
    goal_frames: &[i64],
) -> RawMatchRecord {
    RawMatchRecord {
        player_name: player.map(str::to_string),
        frames_per_second: 30.0,
        player_stats: stats,
        team0_score: team0_score as f64,
        team1_score: team1_score as f64,
        goals: goal_frames
            .iter()
            .map(|&frame| GoalEvent { frame: frame as f64 })
            .collect(),
    }
}

/// "Ace" on `team` with the given final score line and no goal events.
pub fn ace_match(team: i64, team0_score: i64, team1_score: i64, score: i64) -> RawMatchRecord {
    record(
        Some("Ace"),
        vec![stat("Ace", team, score), stat("Bot", 1 - team, 100)],
        team0_score,
        team1_score,
        &[],
    )
}

/// A handful of matches mixing wins, losses, ties and skipped records.
pub fn season() -> Vec<RawMatchRecord> {
    let mut skipped_name = ace_match(0, 2, 0, 400);
    skipped_name.player_name = None;
    vec![
        record(
            Some("Ace"),
            vec![
                PlayerStat { saves: 2.0, goals: 1.0, shots: 3.0, ..stat("Ace", 0, 420) },
                stat("Bot", 1, 150),
            ],
            3,
            1,
            &[30, 90, 300, 600],
        ),
        ace_match(1, 4, 2, 210),
        skipped_name,
        ace_match(1, 0, 5, 650),
        record(Some("Ace"), vec![stat("Other", 0, 10)], 1, 0, &[15]),
        ace_match(0, 2, 2, 300),
        record(
            Some("Ace"),
            vec![PlayerStat { assists: 2.0, saves: 1.0, ..stat("Ace", 0, 330) }],
            1,
            0,
            &[3600],
        ),
    ]
}

pub fn export_json(name: Option<&str>, fps: f64, team0: i64, team1: i64) -> serde_json::Value {
    serde_json::json!({
        "header_size": 4768,
        "game_type": "TAGame.Replay_Soccar_TA",
        "properties": {
            "TeamSize": 3,
            "Team0Score": team0,
            "Team1Score": team1,
            "PlayerName": name,
            "RecordFPS": fps,
            "Goals": [
                { "frame": 600, "PlayerName": "Ace", "PlayerTeam": 0 },
                { "frame": 1500, "PlayerName": "Zed", "PlayerTeam": 1 }
            ],
            "PlayerStats": [
                {
                    "Name": "Ace", "Platform": { "kind": "OnlinePlatform", "value": "OnlinePlatform_Steam" },
                    "Team": 0, "Score": 512, "Goals": 1, "Assists": 0, "Saves": 3, "Shots": 4, "bBot": false
                },
                { "Name": "Zed", "Team": 1, "Score": 230, "Goals": 1 }
            ]
        }
    })
}
