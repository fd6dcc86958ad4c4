use crate::model::{GoalEvent, PerMatchFacts, PlayerStat, RawMatchRecord};

/// Why a record contributes nothing to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotApplicable {
    #[error("record has no player name")]
    MissingPlayerName,

    #[error("player {0:?} not present in the record's stats")]
    PlayerNotFound(String),
}

/// Extract the tracked player's facts for one match.
pub fn interpret(record: &RawMatchRecord) -> Result<PerMatchFacts, NotApplicable> {
    let name = tracked_name(record).ok_or(NotApplicable::MissingPlayerName)?;
    let player = find_player(&record.player_stats, name)
        .ok_or_else(|| NotApplicable::PlayerNotFound(name.to_string()))?;

    let team = player.team;
    let (t0, t1) = (record.team0_score, record.team1_score);

    Ok(PerMatchFacts {
        team,
        is_win: is_win(team, t0, t1),
        score: player.score,
        saves: player.saves,
        goals: player.goals,
        assists: player.assists,
        shots: player.shots,
        goal_diff: goal_diff(team, t0, t1),
        goal_intervals_secs: goal_intervals(&record.goals, record.frames_per_second),
    })
}

/// Non-empty player name of the record, if any.
pub fn tracked_name(record: &RawMatchRecord) -> Option<&str> {
    record.player_name.as_deref().filter(|n| !n.is_empty())
}

/// First stats entry with exactly this name.
pub fn find_player<'a>(stats: &'a [PlayerStat], name: &str) -> Option<&'a PlayerStat> {
    stats.iter().find(|s| s.name == name)
}

/// Ties, and teams other than 0/1, count as losses.
pub fn is_win(team: Option<f64>, team0_score: f64, team1_score: f64) -> bool {
    match team {
        Some(t) if t == 0.0 => team0_score > team1_score,
        Some(t) if t == 1.0 => team1_score > team0_score,
        _ => false,
    }
}

/// Score difference from the player's side. Any team other than 0 is read as team 1.
pub fn goal_diff(team: Option<f64>, team0_score: f64, team1_score: f64) -> f64 {
    if team == Some(0.0) {
        team0_score - team1_score
    } else {
        team1_score - team0_score
    }
}

/// Goal timestamps in seconds, in record order.
pub fn goal_timestamps(goals: &[GoalEvent], fps: f64) -> Vec<f64> {
    goals.iter().map(|g| g.frame / fps).collect()
}

/// Successive differences of `[0, t1, t2, ...]`; empty when there were no goals.
pub fn goal_intervals(goals: &[GoalEvent], fps: f64) -> Vec<f64> {
    let mut prev = 0.0;
    goal_timestamps(goals, fps)
        .into_iter()
        .map(|t| {
            let gap = t - prev;
            prev = t;
            gap
        })
        .collect()
}
