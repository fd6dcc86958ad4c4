use serde::{Deserialize, Deserializer, Serialize};

/// Name reported when no record ever matched the tracked player.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// One export file as written by the replay decoder; only `properties` matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayExport {
    pub properties: RawMatchRecord,
}

/// Header properties of one match. Numbers may be integers or decimals;
/// missing or `null` numeric fields read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMatchRecord {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(rename = "RecordFPS")]
    pub frames_per_second: f64,
    #[serde(default)]
    pub player_stats: Vec<PlayerStat>,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub team0_score: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub team1_score: f64,
    #[serde(default)]
    pub goals: Vec<GoalEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerStat {
    pub name: String,
    #[serde(default)]
    pub team: Option<f64>, // 0 = blue, 1 = orange; anything else is kept verbatim
    #[serde(default, deserialize_with = "number_or_zero")]
    pub score: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub saves: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub goals: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub assists: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub shots: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalEvent {
    pub frame: f64,
}

fn number_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(0.0))
}

/// The tracked player's view of a single match.
#[derive(Debug, Clone, PartialEq)]
pub struct PerMatchFacts {
    pub team: Option<f64>,
    pub is_win: bool,
    pub score: f64,
    pub saves: f64,
    pub goals: f64,
    pub assists: f64,
    pub shots: f64,
    pub goal_diff: f64,              // own team minus opponent
    pub goal_intervals_secs: Vec<f64>, // first entry is measured from kickoff
}

/// Final statistics over every applicable match of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub wins: u64,
    pub losses: u64,
    pub total_saves: f64,
    pub total_goals: f64,
    pub total_assists: f64,
    pub total_shots: f64,
    pub win_scores: Vec<f64>,
    pub loss_scores: Vec<f64>,
    pub goal_diffs: Vec<f64>,
    pub inter_goal_intervals_secs: Vec<f64>,
    pub tracked_player_name: String,
}

impl AggregateResult {
    /// Number of matches that contributed to the result.
    pub fn matches(&self) -> u64 {
        self.wins + self.losses
    }

    /// Fraction of matches won, or `None` when nothing was aggregated.
    pub fn win_rate(&self) -> Option<f64> {
        match self.matches() {
            0 => None,
            n => Some(self.wins as f64 / n as f64),
        }
    }
}

impl std::fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "player:  {}", self.tracked_player_name)?;
        write!(f, "matches: {} (wins={} losses={}", self.matches(), self.wins, self.losses)?;
        match self.win_rate() {
            Some(r) => writeln!(f, " win_rate={:.1}%)", r * 100.0)?,
            None => writeln!(f, ")")?,
        }
        writeln!(
            f,
            "totals:  saves={} goals={} shots={} assists={}",
            self.total_saves, self.total_goals, self.total_shots, self.total_assists
        )?;
        write!(f, "goals timed: {}", self.inter_goal_intervals_secs.len())
    }
}

/// Running accumulator for the fold. `merge` is associative and keeps order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tally {
    pub wins: u64,
    pub losses: u64,
    pub saves: f64,
    pub goals: f64,
    pub assists: f64,
    pub shots: f64,
    pub win_scores: Vec<f64>,
    pub loss_scores: Vec<f64>,
    pub goal_diffs: Vec<f64>,
    pub intervals: Vec<f64>,
    pub player_name: Option<String>,
}

impl Tally {
    /// Fold one match into the tally.
    pub fn add(mut self, facts: PerMatchFacts, player_name: &str) -> Self {
        self.intervals.extend(facts.goal_intervals_secs);
        if facts.is_win {
            self.wins += 1;
            self.win_scores.push(facts.score);
        } else {
            self.losses += 1;
            self.loss_scores.push(facts.score);
        }
        self.goal_diffs.push(facts.goal_diff);
        self.saves += facts.saves;
        self.goals += facts.goals;
        self.assists += facts.assists;
        self.shots += facts.shots;
        self.player_name = Some(player_name.to_string());
        self
    }

    /// Combine two tallies as if `other`'s matches had followed `self`'s.
    pub fn merge(mut self, other: Tally) -> Self {
        self.wins += other.wins;
        self.losses += other.losses;
        self.saves += other.saves;
        self.goals += other.goals;
        self.assists += other.assists;
        self.shots += other.shots;
        self.win_scores.extend(other.win_scores);
        self.loss_scores.extend(other.loss_scores);
        self.goal_diffs.extend(other.goal_diffs);
        self.intervals.extend(other.intervals);
        if other.player_name.is_some() {
            self.player_name = other.player_name;
        }
        self
    }

    pub fn finish(self) -> AggregateResult {
        AggregateResult {
            wins: self.wins,
            losses: self.losses,
            total_saves: self.saves,
            total_goals: self.goals,
            total_assists: self.assists,
            total_shots: self.shots,
            win_scores: self.win_scores,
            loss_scores: self.loss_scores,
            goal_diffs: self.goal_diffs,
            inter_goal_intervals_secs: self.intervals,
            tracked_player_name: self
                .player_name
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()),
        }
    }
}
