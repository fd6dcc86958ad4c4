use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::interpret::{interpret, tracked_name};
use crate::model::{AggregateResult, RawMatchRecord, Tally};

/// Fold every record, in order, into one result.
pub fn aggregate(records: &[RawMatchRecord]) -> AggregateResult {
    let tally = records.iter().fold(Tally::default(), fold_record);
    log_done(&tally, records.len());
    tally.finish()
}

/// Same result as [`aggregate`], with the fold split across the rayon pool.
pub fn aggregate_parallel(records: &[RawMatchRecord]) -> AggregateResult {
    let tally = records
        .par_iter()
        .fold(Tally::default, fold_record)
        .reduce(Tally::default, Tally::merge);
    log_done(&tally, records.len());
    tally.finish()
}

/// Apply one record to the tally; non-applicable records leave it untouched.
fn fold_record(tally: Tally, record: &RawMatchRecord) -> Tally {
    match interpret(record) {
        Ok(facts) => {
            let name = tracked_name(record).unwrap_or_default();
            tally.add(facts, name)
        }
        Err(reason) => {
            debug!(%reason, "record skipped");
            tally
        }
    }
}

fn log_done(tally: &Tally, records: usize) {
    info!(
        records,
        applicable = tally.wins + tally.losses,
        wins = tally.wins,
        losses = tally.losses,
        "aggregation done"
    );
}

/// Summary CSV: scalar stats first, then one row per distribution element.
pub fn write_csv(result: &AggregateResult, out_path: &Path) -> io::Result<()> {
    let mut f = BufWriter::new(File::create(out_path)?);
    writeln!(f, "section,key,value")?;
    writeln!(f, "summary,generated_at,{}", Utc::now().to_rfc3339())?;
    writeln!(f, "summary,player,{}", escape_csv(&result.tracked_player_name))?;
    writeln!(f, "summary,wins,{}", result.wins)?;
    writeln!(f, "summary,losses,{}", result.losses)?;
    writeln!(f, "summary,saves,{}", result.total_saves)?;
    writeln!(f, "summary,goals,{}", result.total_goals)?;
    writeln!(f, "summary,assists,{}", result.total_assists)?;
    writeln!(f, "summary,shots,{}", result.total_shots)?;

    for (i, s) in result.win_scores.iter().enumerate() {
        writeln!(f, "win_score,{},{}", i, s)?;
    }
    for (i, s) in result.loss_scores.iter().enumerate() {
        writeln!(f, "loss_score,{},{}", i, s)?;
    }
    for (i, d) in result.goal_diffs.iter().enumerate() {
        writeln!(f, "goal_diff,{},{}", i, d)?;
    }
    for (i, t) in result.inter_goal_intervals_secs.iter().enumerate() {
        writeln!(f, "goal_interval_secs,{},{:.3}", i, t)?;
    }
    f.flush()
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
