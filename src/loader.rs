use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{Result, StatsError};
use crate::model::{RawMatchRecord, ReplayExport};

/// Compile the directory file-name filter.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Expand file and directory arguments into export files, keeping argument order.
/// Files given directly are always kept; directory entries must match `pattern`.
/// A file reached twice (symlinks, repeated arguments) is only returned once.
pub fn expand_paths(args: &[PathBuf], pattern: &Regex) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for arg in args {
        let found = if arg.is_dir() {
            expand_directory(arg, pattern)?
        } else {
            vec![arg.clone()]
        };
        let before = out.len();
        for path in found {
            // unreadable paths keep their own identity so decoding reports them
            let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                out.push(path);
            } else {
                debug!(path = %path.display(), "duplicate export skipped");
            }
        }
        debug!(arg = %arg.display(), files = out.len() - before, "expanded argument");
    }
    Ok(out)
}

/// Every file below `dir` whose name matches `pattern`, sorted.
fn expand_directory(dir: &Path, pattern: &Regex) -> Result<Vec<PathBuf>> {
    let root = dir.display().to_string();
    let root = root.trim_end_matches(['/', '\\']);
    let dir_glob = format!("{}/**/*", glob::Pattern::escape(root));
    let mut files = Vec::new();
    for entry in glob::glob(&dir_glob)? {
        match entry {
            Ok(path) => {
                let keep = path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| pattern.is_match(n));
                if keep {
                    files.push(path);
                }
            }
            Err(e) => warn!(path = %e.path().display(), error = %e.error(), "unreadable entry skipped"),
        }
    }
    files.sort();
    Ok(files)
}

/// Decode the `properties` block of one export document.
pub fn parse_record(json: &str) -> serde_json::Result<RawMatchRecord> {
    serde_json::from_str::<ReplayExport>(json).map(|e| e.properties)
}

/// Read and decode one export file.
pub fn read_record(path: &Path) -> Result<RawMatchRecord> {
    let text = fs::read_to_string(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_record(&text).map_err(|source| StatsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode all files in parallel; the result is in the same order as `paths`.
/// With `skip_invalid`, failures are logged and dropped instead of returned.
pub fn load_records(paths: &[PathBuf], skip_invalid: bool) -> Result<Vec<RawMatchRecord>> {
    let t0 = Instant::now();
    let decoded: Vec<Result<RawMatchRecord>> = paths.par_iter().map(|p| read_record(p)).collect();

    let mut records = Vec::with_capacity(decoded.len());
    for res in decoded {
        match res {
            Ok(r) => records.push(r),
            Err(e) if skip_invalid => warn!(error = %e, "skipping unreadable export"),
            Err(e) => return Err(e),
        }
    }
    info!(
        files = paths.len(),
        records = records.len(),
        secs = t0.elapsed().as_secs_f64(),
        "exports decoded"
    );
    Ok(records)
}
