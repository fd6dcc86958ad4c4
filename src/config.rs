use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StatsError};

pub const DEFAULT_CONFIG_FILE: &str = "replaystats.toml";
pub const CONFIG_ENV: &str = "REPLAYSTATS_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub file_pattern: String,         // regex on file names when walking directories
    pub out_dir: PathBuf,             // where charts are written
    pub histogram_bins: usize,
    pub chart_width: u32,
    pub chart_height: u32,
    pub rayon_threads: Option<usize>,
    pub skip_invalid: bool,           // warn and continue on undecodable files
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_pattern: r"\.json$".to_string(),
            out_dir: PathBuf::from("."),
            histogram_bins: 10,
            chart_width: 640,
            chart_height: 480,
            rayon_threads: None,
            skip_invalid: false,
        }
    }
}

impl Config {
    /// Explicit path, else `$REPLAYSTATS_CONFIG`, else `replaystats.toml` if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(p) => PathBuf::from(p),
                None => {
                    let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                    if !p.is_file() {
                        return Ok(Self::default());
                    }
                    p
                }
            },
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&s).map_err(|source| StatsError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
