use std::path::PathBuf;

use clap::Parser;

/// Aggregate one player's performance over a set of replay JSON exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "replaystats", version)]
pub struct Cli {
    /// Export files, or directories to search recursively
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory for the SVG charts (default from config, else ".")
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,

    /// Also write the aggregate as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Only print the summary; write no charts
    #[arg(long)]
    pub no_charts: bool,

    /// Warn about undecodable files instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Config file (default: $REPLAYSTATS_CONFIG, then ./replaystats.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
