mod cli;

use anyhow::Context;
use tracing::{info, warn};

use replaystats::chart::{self, SvgSurface};
use replaystats::config::Config;
use replaystats::{aggregator, loader, logging};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = cli::parse();
    logging::init(args.verbose);

    let cfg = Config::load(args.config.as_deref()).context("loading config")?;

    if let Some(n) = cfg.rayon_threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
            warn!(error = %e, "rayon pool already initialised");
        }
    }

    let pattern = loader::compile_pattern(&cfg.file_pattern).context("config file_pattern")?;
    let files = loader::expand_paths(&args.paths, &pattern)?;
    if files.is_empty() {
        warn!("no export files found");
    }

    let skip_invalid = args.skip_invalid || cfg.skip_invalid;
    let records = loader::load_records(&files, skip_invalid)?;
    let result = aggregator::aggregate(&records);

    if let Some(csv) = args.csv.as_deref() {
        aggregator::write_csv(&result, csv)
            .with_context(|| format!("writing {}", csv.display()))?;
        info!(path = %csv.display(), "CSV written");
    }

    if !args.no_charts {
        let out_dir = args.out_dir.as_deref().unwrap_or(cfg.out_dir.as_path());
        let mut svg = SvgSurface::new(out_dir, cfg.chart_width, cfg.chart_height);
        chart::render_all(&result, &mut svg, cfg.histogram_bins).context("rendering charts")?;
    }

    println!("{}", result);
    Ok(())
}
