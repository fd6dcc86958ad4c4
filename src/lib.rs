//! Per-player statistics over Rocket League replay exports.
//!
//! Each export's `properties` block decodes into a [`RawMatchRecord`].
//! [`interpret`](interpret::interpret) pulls the tracked player's facts out of
//! one record, [`aggregate`](aggregator::aggregate) folds them into an
//! [`AggregateResult`], and [`chart::render_all`] draws it.
//!
//! ```no_run
//! use replaystats::{aggregator, chart, loader};
//!
//! let paths = vec![std::path::PathBuf::from("exports/")];
//! let pattern = loader::compile_pattern(r"\.json$").unwrap();
//! let files = loader::expand_paths(&paths, &pattern).unwrap();
//! let records = loader::load_records(&files, false).unwrap();
//! let result = aggregator::aggregate(&records);
//! let mut svg = chart::SvgSurface::new("charts", 640, 480);
//! chart::render_all(&result, &mut svg, 10).unwrap();
//! ```

pub mod aggregator;
pub mod chart;
pub mod config;
pub mod error;
pub mod interpret;
pub mod loader;
pub mod logging;
pub mod model;

pub use aggregator::{aggregate, aggregate_parallel};
pub use error::{Result, StatsError};
pub use interpret::{interpret, NotApplicable};
pub use model::{AggregateResult, PerMatchFacts, RawMatchRecord, Tally};
