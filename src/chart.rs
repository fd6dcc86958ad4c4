//! Chart rendering for a finished [`AggregateResult`].
//!
//! [`render_all`] turns the aggregate into five chart descriptions and hands
//! each one to a [`ChartSurface`]. [`SvgSurface`] is the bundled surface; it
//! writes one standalone SVG file per chart.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, StatsError};
use crate::model::AggregateResult;

pub const WIN_COLOR: &str = "#7B9F35";
pub const LOSS_COLOR: &str = "#AA3939";
pub const NEUTRAL_COLOR: &str = "#226666";

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub name: &'static str, // file stem
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    pub name: &'static str,
    pub title: String,
    pub y_label: String,
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: &'static str,
    pub color: &'static str,
    pub stats: Option<BoxStats>, // None when the group has no samples
}

/// Five-number summary with 1.5·IQR whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub name: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: Vec<Bin>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Anything able to draw the three chart kinds.
pub trait ChartSurface {
    fn bar_chart(&mut self, chart: &BarChart) -> Result<()>;
    fn box_plot(&mut self, chart: &BoxPlot) -> Result<()>;
    fn histogram(&mut self, chart: &Histogram) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Aggregate -> charts
// ---------------------------------------------------------------------------

pub fn wins_vs_losses(result: &AggregateResult) -> BarChart {
    BarChart {
        name: "wins-vs-losses",
        title: "Wins vs. losses".to_string(),
        y_label: "Games".to_string(),
        bars: vec![
            Bar { label: "Wins", value: result.wins as f64, color: WIN_COLOR },
            Bar { label: "Losses", value: result.losses as f64, color: LOSS_COLOR },
        ],
    }
}

pub fn stats_breakdown(result: &AggregateResult) -> BarChart {
    let bar = |label, value| Bar { label, value, color: NEUTRAL_COLOR };
    BarChart {
        name: "stats",
        title: "Stats Breakdown".to_string(),
        y_label: "Count".to_string(),
        bars: vec![
            bar("Saves", result.total_saves),
            bar("Goals", result.total_goals),
            bar("Shots", result.total_shots),
            bar("Assists", result.total_assists),
        ],
    }
}

pub fn score_distribution(result: &AggregateResult) -> BoxPlot {
    BoxPlot {
        name: "score-distribution",
        title: format!("{}'s Score Distribution: Wins vs. Losses", result.tracked_player_name),
        y_label: "Score".to_string(),
        groups: vec![
            BoxGroup { label: "Wins", color: WIN_COLOR, stats: box_stats(&result.win_scores) },
            BoxGroup { label: "Losses", color: LOSS_COLOR, stats: box_stats(&result.loss_scores) },
        ],
    }
}

pub fn goal_difference(result: &AggregateResult, bins: usize) -> Histogram {
    Histogram {
        name: "goal-difference",
        title: "Goal Difference".to_string(),
        x_label: "Goals".to_string(),
        y_label: "Frequency".to_string(),
        bins: histogram_bins(&result.goal_diffs, bins),
    }
}

pub fn time_between_goals(result: &AggregateResult, bins: usize) -> Histogram {
    Histogram {
        name: "time-between-goals",
        title: "Time Between Goals".to_string(),
        x_label: "Seconds".to_string(),
        y_label: "Frequency".to_string(),
        bins: histogram_bins(&result.inter_goal_intervals_secs, bins),
    }
}

/// Draw every chart for `result` on `surface`.
pub fn render_all<S: ChartSurface + ?Sized>(
    result: &AggregateResult,
    surface: &mut S,
    bins: usize,
) -> Result<()> {
    surface.bar_chart(&wins_vs_losses(result))?;
    surface.bar_chart(&stats_breakdown(result))?;
    surface.box_plot(&score_distribution(result))?;
    surface.histogram(&goal_difference(result, bins))?;
    surface.histogram(&time_between_goals(result, bins))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Statistics helpers
// ---------------------------------------------------------------------------

/// Equal-width bins over `[min, max]`; the last bin includes its right edge.
/// A single distinct value is widened to `±0.5`, empty input spans `[0, 1]`.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<Bin> {
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if values.is_empty() {
        (lo, hi) = (0.0, 1.0);
    } else if lo == hi {
        (lo, hi) = (lo - 0.5, hi + 0.5);
    }

    let width = (hi - lo) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lo: lo + width * i as f64,
            hi: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Linear-interpolated quantile of non-empty sorted data, `p` in `[0, 1]`.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let below = pos.floor() as usize;
    let above = pos.ceil() as usize;
    sorted[below] + (sorted[above] - sorted[below]) * (pos - below as f64)
}

/// Linear-interpolated quartiles, `None` for an empty sample.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let reach = 1.5 * (q3 - q1);
    let (fence_lo, fence_hi) = (q1 - reach, q3 + reach);

    let inside: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|&v| v >= fence_lo && v <= fence_hi)
        .collect();
    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low: inside.iter().copied().fold(f64::INFINITY, f64::min),
        whisker_high: inside.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        outliers: sorted
            .iter()
            .copied()
            .filter(|&v| v < fence_lo || v > fence_hi)
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// SvgSurface
// ---------------------------------------------------------------------------

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 60.0;
const Y_TICKS: usize = 5;

/// Writes each chart as `<out_dir>/<name>.svg`.
pub struct SvgSurface {
    out_dir: PathBuf,
    width: u32,
    height: u32,
    written: Vec<PathBuf>,
}

impl SvgSurface {
    pub fn new<P: AsRef<Path>>(out_dir: P, width: u32, height: u32) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            width,
            height,
            written: Vec::new(),
        }
    }

    /// Files written so far, in drawing order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn plot_box(&self) -> (f64, f64, f64, f64) {
        let w = self.width as f64 - MARGIN_LEFT - MARGIN_RIGHT;
        let h = self.height as f64 - MARGIN_TOP - MARGIN_BOTTOM;
        (MARGIN_LEFT, MARGIN_TOP, w.max(1.0), h.max(1.0))
    }

    fn y_px(&self, v: f64, y_max: f64) -> f64 {
        let (_, y0, _, h) = self.plot_box();
        y0 + h - h * (v / y_max)
    }

    fn save(&mut self, name: &str, body: String) -> Result<()> {
        fs::create_dir_all(&self.out_dir).map_err(|source| StatsError::Io {
            path: self.out_dir.clone(),
            source,
        })?;
        let path = self.out_dir.join(format!("{name}.svg"));
        fs::write(&path, body).map_err(|source| StatsError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "saved chart");
        self.written.push(path);
        Ok(())
    }

    /// Document header, title, y-axis with ticks up to `y_max`.
    fn frame(&self, s: &mut String, title: &str, y_label: &str, y_max: f64) -> fmt::Result {
        let (x0, y0, w, h) = self.plot_box();
        writeln!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif">"#,
            self.width, self.height
        )?;
        writeln!(s, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            s,
            r#"<text x="{:.1}" y="30" font-size="20" text-anchor="middle">{}</text>"#,
            self.width as f64 / 2.0,
            escape_xml(title)
        )?;
        writeln!(
            s,
            r#"<text x="18" y="{:.1}" font-size="14" text-anchor="middle" transform="rotate(-90 18 {:.1})">{}</text>"#,
            y0 + h / 2.0,
            y0 + h / 2.0,
            escape_xml(y_label)
        )?;
        writeln!(
            s,
            r#"<line x1="{x0:.1}" y1="{y0:.1}" x2="{x0:.1}" y2="{:.1}" stroke="black"/>"#,
            y0 + h
        )?;
        writeln!(
            s,
            r#"<line x1="{x0:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
            y0 + h,
            x0 + w,
            y0 + h
        )?;
        for i in 0..=Y_TICKS {
            let v = y_max * i as f64 / Y_TICKS as f64;
            let y = y0 + h - h * i as f64 / Y_TICKS as f64;
            writeln!(
                s,
                r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{}</text>"#,
                x0 - 6.0,
                y + 4.0,
                fmt_num(v)
            )?;
        }
        Ok(())
    }

    fn bar_svg(&self, chart: &BarChart) -> std::result::Result<String, fmt::Error> {
        let y_max = axis_max(chart.bars.iter().map(|b| b.value).fold(0.0, f64::max) * 1.2);
        let (x0, y0, w, h) = self.plot_box();
        let mut s = String::new();
        self.frame(&mut s, &chart.title, &chart.y_label, y_max)?;

        let slot = w / chart.bars.len().max(1) as f64;
        for (i, bar) in chart.bars.iter().enumerate() {
            let bw = slot * 0.5;
            let x = x0 + slot * i as f64 + (slot - bw) / 2.0;
            let y = self.y_px(bar.value, y_max);
            writeln!(
                s,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{bw:.1}" height="{:.1}" fill="{}"/>"#,
                y0 + h - y,
                bar.color
            )?;
            writeln!(
                s,
                r#"<text x="{:.1}" y="{:.1}" font-size="16" text-anchor="middle">{}</text>"#,
                x + bw / 2.0,
                y - 6.0,
                fmt_num(bar.value)
            )?;
            writeln!(
                s,
                r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{}</text>"#,
                x + bw / 2.0,
                y0 + h + 22.0,
                bar.label
            )?;
        }
        s.push_str("</svg>\n");
        Ok(s)
    }

    fn box_svg(&self, chart: &BoxPlot) -> std::result::Result<String, fmt::Error> {
        let top = chart
            .groups
            .iter()
            .filter_map(|g| g.stats.as_ref())
            .map(|st| st.outliers.iter().copied().fold(st.whisker_high, f64::max))
            .fold(0.0, f64::max);
        let y_max = axis_max(top * 1.2);
        let (x0, _, w, h) = self.plot_box();
        let mut s = String::new();
        self.frame(&mut s, &chart.title, &chart.y_label, y_max)?;

        let slot = w / chart.groups.len().max(1) as f64;
        for (i, group) in chart.groups.iter().enumerate() {
            let cx = x0 + slot * (i as f64 + 0.5);
            writeln!(
                s,
                r#"<text x="{cx:.1}" y="{:.1}" font-size="14" text-anchor="middle">{}</text>"#,
                MARGIN_TOP + h + 22.0,
                group.label
            )?;
            let Some(st) = &group.stats else { continue };

            let bw = slot * 0.4;
            let (yq1, yq3) = (self.y_px(st.q1, y_max), self.y_px(st.q3, y_max));
            let (ylo, yhi) = (self.y_px(st.whisker_low, y_max), self.y_px(st.whisker_high, y_max));
            let ymed = self.y_px(st.median, y_max);
            writeln!(
                s,
                r#"<line x1="{cx:.1}" y1="{ylo:.1}" x2="{cx:.1}" y2="{yhi:.1}" stroke="black"/>"#
            )?;
            writeln!(
                s,
                r#"<rect x="{:.1}" y="{yq3:.1}" width="{bw:.1}" height="{:.1}" fill="{}" stroke="black"/>"#,
                cx - bw / 2.0,
                (yq1 - yq3).max(1.0),
                group.color
            )?;
            writeln!(
                s,
                r#"<line x1="{:.1}" y1="{ymed:.1}" x2="{:.1}" y2="{ymed:.1}" stroke="orange" stroke-width="2"/>"#,
                cx - bw / 2.0,
                cx + bw / 2.0
            )?;
            for o in &st.outliers {
                writeln!(
                    s,
                    r#"<circle cx="{cx:.1}" cy="{:.1}" r="3" fill="none" stroke="black"/>"#,
                    self.y_px(*o, y_max)
                )?;
            }
        }
        s.push_str("</svg>\n");
        Ok(s)
    }

    fn histogram_svg(&self, chart: &Histogram) -> std::result::Result<String, fmt::Error> {
        let y_max = axis_max(chart.bins.iter().map(|b| b.count).max().unwrap_or(0) as f64 * 1.1);
        let (x0, y0, w, h) = self.plot_box();
        let mut s = String::new();
        self.frame(&mut s, &chart.title, &chart.y_label, y_max)?;

        let (lo, hi) = match (chart.bins.first(), chart.bins.last()) {
            (Some(f), Some(l)) => (f.lo, l.hi),
            _ => (0.0, 1.0),
        };
        let span = if hi > lo { hi - lo } else { 1.0 };
        let x_px = |v: f64| x0 + w * (v - lo) / span;

        for bin in &chart.bins {
            let y = self.y_px(bin.count as f64, y_max);
            writeln!(
                s,
                r#"<rect x="{:.1}" y="{y:.1}" width="{:.1}" height="{:.1}" fill="{NEUTRAL_COLOR}" stroke="white"/>"#,
                x_px(bin.lo),
                x_px(bin.hi) - x_px(bin.lo),
                y0 + h - y
            )?;
        }
        for v in [lo, (lo + hi) / 2.0, hi] {
            writeln!(
                s,
                r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
                x_px(v),
                y0 + h + 16.0,
                fmt_num(v)
            )?;
        }
        writeln!(
            s,
            r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">{}</text>"#,
            x0 + w / 2.0,
            y0 + h + 40.0,
            escape_xml(&chart.x_label)
        )?;
        s.push_str("</svg>\n");
        Ok(s)
    }
}

impl ChartSurface for SvgSurface {
    fn bar_chart(&mut self, chart: &BarChart) -> Result<()> {
        let body = self.bar_svg(chart)?;
        self.save(chart.name, body)
    }

    fn box_plot(&mut self, chart: &BoxPlot) -> Result<()> {
        let body = self.box_svg(chart)?;
        self.save(chart.name, body)
    }

    fn histogram(&mut self, chart: &Histogram) -> Result<()> {
        let body = self.histogram_svg(chart)?;
        self.save(chart.name, body)
    }
}

/// Keep the y-axis non-degenerate when every value is zero.
fn axis_max(v: f64) -> f64 {
    if v > 0.0 {
        v
    } else {
        1.0
    }
}

fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v:.1}")
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
