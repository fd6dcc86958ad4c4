//! Chart descriptions, binning, box statistics and SVG output.

mod common;

use std::fs;

use replaystats::aggregate;
use replaystats::chart::{
    box_stats, histogram_bins, render_all, score_distribution, stats_breakdown,
    wins_vs_losses, BarChart, BoxPlot, ChartSurface, Histogram, SvgSurface,
};
use replaystats::error::Result;

/// Records which charts were requested, without drawing anything.
#[derive(Default)]
struct Recorder {
    names: Vec<&'static str>,
    histograms: Vec<Histogram>,
}

impl ChartSurface for Recorder {
    fn bar_chart(&mut self, chart: &BarChart) -> Result<()> {
        self.names.push(chart.name);
        Ok(())
    }
    fn box_plot(&mut self, chart: &BoxPlot) -> Result<()> {
        self.names.push(chart.name);
        Ok(())
    }
    fn histogram(&mut self, chart: &Histogram) -> Result<()> {
        self.names.push(chart.name);
        self.histograms.push(chart.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

#[test]
fn render_all_requests_five_charts_in_order() {
    let result = aggregate(&common::season());
    let mut rec = Recorder::default();
    render_all(&result, &mut rec, 4).unwrap();

    assert_eq!(
        rec.names,
        vec![
            "wins-vs-losses",
            "stats",
            "score-distribution",
            "goal-difference",
            "time-between-goals"
        ]
    );
    let goal_diff_total: usize = rec.histograms[0].bins.iter().map(|b| b.count).sum();
    assert_eq!(goal_diff_total, result.goal_diffs.len());
    assert_eq!(rec.histograms[1].bins.len(), 4);
}

#[test]
fn bar_charts_follow_aggregate() {
    let result = aggregate(&common::season());

    let wl: Vec<f64> = wins_vs_losses(&result).bars.iter().map(|b| b.value).collect();
    assert_eq!(wl, vec![3.0, 2.0]);

    let stats = stats_breakdown(&result);
    let labels: Vec<&str> = stats.bars.iter().map(|b| b.label).collect();
    assert_eq!(labels, vec!["Saves", "Goals", "Shots", "Assists"]);
    let values: Vec<f64> = stats.bars.iter().map(|b| b.value).collect();
    assert_eq!(values, vec![3.0, 1.0, 3.0, 2.0]);
}

#[test]
fn score_box_plot_handles_empty_group() {
    let result = aggregate(&[common::ace_match(0, 3, 0, 400)]);
    let plot = score_distribution(&result);
    assert!(plot.groups[0].stats.is_some());
    assert!(plot.groups[1].stats.is_none());
    assert!(plot.title.starts_with("Ace's"));
}

// ---------------------------------------------------------------------------
// Statistics helpers
// ---------------------------------------------------------------------------

#[test]
fn histogram_bins_cover_range_and_count_everything() {
    let values = [1.0, 2.0, 2.5, 4.0, 9.0, 11.0];
    let bins = histogram_bins(&values, 5);
    assert_eq!(bins.len(), 5);
    assert_eq!(bins[0].lo, 1.0);
    assert_eq!(bins[4].hi, 11.0);
    assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![3, 1, 0, 0, 2]);
}

#[test]
fn histogram_of_single_value_is_widened() {
    let bins = histogram_bins(&[3.0, 3.0], 10);
    assert_eq!(bins[0].lo, 2.5);
    assert_eq!(bins[9].hi, 3.5);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
}

#[test]
fn histogram_of_nothing_is_empty_unit_range() {
    let bins = histogram_bins(&[], 10);
    assert_eq!(bins.len(), 10);
    assert!(bins.iter().all(|b| b.count == 0));
    assert_eq!((bins[0].lo, bins[9].hi), (0.0, 1.0));
}

#[test]
fn box_stats_interpolates_quartiles_linearly() {
    let st = box_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    assert_eq!((st.q1, st.median, st.q3), (1.75, 2.5, 3.25));
    assert_eq!((st.whisker_low, st.whisker_high), (1.0, 4.0));
    assert!(st.outliers.is_empty());

    let single = box_stats(&[7.0]).unwrap();
    assert_eq!((single.q1, single.median, single.q3), (7.0, 7.0, 7.0));
}

#[test]
fn box_stats_flags_outliers() {
    let st = box_stats(&[10.0, 12.0, 11.0, 13.0, 100.0]).unwrap();
    assert_eq!(st.median, 12.0);
    assert_eq!((st.q1, st.q3), (11.0, 13.0));
    assert_eq!(st.whisker_low, 10.0);
    assert_eq!(st.whisker_high, 13.0);
    assert_eq!(st.outliers, vec![100.0]);
    assert!(box_stats(&[]).is_none());
}

// ---------------------------------------------------------------------------
// SvgSurface
// ---------------------------------------------------------------------------

#[test]
fn svg_surface_writes_one_file_per_chart() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("charts");
    let result = aggregate(&common::season());

    let mut svg = SvgSurface::new(&out, 640, 480);
    render_all(&result, &mut svg, 10).unwrap();

    assert_eq!(svg.written().len(), 5);
    for stem in [
        "wins-vs-losses",
        "stats",
        "score-distribution",
        "goal-difference",
        "time-between-goals",
    ] {
        let body = fs::read_to_string(out.join(format!("{stem}.svg"))).unwrap();
        assert!(body.starts_with("<svg"));
        assert!(body.trim_end().ends_with("</svg>"));
    }
    let wl = fs::read_to_string(out.join("wins-vs-losses.svg")).unwrap();
    assert!(wl.contains("Wins vs. losses"));
    assert!(wl.contains("#7B9F35"));
}

#[test]
fn svg_surface_copes_with_empty_aggregate() {
    let tmp = tempfile::tempdir().unwrap();
    let mut svg = SvgSurface::new(tmp.path(), 320, 240);
    render_all(&aggregate(&[]), &mut svg, 10).unwrap();
    assert_eq!(svg.written().len(), 5);
    let body = fs::read_to_string(tmp.path().join("score-distribution.svg")).unwrap();
    assert!(body.contains("Player&apos;s Score Distribution"));
}
