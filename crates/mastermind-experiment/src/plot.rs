//! SVG charts of a finished sweep.
//!
//! For one fixed code length two charts are drawn, both with alphabet size on
//! the x axis and one error-barred series per strategy:
//! - mean guesses ± std (`guesses-L{L}.svg`)
//! - mean runtime ± std in seconds (`runtime-L{L}.svg`)

use std::error::Error;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use plotters::prelude::*;
use tracing::{info, warn};

use crate::results::{AggregateStat, ResultTable};

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Which aggregate a chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Guesses,
    Runtime,
}

impl Metric {
    fn file_stem(self) -> &'static str {
        match self {
            Metric::Guesses => "guesses",
            Metric::Runtime => "runtime",
        }
    }

    fn title(self, code_length: usize) -> String {
        match self {
            Metric::Guesses => format!("Number of guesses (code length {code_length})"),
            Metric::Runtime => format!("Execution time (code length {code_length})"),
        }
    }

    fn axis_label(self) -> &'static str {
        match self {
            Metric::Guesses => "mean guesses",
            Metric::Runtime => "mean runtime (s)",
        }
    }

    /// `(mean, std)` of this metric.
    fn value(self, stat: &AggregateStat) -> (f64, f64) {
        match self {
            Metric::Guesses => (stat.mean_guesses, stat.std_guesses),
            Metric::Runtime => (stat.mean_runtime, stat.std_runtime),
        }
    }
}

/// Points of one strategy: `(alphabet size, mean, std)` in sweep order.
type Series<'a> = (&'a str, Vec<(f64, f64, f64)>);

fn collect_series(table: &ResultTable, code_length: usize, metric: Metric) -> Vec<Series<'_>> {
    table
        .series_for_code_length(code_length)
        .into_iter()
        .filter(|(_, stats)| !stats.is_empty())
        .map(|(name, stats)| {
            let points = stats
                .into_iter()
                .map(|s| {
                    let (mean, std) = metric.value(s);
                    (s.configuration.alphabet_size() as f64, mean, std)
                })
                .collect();
            (name, points)
        })
        .collect()
}

/// Draw both charts for `code_length` into `out_dir`.
///
/// Returns the written paths; nothing is written when no aggregate has that
/// code length.
pub fn render_charts(
    table: &ResultTable,
    code_length: usize,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    if collect_series(table, code_length, Metric::Guesses).is_empty() {
        warn!(code_length, "No results at this code length, skipping charts");
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create chart directory {}", out_dir.display()))?;

    let mut written = Vec::new();
    for metric in [Metric::Guesses, Metric::Runtime] {
        let path = out_dir.join(format!("{}-L{code_length}.svg", metric.file_stem()));
        let series = collect_series(table, code_length, metric);
        draw_chart(&path, &metric.title(code_length), metric.axis_label(), &series)
            .map_err(|e| anyhow!("failed to render {}: {e}", path.display()))?;
        info!(path = %path.display(), "Chart written");
        written.push(path);
    }
    Ok(written)
}

fn draw_chart(
    path: &Path,
    title: &str,
    y_label: &str,
    series: &[Series<'_>],
) -> Result<(), Box<dyn Error>> {
    let points = series.iter().flat_map(|(_, p)| p.iter());
    let (mut x_min, mut x_max, mut y_max) = (f64::MAX, f64::MIN, 0.0_f64);
    for &(x, mean, std) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_max = y_max.max(mean + std);
    }
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((x_min - 0.5)..(x_max + 0.5), 0.0..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("alphabet size")
        .y_desc(y_label)
        .draw()?;

    for (idx, (name, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|&(x, mean, _)| (x, mean)),
                color.stroke_width(2),
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart.draw_series(points.iter().map(|&(x, mean, std)| {
            ErrorBar::new_vertical(x, mean - std, mean, mean + std, color.filled(), 8)
        }))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
