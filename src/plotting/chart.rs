use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;

use super::styles::{ChartStyle, ChartTheme};
use crate::error::{GitalyzerError, Result};
use crate::types::{ContributorSeries, Report, RetentionPoint, YearlyActivity};

type PlotError = Box<dyn Error + Send + Sync>;
type YearChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub const TOTAL_CONTRIBUTIONS_FILE: &str = "total_contributions.png";
pub const TOTAL_CONTRIBUTORS_FILE: &str = "total_contributors.png";
pub const TOP_CONTRIBUTORS_FILE: &str = "top_contributors.png";
pub const RETENTION_FILE: &str = "contributor_retention.png";

const BAR_HALF_WIDTH: f64 = 0.4;
const MAX_X_LABELS: usize = 20;

/// Axis setup shared by every chart: one x slot per year label.
struct Frame<'s> {
    caption: &'s str,
    y_desc: &'s str,
    labels: &'s [String],
    y_range: Range<f64>,
}

/// Render all four charts into `out_dir`, returning the written paths.
pub fn render_report(
    report: &Report,
    out_dir: &Path,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> Result<Vec<PathBuf>> {
    let targets: [(&str, &dyn Fn(&Path) -> std::result::Result<(), PlotError>); 4] = [
        (TOTAL_CONTRIBUTIONS_FILE, &|path: &Path| {
            render_total_contributions(&report.activity, path, style, theme)
        }),
        (TOTAL_CONTRIBUTORS_FILE, &|path: &Path| {
            render_total_contributors(&report.activity, path, style, theme)
        }),
        (TOP_CONTRIBUTORS_FILE, &|path: &Path| {
            render_top_contributors(
                &report.contributor_years,
                &report.contributor_series,
                path,
                style,
                theme,
            )
        }),
        (RETENTION_FILE, &|path: &Path| {
            render_retention(&report.retention, path, style, theme)
        }),
    ];

    let mut written = Vec::with_capacity(targets.len());
    for (file_name, render) in targets {
        let path = out_dir.join(file_name);
        render(path.as_path())
            .map_err(|e| GitalyzerError::Render(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "saved chart");
        written.push(path);
    }
    Ok(written)
}

/// Render the report on a blocking worker thread.
pub async fn render_report_async(
    report: Report,
    out_dir: PathBuf,
    style: ChartStyle,
    theme: ChartTheme,
) -> Result<Vec<PathBuf>> {
    spawn_blocking(move || render_report(&report, &out_dir, &style, &theme)).await?
}

/// Bar chart of commits per year.
pub fn render_total_contributions(
    activity: &YearlyActivity,
    path: &Path,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> std::result::Result<(), PlotError> {
    render_yearly_bars(
        "Total Contributions Over Time",
        "Commits",
        &activity.years,
        &activity.total_commits,
        path,
        style,
        theme,
    )
}

/// Bar chart of distinct contributors per year.
pub fn render_total_contributors(
    activity: &YearlyActivity,
    path: &Path,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> std::result::Result<(), PlotError> {
    render_yearly_bars(
        "Total Contributors Over Time",
        "Contributors",
        &activity.years,
        &activity.total_contributors,
        path,
        style,
        theme,
    )
}

fn render_yearly_bars(
    caption: &str,
    y_desc: &str,
    years: &[i32],
    values: &[usize],
    path: &Path,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> std::result::Result<(), PlotError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color)?;

    let labels = year_labels(years);
    let max = values.iter().copied().max().unwrap_or(0);
    let frame = Frame {
        caption,
        y_desc,
        labels: &labels,
        y_range: 0.0..with_headroom(max),
    };
    let mut chart = build_chart(&root, &frame, style, theme)?;

    let color = theme.bar_color;
    chart.draw_series(values.iter().enumerate().map(|(i, value)| {
        let x = i as f64;
        Rectangle::new(
            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *value as f64)],
            color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// One line per ranked contributor across the shared year axis.
pub fn render_top_contributors(
    years: &[i32],
    series: &[ContributorSeries],
    path: &Path,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> std::result::Result<(), PlotError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color)?;

    let labels = year_labels(years);
    let max = series
        .iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0);
    let caption = format!("Top {} Contributors by Year", series.len());
    let frame = Frame {
        caption: &caption,
        y_desc: "Commits",
        labels: &labels,
        y_range: 0.0..with_headroom(max),
    };
    let mut chart = build_chart(&root, &frame, style, theme)?;

    for (idx, contributor) in series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        let points = contributor
            .counts
            .iter()
            .enumerate()
            .map(|(i, count)| (i as f64, *count as f64));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(style.line_width)))?
            .label(format!("{} ({})", contributor.author, contributor.total))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if !series.is_empty() {
        draw_legend(&mut chart, style, theme)?;
    }

    root.present()?;
    Ok(())
}

/// Additions above the zero line, dropoffs below it.
pub fn render_retention(
    points: &[RetentionPoint],
    path: &Path,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> std::result::Result<(), PlotError> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&theme.background_color)?;

    let years: Vec<i32> = points.iter().map(|p| p.year).collect();
    let labels = year_labels(&years);
    let max_added = points.iter().map(|p| p.additions).max().unwrap_or(0);
    let max_dropped = points.iter().map(|p| p.dropoffs).max().unwrap_or(0);
    let frame = Frame {
        caption: "Yearly Contributor Additions and Dropoffs",
        y_desc: "Contributors",
        labels: &labels,
        y_range: -with_headroom(max_dropped)..with_headroom(max_added),
    };
    let mut chart = build_chart(&root, &frame, style, theme)?;

    let added_color = theme.additions_color;
    chart
        .draw_series(points.iter().enumerate().map(|(i, p)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, p.additions as f64)],
                added_color.filled(),
            )
        }))?
        .label("Additions")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], added_color.filled()));

    let dropped_color = theme.dropoffs_color;
    chart
        .draw_series(points.iter().enumerate().map(|(i, p)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, -(p.dropoffs as f64))],
                dropped_color.filled(),
            )
        }))?
        .label("Dropoffs")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], dropped_color.filled()));

    let x_max = labels.len().max(1) as f64 - 0.5;
    let zero_line_style = ShapeStyle::from(&theme.axis_color).stroke_width(2);
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(-0.5, 0.0), (x_max, 0.0)],
        zero_line_style,
    )))?;

    draw_legend(&mut chart, style, theme)?;

    root.present()?;
    Ok(())
}

fn build_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    frame: &Frame,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> std::result::Result<YearChart<'a, 'b>, PlotError> {
    let slots = frame.labels.len().max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(
            frame.caption,
            ("sans-serif", f64::from(style.caption_size))
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), frame.y_range.clone())?;

    // Thin out labels on long histories so they don't overlap
    let stride = frame.labels.len().div_ceil(MAX_X_LABELS).max(1);
    let labels = frame.labels;
    let x_label_formatter = move |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        let idx = idx as usize;
        if idx % stride != 0 {
            return String::new();
        }
        labels.get(idx).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_labels(slots)
        .y_desc(frame.y_desc)
        .label_style(
            ("sans-serif", f64::from(style.font_size))
                .into_font()
                .color(&theme.text_color),
        )
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&|y: &f64| format_count(*y))
        .draw()?;

    Ok(chart)
}

fn draw_legend<'a, 'b: 'a>(
    chart: &mut YearChart<'a, 'b>,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> std::result::Result<(), PlotError> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(theme.background_color.mix(0.8))
        .border_style(theme.axis_color)
        .label_font(
            ("sans-serif", f64::from(style.font_size))
                .into_font()
                .color(&theme.text_color),
        )
        .draw()?;
    Ok(())
}

fn year_labels(years: &[i32]) -> Vec<String> {
    years.iter().map(|year| year.to_string()).collect()
}

/// Upper axis bound leaving room above the tallest value; never below 1.
fn with_headroom(max: usize) -> f64 {
    (max as f64 * 1.1).max(1.0)
}

/// Use K/M formatting for large numbers
fn format_count(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_with_headroom() {
        assert_eq!(with_headroom(0), 1.0);
        assert!((with_headroom(10) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(12.0), "12");
        assert_eq!(format_count(-3.0), "-3");
        assert_eq!(format_count(1_500.0), "1.5K");
        assert_eq!(format_count(2_000_000.0), "2.0M");
    }

    #[test]
    fn test_year_labels() {
        assert_eq!(year_labels(&[1999, 2000]), vec!["1999", "2000"]);
        assert!(year_labels(&[]).is_empty());
    }
}
