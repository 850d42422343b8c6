//! Bar chart of ranked results, rendered to a PNG with `plotters`.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::display::format_seconds;
use crate::errors::BenchError;
use crate::types::{RankedRow, SystemInfo};

const WIDTH: u32 = 1800;
const HEIGHT: u32 = 900;
const CAPTION_HEIGHT: u32 = 40;
const TITLE: &str = "Benchmark Results: Execution Time Comparison";
const FONT: &str = "sans-serif";
const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);

/// Upper bound of the y axis: headroom above the tallest bar for its label.
pub fn y_axis_max(rows: &[RankedRow]) -> f64 {
    let tallest = rows.iter().map(|r| r.mean_secs).fold(0.0_f64, f64::max);
    if tallest > 0.0 { tallest * 1.15 } else { 1.0 }
}

/// Draws one bar per row, in the order given, to `path`.
///
/// The parent directory of `path` must already exist.
pub fn render_chart(path: &Path, rows: &[RankedRow], system: &SystemInfo) -> Result<(), BenchError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(BenchError::ChartDirMissing {
            path: parent.to_path_buf(),
        });
    }

    draw(path, rows, system).map_err(|e| BenchError::ChartRender {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

fn draw(
    path: &Path,
    rows: &[RankedRow],
    system: &SystemInfo,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (plot_area, caption_area) = root.split_vertically(HEIGHT - CAPTION_HEIGHT);
    caption_area.draw_text(
        &format!("System: {}", system),
        &TextStyle::from((FONT, 16).into_font()).pos(Pos::new(HPos::Center, VPos::Center)),
        ((WIDTH / 2) as i32, (CAPTION_HEIGHT / 2) as i32),
    )?;

    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i).map(|s| s.to_string()).unwrap_or_default(),
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(TITLE, (FONT, 32).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(240)
        .y_label_area_size(90)
        .build_cartesian_2d((0..rows.len()).into_segmented(), 0.0..y_axis_max(rows))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len().max(1))
        .x_label_formatter(&label_of)
        .x_label_style((FONT, 16).into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .x_desc("Language / Compiler")
        .y_desc("Execution Time (seconds)")
        .axis_desc_style((FONT, 20).into_font().style(FontStyle::Bold))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BAR_COLOR.filled())
            .margin(24)
            .data(rows.iter().enumerate().map(|(i, r)| (i, r.mean_secs))),
    )?;

    let value_style = TextStyle::from((FONT, 16).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
        Text::new(
            format_seconds(r.mean_secs),
            (SegmentValue::CenterOf(i), r.mean_secs),
            value_style.clone(),
        )
    }))?;

    root.present()?;
    tracing::debug!(path = %path.display(), bars = rows.len(), "chart written");
    Ok(())
}
