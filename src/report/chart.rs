use crate::error::{ProfileError, Result};
use crate::model::{DailyPoint, Metric};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

const LINE_COLOR: RGBColor = RGBColor(0x4F, 0x9F, 0xEF);
const SIZE: (u32, u32) = (1000, 500);

fn chart_err<E: std::fmt::Display>(e: E) -> ProfileError {
    ProfileError::Chart(e.to_string())
}

pub fn title(metric: Metric) -> &'static str {
    match metric {
        Metric::ClonesTotal => "Total Repository Clones Over Time",
        Metric::ClonesUnique => "Unique Repository Cloners Over Time",
    }
}

/// Render the daily series as a dark themed SVG line chart with a transparent background.
pub fn render_chart(series: &[DailyPoint], metric: Metric, path: &Path) -> Result<()> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.day, last.day),
        _ => return Err(ProfileError::Chart("no data points to plot".to_string())),
    };
    // a single day still needs a non-empty x range
    let last = if last == first { last + Duration::days(1) } else { last };
    let max = series.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    let y_max = max + max / 10 + 1;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();

    let mut chart = ChartBuilder::on(&root)
        .caption(title(metric), ("sans-serif", 24).into_font().color(&WHITE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, 0u64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(WHITE.mix(0.3))
        .axis_style(WHITE)
        .x_desc("Date")
        .y_desc("Number of Clones")
        .label_style(("sans-serif", 14).into_font().color(&WHITE))
        .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            AreaSeries::new(series.iter().map(|p| (p.day, p.value)), 0u64, LINE_COLOR.mix(0.3))
                .border_style(LINE_COLOR.stroke_width(2)),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}
