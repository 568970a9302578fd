use crate::aggregate::daily_series;
use crate::cli::CommonArgs;
use crate::collect::collect;
use crate::model::{CollectWarning, DailyPoint, SeriesOutput, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let options = common.collect_options();
    let collection = collect(&options, common.progress)
        .context("Failed to collect repository statistics")?;

    let points = daily_series(&collection.dataset, common.metric);

    if json {
        output_json(&points, &common, collection.warnings)?;
    } else if ndjson {
        output_ndjson(&points)?;
    } else {
        output_bars(&points, &common)?;
    }

    Ok(())
}

fn output_json(points: &[DailyPoint], common: &CommonArgs, warnings: Vec<CollectWarning>) -> anyhow::Result<()> {
    let output = SeriesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        root: common.root.to_string_lossy().to_string(),
        owner: common.owner.clone(),
        metric: common.metric,
        points: points.to_vec(),
        warnings,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(points: &[DailyPoint]) -> anyhow::Result<()> {
    for point in points {
        println!("{}", serde_json::to_string(point)?);
    }
    Ok(())
}

fn output_bars(points: &[DailyPoint], common: &CommonArgs) -> anyhow::Result<()> {
    if points.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    let max = points.iter().map(|p| p.value).max().unwrap_or(1).max(1);

    println!("{} ({})", style("Daily Clone Activity").bold(), common.metric);
    println!("{}", "─".repeat(50));

    for point in points {
        let width = ((point.value as f64 / max as f64) * 30.0).round() as usize;
        println!(
            "{} {:<30} {:>6}",
            point.day.format("%Y-%m-%d"),
            style("█".repeat(width)).blue(),
            point.value
        );
    }

    Ok(())
}
