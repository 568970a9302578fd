use super::{render, render_chart, ReportContext};
use crate::aggregate::aggregate;
use crate::cli::CommonArgs;
use crate::collect::collect;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub output: PathBuf,
    pub top: usize,
    pub name: Option<String>,
    pub chart: Option<PathBuf>,
    pub stdout: bool,
}

pub fn exec(common: CommonArgs, args: ReportArgs) -> anyhow::Result<()> {
    let options = common.collect_options();
    let collection = collect(&options, common.progress)
        .context("Failed to collect repository statistics")?;

    let Some(result) = aggregate(&collection.dataset, common.metric, args.top, args.chart.is_some()) else {
        println!("No data found. Exiting.");
        return Ok(());
    };

    let chart = match (&args.chart, &result.daily_series) {
        (Some(path), Some(series)) => {
            render_chart(series, common.metric, path)
                .with_context(|| format!("Failed to render chart {}", path.display()))?;
            info!(path = %path.display(), points = series.len(), "chart written");
            Some(path.to_string_lossy().to_string())
        }
        _ => None,
    };

    let ctx = ReportContext {
        name: args.name.unwrap_or_else(|| common.owner.clone()),
        owner: common.owner,
        chart,
        generated_at: Utc::now(),
    };
    let document = render(&result, &ctx);

    if args.stdout {
        println!("{document}");
        return Ok(());
    }

    std::fs::write(&args.output, &document)
        .with_context(|| format!("Failed to write report {}", args.output.display()))?;

    println!(
        "{} {} ({} records, {} skipped sources)",
        style("Report written to").bold(),
        style(args.output.display()).cyan(),
        collection.dataset.len(),
        collection.warnings.len()
    );
    Ok(())
}
