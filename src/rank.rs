use crate::aggregate::{rank, total};
use crate::cli::CommonArgs;
use crate::collect::collect;
use crate::model::{CollectWarning, RankOutput, RankingEntry, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, top: usize, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let options = common.collect_options();
    let collection = collect(&options, common.progress)
        .context("Failed to collect repository statistics")?;

    let total = total(&collection.dataset, common.metric);
    let mut entries = rank(&collection.dataset, common.metric);
    entries.truncate(top);

    if json {
        output_json(&entries, total, &common, collection.warnings)?;
    } else if ndjson {
        output_ndjson(&entries)?;
    } else {
        output_table(&entries, total, &common)?;
    }

    Ok(())
}

fn output_json(
    entries: &[RankingEntry],
    total: u64,
    common: &CommonArgs,
    warnings: Vec<CollectWarning>,
) -> anyhow::Result<()> {
    let output = RankOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        root: common.root.to_string_lossy().to_string(),
        owner: common.owner.clone(),
        metric: common.metric,
        total,
        entries: entries.to_vec(),
        warnings,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(entries: &[RankingEntry]) -> anyhow::Result<()> {
    for e in entries {
        println!("{}", serde_json::to_string(e)?);
    }
    Ok(())
}

fn output_table(entries: &[RankingEntry], total: u64, common: &CommonArgs) -> anyhow::Result<()> {
    if entries.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!(
        "{:>4}  {:<40} {:>12}",
        style("Rank").bold(),
        style("Repository").bold(),
        style(common.metric.heading()).bold()
    );
    println!("{}", "─".repeat(58));
    for (i, e) in entries.iter().enumerate() {
        println!("{:>4}  {:<40} {:>12}", i + 1, e.repository, e.value);
    }
    println!("{}", "─".repeat(58));
    println!("{:>4}  {:<40} {:>12}", "", "All repositories", style(total).cyan());
    Ok(())
}
