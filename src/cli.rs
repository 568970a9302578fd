use crate::collect::{CollectOptions, Layout};
use crate::model::Metric;
use crate::report::ReportArgs;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clonetally")]
#[command(about = "Aggregate per-repository clone statistics into a profile report")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, help = "Root directory holding the statistics files", default_value = "repo-stats-data")]
    pub root: PathBuf,

    #[arg(long, help = "Account owning the repositories")]
    pub owner: String,

    #[arg(long, value_enum, help = "How repositories are laid out below the root", default_value_t = Layout::Recursive)]
    pub layout: Layout,

    #[arg(long, help = "Name of each repository's statistics file", default_value = "views_clones_aggregate.csv")]
    pub stats_file: String,

    #[arg(long, help = "Per-repository sub-directory holding the statistics file (flat layout)", default_value = "ghrs-data")]
    pub stats_dir: String,

    #[arg(long, value_enum, help = "Metric to sum and rank by", default_value_t = Metric::ClonesTotal)]
    pub metric: Metric,

    #[arg(long, help = "Show progress while reading statistics files", default_value_t = false)]
    pub progress: bool,

    #[arg(long, help = "Log filter used when RUST_LOG is unset", default_value = "warn")]
    pub log_level: String,
}

impl CommonArgs {
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            root: self.root.clone(),
            owner: self.owner.clone(),
            layout: self.layout,
            stats_file: self.stats_file.clone(),
            stats_dir: self.stats_dir.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the profile document
    Report {
        #[arg(long, help = "Report file to write", default_value = "README.md")]
        output: PathBuf,

        #[arg(long, help = "Number of repositories in the table", default_value_t = 5)]
        top: usize,

        #[arg(long, help = "Name used in the greeting (defaults to the owner)")]
        name: Option<String>,

        #[arg(long, help = "Render the daily series to this SVG file and embed it")]
        chart: Option<PathBuf>,

        #[arg(long, help = "Print the document instead of writing it")]
        stdout: bool,
    },
    /// Rank repositories by the chosen metric
    Rank {
        #[arg(long, help = "Number of repositories to show", default_value_t = 10)]
        top: usize,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Show the metric summed per day
    Series {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Report { output, top, name, chart, stdout } => crate::report::exec(
                self.common,
                ReportArgs {
                    output,
                    top,
                    name,
                    chart,
                    stdout,
                },
            ),
            Commands::Rank { top, json, ndjson } => crate::rank::exec(self.common, top, json, ndjson),
            Commands::Series { json, ndjson } => crate::series::exec(self.common, json, ndjson),
        }
    }
}
