//! donorgraph CLI
//!
//! # Usage
//!
//! ```bash
//! # Project two cycles with every configured metric
//! cargo run --bin donorgraph --release -- --config donorgraph.yaml project --years 1980 1982
//!
//! # Prune the cosine and jaccard matrices
//! cargo run --bin donorgraph --release -- prune --years 1980 --metrics cosine jaccard
//!
//! # Donor features over a pruned graph
//! cargo run --bin donorgraph --release -- features --years 1980 --graph 1980.cosine_percent_0.1
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use donorgraph_core::config::DonorgraphConfig;
use donorgraph_core::features::projection::Metric;
use donorgraph_core::pipeline::{AnalysisPipeline, ProjectionPipeline, PruningPipeline, RunReport};
use donorgraph_storage::SqliteContributionStore;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "donorgraph")]
#[command(about = "Donor similarity graphs from campaign contribution records", long_about = None)]
struct Cli {
    /// YAML configuration (version 1); defaults apply without one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// trace, debug, info, warn or error; RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project cycles onto donors and persist one matrix per metric
    Project {
        #[arg(short, long, num_args = 1.., required = true)]
        years: Vec<i64>,
    },

    /// Prune persisted matrices by the configured percents and thresholds
    Prune {
        #[arg(short, long, num_args = 1.., required = true)]
        years: Vec<i64>,

        /// Defaults to the configured projection metrics
        #[arg(short, long, num_args = 1..)]
        metrics: Vec<Metric>,
    },

    /// Per-donor features over a persisted graph
    Features {
        #[arg(short, long, num_args = 1.., required = true)]
        years: Vec<i64>,

        /// Graph artifact name; `{year}` is replaced per cycle
        #[arg(short, long, default_value = "{year}.graph")]
        graph: String,
    },

    /// Pearson correlation between the persisted metric matrices
    Correlate {
        #[arg(short, long, num_args = 1.., required = true)]
        years: Vec<i64>,
    },

    /// Structural checks of each cycle's bipartite graph
    Validate {
        #[arg(short, long, num_args = 1.., required = true)]
        years: Vec<i64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let config = match &cli.config {
        Some(path) => DonorgraphConfig::from_yaml(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DonorgraphConfig::default(),
    };

    match cli.command {
        Commands::Project { years } => {
            let report = ProjectionPipeline::new(&config)?.run_years(&years);
            finish(report)?;
        }
        Commands::Prune { years, metrics } => {
            let metrics = if metrics.is_empty() {
                config.projection.metrics.clone()
            } else {
                Metric::dedup(&metrics)
            };
            finish(PruningPipeline::new(&config).run_all(&years, &metrics))?;
        }
        Commands::Features { years, graph } => {
            let analysis = AnalysisPipeline::new(&config);
            for year in years {
                let store = open_store(&config, year)?;
                let name = graph.replace("{year}", &year.to_string());
                let features = analysis.features(year, &name, &store)?;
                let connected = features.iter().filter(|f| f.degree > 0).count();
                println!(
                    "{}: {} donors, {} with at least one neighbor",
                    name,
                    features.len(),
                    connected
                );
            }
        }
        Commands::Correlate { years } => {
            let analysis = AnalysisPipeline::new(&config);
            for year in years {
                let corr = analysis.correlate(year, &config.projection.metrics)?;
                println!("{} ({} aligned entries)", year, corr.samples);
                println!("{}", corr);
            }
        }
        Commands::Validate { years } => {
            let mut invalid = 0;
            for year in years {
                let store = open_store(&config, year)?;
                let (report, stats) = AnalysisPipeline::validate(&store)?;
                println!(
                    "{}: {} donations, {} skipped, {} issues",
                    year,
                    stats.donations,
                    stats.skipped_transactions,
                    report.issue_count()
                );
                if !report.is_valid() {
                    invalid += 1;
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
            if invalid > 0 {
                bail!("{} cycles failed validation", invalid);
            }
        }
    }

    Ok(())
}

fn open_store(config: &DonorgraphConfig, year: i64) -> anyhow::Result<SqliteContributionStore> {
    let path = config.database_path(year);
    SqliteContributionStore::open(&path, config.schema.clone())
        .with_context(|| format!("opening cycle database {}", path.display()))
}

fn finish(report: RunReport) -> anyhow::Result<()> {
    info!(
        "{} units succeeded in {}ms",
        report.succeeded(),
        report.total_elapsed().as_millis()
    );
    let failed: Vec<_> = report.failures().collect();
    if failed.is_empty() {
        return Ok(());
    }
    for outcome in &failed {
        if let Err(e) = &outcome.result {
            eprintln!("{}", e);
        }
    }
    bail!("{} of {} units failed", failed.len(), report.outcomes().len())
}

fn setup_logging(log_level: &Option<String>) {
    let level = match log_level.as_deref().map(str::to_lowercase).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
