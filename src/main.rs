use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use team_synergy::algorithm::search::{prepare_pool, search, token_for};
use team_synergy::utils::logging::{console, log_warning, progress};
use team_synergy::{
    BoundStrategy, CancellationToken, Catalog, SearchConfig, SearchConfigBuilder, SearchStatus,
    Searcher, Solution, ThresholdTable, load_thresholds, load_units, results_path,
    write_solutions,
};

/// Find every group of units that activates enough trait synergies
#[derive(Parser, Debug)]
#[command(name = "team-synergy")]
#[command(version)]
#[command(about = "Exhaustive search for unit groups that activate the most traits")]
struct Cli {
    /// Units JSON file: [{"Name": ..., "Trait": [...]}, ...]
    #[arg(long, env = "SYNERGY_UNITS")]
    units: PathBuf,

    /// Thresholds JSON file: {"trait": threshold, ...}
    #[arg(long, env = "SYNERGY_THRESHOLDS")]
    thresholds: PathBuf,

    /// Number of units per group [default: 7, or SYNERGY_GROUP_SIZE]
    #[arg(long)]
    group_size: Option<usize>,

    /// Minimum number of active traits [default: 8, or SYNERGY_MIN_ACTIVE_TRAITS]
    #[arg(long = "min-active")]
    min_active: Option<usize>,

    /// Directory for the results file
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Explore top-level branches in parallel
    #[arg(long)]
    parallel: bool,

    /// Prune with the slot-capped bound instead of the loose bound
    #[arg(long)]
    slot_capped_bound: bool,

    /// Keep units without activatable traits as filler members
    #[arg(long)]
    keep_traitless: bool,

    /// Cancel the search after this many seconds and save what was found
    /// [default: none, or SYNERGY_TIME_LIMIT_SECS]
    #[arg(long, value_name = "SECS")]
    time_limit: Option<u64>,

    /// Print the loaded units, thresholds and search pool
    #[arg(long)]
    show_inputs: bool,

    /// Number of groups to print after the search
    #[arg(long, default_value_t = 5)]
    show: usize,

    /// Disable progress output
    #[arg(long)]
    no_progress: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Environment defaults overridden by explicit flags
    fn search_config(&self) -> SearchConfig {
        let mut builder = SearchConfigBuilder::from_config(SearchConfig::from_env())
            .exclude_traitless_units(!self.keep_traitless)
            .use_parallel(self.parallel)
            .show_progress(!self.no_progress);
        if let Some(size) = self.group_size {
            builder = builder.group_size(size);
        }
        if let Some(min) = self.min_active {
            builder = builder.min_active_traits(min);
        }
        if self.slot_capped_bound {
            builder = builder.bound_strategy(BoundStrategy::SlotCapped);
        }
        if let Some(secs) = self.time_limit {
            builder = builder.time_limit(Duration::from_secs(secs));
        }
        builder.build()
    }
}

struct RunReport {
    found: usize,
    status: SearchStatus,
    elapsed: Duration,
    output: PathBuf,
    samples: Vec<Solution>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let catalog = load_units(&cli.units)
        .with_context(|| format!("Invalid units file {}", cli.units.display()))?;
    let thresholds = load_thresholds(&cli.thresholds)
        .with_context(|| format!("Invalid thresholds file {}", cli.thresholds.display()))?;

    if cli.show_inputs {
        console::print_catalog(&catalog);
        console::print_thresholds(&thresholds);
    }

    let config = cli.search_config();
    info!("{}", config.to_string().trim_end());

    let token = token_for(&config);
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling search");
            interrupt.cancel();
        }
    });

    let output = results_path(&cli.output_dir, config.group_size);
    let show_inputs = cli.show_inputs;
    let sample_limit = cli.show;
    info!("Starting search...");
    let report = tokio::task::spawn_blocking(move || {
        run_search(
            &catalog,
            &thresholds,
            &config,
            &token,
            &output,
            sample_limit,
            show_inputs,
        )
    })
    .await
    .context("Search worker failed")??;

    console::print_run_summary(report.found, report.elapsed, report.status);
    console::print_sample_solutions(&report.samples, sample_limit);
    println!("Results saved to {}", report.output.display());
    if report.status == SearchStatus::Cancelled {
        log_warning(
            &format!("Saved {} groups from an incomplete search to", report.found),
            Some(&report.output),
        );
    }

    Ok(())
}

/// Filter, search and persist on the worker thread
fn run_search(
    catalog: &Catalog,
    thresholds: &ThresholdTable,
    config: &SearchConfig,
    token: &CancellationToken,
    output: &Path,
    sample_limit: usize,
    show_pool: bool,
) -> Result<RunReport> {
    let start = Instant::now();
    let pool = prepare_pool(catalog, thresholds, config)?;
    if show_pool {
        console::print_pool(&pool);
    }

    if config.use_parallel {
        let outcome = search(&pool, config, token)?;
        let samples = outcome.solutions.iter().take(sample_limit).cloned().collect();
        let found = write_solutions(output, outcome.solutions)?;
        return Ok(RunReport {
            found,
            status: outcome.status,
            elapsed: start.elapsed(),
            output: output.to_path_buf(),
            samples,
        });
    }

    // Sequential runs stream groups straight into the results file
    let searcher = Searcher::new(&pool, config)?;
    let spinner = if config.show_progress {
        progress::create_spinner(Some("Searching groups"))
    } else {
        progress::hidden()
    };
    let mut samples = Vec::with_capacity(sample_limit);
    let mut iter = searcher.solutions(token.clone());
    let found = write_solutions(
        output,
        iter.by_ref().inspect(|solution| {
            if samples.len() < sample_limit {
                samples.push(solution.clone());
            }
            spinner.inc(1);
        }),
    )?;
    progress::finish_progress_bar(&spinner, Some(&format!("Found {found} groups")));
    let stats = iter.stats();
    info!(
        "Visited {} nodes, pruned {} branches, evaluated {} full groups",
        stats.nodes_visited, stats.branches_pruned, stats.groups_evaluated
    );

    Ok(RunReport {
        found,
        status: iter.status().unwrap_or(SearchStatus::Complete),
        elapsed: start.elapsed(),
        output: output.to_path_buf(),
        samples,
    })
}
