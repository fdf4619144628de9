//! Mastermind benchmark CLI.
//!
//! Commands:
//! - sweep: Run every strategy over the configuration grid
//! - generate: Draw and print one secret code
//! - strategies: List the registered strategies

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mastermind_experiment::experiment::SweepRunner;
use mastermind_experiment::generator::generate_secret;
use mastermind_experiment::plot::render_charts;
use mastermind_experiment::registry::StrategyRegistry;
use mastermind_experiment::report::{ConsoleReporter, write_result_table};
use mastermind_experiment::results::ResultTable;
use mastermind_kernel::{Configuration, SweepConfig};

/// Generate a timestamped output path from the given path.
/// e.g., "results.json" -> "results-20260108-010530.json"
fn timestamped_path(path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("results");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("json");
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}-{}.{}", stem, timestamp, ext))
}

#[derive(Parser)]
#[command(name = "mastermind-experiment")]
#[command(version)]
#[command(about = "Benchmark Mastermind solving strategies")]
struct Cli {
    /// Sweep configuration file (JSON); command-line flags override it
    #[arg(long, global = true, env = "MASTERMIND_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark sweep
    Sweep {
        /// Alphabet sizes to sweep (comma-separated)
        #[arg(long, value_delimiter = ',')]
        alphabet_sizes: Option<Vec<usize>>,

        /// Code lengths to sweep (comma-separated)
        #[arg(long, value_delimiter = ',')]
        code_lengths: Option<Vec<usize>>,

        /// Number of trials per (strategy, configuration)
        #[arg(long)]
        trials: Option<usize>,

        /// Guesses allowed before a solve counts as failed
        #[arg(long)]
        max_guesses: Option<usize>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Strategies to run (comma-separated). Default: all
        #[arg(long, value_delimiter = ',')]
        strategies: Option<Vec<String>>,

        /// Log every guess and its feedback
        #[arg(long)]
        trace_guesses: bool,

        /// Skip the per-strategy summary lines
        #[arg(long)]
        no_summary: bool,

        /// Code length to plot
        #[arg(long)]
        plot_length: Option<usize>,

        /// Directory for the SVG charts
        #[arg(long, default_value = "charts")]
        plot_dir: PathBuf,

        /// Output file for results
        #[arg(long, default_value = "results.json")]
        output: PathBuf,

        /// Do not render charts
        #[arg(long)]
        no_plot: bool,
    },

    /// Generate and display a secret code
    Generate {
        /// Alphabet size
        #[arg(long, default_value = "6")]
        alphabet_size: usize,

        /// Code length
        #[arg(long, default_value = "4")]
        code_length: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List registered strategies in sweep order
    Strategies,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Sweep {
            alphabet_sizes,
            code_lengths,
            trials,
            max_guesses,
            seed,
            strategies,
            trace_guesses,
            no_summary,
            plot_length,
            plot_dir,
            output,
            no_plot,
        } => {
            let mut config = match &cli.config {
                Some(path) => SweepConfig::from_json_file(path)
                    .with_context(|| format!("failed to load sweep config {}", path.display()))?,
                None => SweepConfig::default(),
            };
            if let Some(sizes) = alphabet_sizes {
                config.alphabet_sizes = sizes;
            }
            if let Some(lengths) = code_lengths {
                config.code_lengths = lengths;
            }
            if let Some(trials) = trials {
                config.trials = trials;
            }
            if let Some(max_guesses) = max_guesses {
                config.max_guesses = max_guesses;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(length) = plot_length {
                config.plot_code_length = length;
            }
            config.trace_guesses |= trace_guesses;
            if no_summary {
                config.summary_stats = false;
            }

            let registry = match strategies {
                Some(names) => StrategyRegistry::standard().select(names.as_slice())?,
                None => StrategyRegistry::standard(),
            };

            info!(
                seed = ?config.seed,
                max_guesses = config.max_guesses,
                strategies = ?registry.names(),
                "Sweep configured"
            );

            let summary_stats = config.summary_stats;
            let plot_code_length = config.plot_code_length;
            let mut runner = SweepRunner::new(config, registry)?;
            let mut table = ResultTable::new();
            let mut reporter = ConsoleReporter::stdout(summary_stats);
            runner.run(&mut table, &mut reporter)?;

            let mut stdout = std::io::stdout();
            write_result_table(&mut stdout, &table)?;

            let output_path = timestamped_path(&output);
            table.save(&output_path)?;
            println!("\nResults saved to: {}", output_path.display());

            if !no_plot {
                for path in render_charts(&table, plot_code_length, &plot_dir)? {
                    println!("Chart saved to: {}", path.display());
                }
            }
        }

        Commands::Generate {
            alphabet_size,
            code_length,
            seed,
        } => {
            let configuration = Configuration::new(alphabet_size, code_length)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let secret = generate_secret(&configuration, &mut rng);

            println!("Configuration: {}", configuration);
            println!("Search space: {}", configuration.search_space_size());
            println!("Secret: {}", secret);
        }

        Commands::Strategies => {
            for (idx, name) in StrategyRegistry::standard().names().iter().enumerate() {
                println!("{:>2}. {}", idx + 1, name);
            }
        }
    }

    Ok(())
}
