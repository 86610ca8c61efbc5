//! blurmill CLI - parallel box-blur for directories of images.
//!
//! Enumerates an input directory, pushes every image through a small bounded
//! queue to a pool of worker threads, and writes the blurred results to a
//! mirrored output directory.
//!
//! # Usage
//!
//! ```bash
//! # Blur everything under ./photos into ./blurred
//! blurmill ./photos ./blurred
//!
//! # Heavier blur, fewer workers
//! blurmill ./photos ./blurred --filter-size 9 --workers 4
//! ```

use std::path::PathBuf;

use clap::Parser;

use blurmill_core::{Config, Pipeline, PipelineStats};

mod logging;

/// blurmill - parallel box-blur for directories of images.
#[derive(Parser, Debug)]
#[command(name = "blurmill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the input images
    input_root: PathBuf,

    /// Directory the blurred images are written to (created if absent)
    output_root: PathBuf,

    /// Number of worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Side length of the blur window (must be odd)
    #[arg(long)]
    filter_size: Option<usize>,

    /// Capacity of the producer/worker queue
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Path to a TOML config file
    #[arg(short, long, env = "BLURMILL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let mut config = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to load config: {e}\n  Using default configuration.");
                Config::default()
            }
        },
        None => Config::default(),
    };

    // CLI flags win over the config file.
    if let Some(workers) = cli.workers {
        config.pipeline.worker_count = workers;
    }
    if let Some(filter_size) = cli.filter_size {
        config.filter.filter_size = filter_size;
    }
    if let Some(capacity) = cli.queue_capacity {
        config.pipeline.queue_capacity = capacity;
    }

    logging::init_from_config(&config, cli.verbose, cli.json_logs);
    tracing::debug!("blurmill v{}", blurmill_core::VERSION);

    let stats = Pipeline::new(config).run(&cli.input_root, &cli.output_root)?;
    print_summary(&stats);

    Ok(())
}

/// Print a formatted summary table after the run.
fn print_summary(stats: &PipelineStats) {
    let rate = if stats.elapsed.as_secs_f64() > 0.0 {
        stats.processed as f64 / stats.elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!();
    println!("  ====================================");
    println!("               Summary");
    println!("  ====================================");
    println!("    Discovered:   {:>8}", stats.discovered);
    println!("    Processed:    {:>8}", stats.processed);
    if stats.failed > 0 {
        println!("    Failed:       {:>8}", stats.failed);
    }
    println!("  ------------------------------------");
    println!("    Duration:     {:>7.1}s", stats.elapsed.as_secs_f64());
    println!("    Rate:         {:>7.1} img/sec", rate);
    println!("  ====================================");
}
