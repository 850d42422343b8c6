use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use langbench::config::BenchConfig;
use langbench::pipeline::{self, RunOptions};

#[derive(Parser)]
#[command(
    name = "langbench",
    version,
    about = "Compile and time equivalent benchmark programs across compiler toolchains"
)]
struct Cli {
    /// Omit to run the benchmarks, or "config" to print the effective configuration
    command: Option<String>,

    /// Config file (defaults to ./langbench.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the sources; binaries are written here
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Discarded runs per target before measuring
    #[arg(long)]
    warmup: Option<usize>,

    /// Measured runs per target
    #[arg(long)]
    runs: Option<usize>,

    /// Chart output path, relative to --dir
    #[arg(long)]
    chart: Option<PathBuf>,

    #[arg(long)]
    no_chart: bool,

    #[arg(long)]
    keep_binaries: bool,

    #[arg(long)]
    json: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let dir = match cli.dir {
        Some(d) => d,
        None => std::env::current_dir()?,
    };

    let mut config = BenchConfig::load(cli.config.as_deref(), &dir)?;
    if let Some(n) = cli.warmup {
        config.warmup_runs = n;
    }
    if let Some(n) = cli.runs {
        config.measured_runs = n;
    }
    if let Some(path) = cli.chart {
        config.chart_path = path;
    }
    config.validate()?;

    match cli.command.as_deref() {
        None => {
            let options = RunOptions {
                json: cli.json,
                chart: !cli.no_chart,
                keep_binaries: cli.keep_binaries,
            };
            pipeline::run(&config, &dir, options)?;
        }
        Some("config") => {
            print!("{}", config.to_toml()?);
        }
        Some(s) => {
            anyhow::bail!("Unknown command '{}'. Usage: langbench [config]", s);
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
