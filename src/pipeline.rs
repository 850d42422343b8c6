use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use crate::chart;
use crate::cleanup;
use crate::compile;
use crate::config::BenchConfig;
use crate::display;
use crate::errors::BenchError;
use crate::probe;
use crate::timing;

/// Switches that change what the pipeline emits, not what it measures.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub json: bool,
    pub chart: bool,
    pub keep_binaries: bool,
}

/// Probe → build → time → report → clean up, all in `dir`.
///
/// Progress goes to stdout, or to stderr in JSON mode so that stdout holds
/// only the report.
pub fn run(config: &BenchConfig, dir: &Path, options: RunOptions) -> Result<()> {
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let progress: &mut dyn Write = if options.json { &mut stderr } else { &mut stdout };

    writeln!(progress, "Starting benchmark process...")?;

    let system = probe::probe_system();
    let versions = probe::probe_versions(&config.toolchains);

    writeln!(progress, "Compiling programs...")?;
    compile::compile_programs(&config.targets, dir)?;

    writeln!(progress, "Running benchmarks...")?;
    let targets = config.benchmark_targets(dir);
    let results = timing::benchmark(config, &targets, |target| {
        writeln!(progress, "Running benchmark for {}...", target.name)
            .map_err(|source| BenchError::Progress { source })
    })?;
    let rows = display::rank_results(&results, &versions);

    if options.chart {
        writeln!(progress, "Creating plot...")?;
        let chart_path = config.resolved_chart_path(dir);
        chart::render_chart(&chart_path, &rows, &system)?;
        writeln!(progress, "Chart saved as '{}'", config.chart_path.display())?;
    }

    writeln!(progress, "Printing results...")?;
    if options.json {
        println!("{}", display::format_json(&rows, &system, &versions, Utc::now()));
    } else {
        print!("{}", display::format_report(&rows, &system));
    }

    if options.keep_binaries {
        tracing::info!("keeping compiled binaries");
    } else {
        writeln!(progress, "Cleaning up binaries...")?;
        cleanup::cleanup_binaries(&config.binary_paths(dir), progress);
    }

    writeln!(progress, "\nBenchmark completed successfully!")?;
    Ok(())
}
