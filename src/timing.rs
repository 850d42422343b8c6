use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::{BenchConfig, TimerConfig};
use crate::errors::BenchError;
use crate::stats;
use crate::types::{AggregateResult, BenchmarkTarget, TargetResult};

/// Prefix the timing utility writes before the elapsed time.
pub const ELAPSED_PREFIX: &str = "Total execution time:";

/// Runs `executable` once under the timing utility and returns elapsed seconds.
pub fn run_benchmark(timer: &TimerConfig, executable: &Path) -> Result<f64, BenchError> {
    let output = Command::new(&timer.program)
        .args(&timer.args)
        .arg(executable)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| BenchError::Spawn {
            program: timer.program.clone(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(BenchError::RunFailed {
            path: executable.to_path_buf(),
            status: output.status,
            stderr: stderr.trim().to_string(),
        });
    }

    parse_elapsed(&stderr)
}

/// Times every target with the real timing utility.
pub fn benchmark(
    config: &BenchConfig,
    targets: &[BenchmarkTarget],
    on_target: impl FnMut(&BenchmarkTarget) -> Result<(), BenchError>,
) -> Result<AggregateResult, BenchError> {
    benchmark_with(config, targets, on_target, |target| {
        run_benchmark(&config.timer, &target.path)
    })
}

/// Warmup then measured runs for each target, strictly in sequence.
/// The first failing run or callback aborts everything.
pub fn benchmark_with(
    config: &BenchConfig,
    targets: &[BenchmarkTarget],
    mut on_target: impl FnMut(&BenchmarkTarget) -> Result<(), BenchError>,
    mut run: impl FnMut(&BenchmarkTarget) -> Result<f64, BenchError>,
) -> Result<AggregateResult, BenchError> {
    let mut result = AggregateResult::default();

    for target in targets {
        on_target(target)?;

        for _ in 0..config.warmup_runs {
            run(target)?;
        }

        let mut times = Vec::with_capacity(config.measured_runs);
        for _ in 0..config.measured_runs {
            times.push(run(target)?);
        }
        tracing::debug!(name = %target.name, ?times, "measured");

        let mean_secs = stats::aggregate(&times).ok_or_else(|| BenchError::NoMeasurements {
            target: target.name.clone(),
        })?;
        result.entries.push(TargetResult {
            target: target.clone(),
            mean_secs,
        });
    }

    Ok(result)
}

/// Parses the timing utility's stderr.
///
/// Grammar of the first line containing [`ELAPSED_PREFIX`]:
///
/// ```text
/// line    := "Total execution time: " elapsed
/// elapsed := [hours ":"] minutes ":" seconds
/// seconds := DIGIT+ "." DIGIT+
/// ```
///
/// Hours and minutes are plain digit runs. Surrounding whitespace is ignored;
/// anything else after the prefix is an error.
pub fn parse_elapsed(output: &str) -> Result<f64, BenchError> {
    let parse_err = || BenchError::TimingParse {
        output: output.trim().to_string(),
    };

    let line = output
        .lines()
        .find(|l| l.contains(ELAPSED_PREFIX))
        .ok_or_else(parse_err)?;
    let (_, rest) = line.split_once(ELAPSED_PREFIX).ok_or_else(parse_err)?;

    let fields: Vec<&str> = rest.trim().split(':').collect();
    let (hours, minutes, seconds) = match fields.as_slice() {
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(parse_err()),
    };

    let hours = parse_digits(hours).ok_or_else(parse_err)?;
    let minutes = parse_digits(minutes).ok_or_else(parse_err)?;
    let seconds = parse_decimal(seconds).ok_or_else(parse_err)?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

fn parse_digits(s: &str) -> Option<f64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_decimal(s: &str) -> Option<f64> {
    let (whole, frac) = s.split_once('.')?;
    parse_digits(whole)?;
    parse_digits(frac)?;
    s.parse().ok()
}
