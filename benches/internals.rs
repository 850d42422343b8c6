use std::path::PathBuf;

use chrono::{DateTime, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use regex::Regex;

use langbench::config::BenchConfig;
use langbench::display;
use langbench::probe;
use langbench::stats;
use langbench::timing;
use langbench::types::{
    AggregateResult, BenchmarkTarget, LabelStyle, SystemInfo, TargetResult, VersionMap,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Synthetic results for `size` targets with descending mean times, so that
/// ranking has to reverse them.
fn make_results(size: usize) -> (AggregateResult, VersionMap) {
    let mut versions = VersionMap::new();
    let entries = (0..size)
        .map(|i| {
            let key = format!("TC{}", i);
            versions.insert(key.clone(), format!("{}.{}.0", i / 10, i % 10));
            TargetResult {
                target: BenchmarkTarget {
                    name: format!("Lang {} ({})", i, key),
                    version_key: key,
                    label_style: LabelStyle::Append,
                    path: PathBuf::from(format!("/tmp/bench_{}", i)),
                },
                mean_secs: (size - i) as f64 * 0.0137,
            }
        })
        .collect();
    (AggregateResult { entries }, versions)
}

fn system() -> SystemInfo {
    SystemInfo {
        cpu: "AMD Ryzen 9 5950X 16-Core Processor".to_string(),
        kernel: "6.5.0-14-generic".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Benchmarks: parsing
// ---------------------------------------------------------------------------

fn bench_parse_elapsed(c: &mut Criterion) {
    let inputs = [
        ("seconds", "Total execution time: 0:01.50"),
        ("hours", "Total execution time: 1:02:03.45"),
        (
            "noisy_stderr",
            "warning: unused variable\nnote: see above\nTotal execution time: 0:12.34\n",
        ),
        ("malformed", "Command terminated by signal 9"),
    ];

    let mut group = c.benchmark_group("parse_elapsed");
    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("input", name), input, |b, s| {
            b.iter(|| timing::parse_elapsed(s).ok());
        });
    }
    group.finish();
}

fn bench_extract_version(c: &mut Criterion) {
    let config = BenchConfig::default();
    let patterns: Vec<(String, Regex)> = config
        .toolchains
        .iter()
        .map(|t| (t.key.clone(), Regex::new(&t.version_pattern).unwrap()))
        .collect();
    let outputs = [
        ("GCC", "gcc (Ubuntu 13.2.0-4ubuntu3) 13.2.0\nCopyright (C) 2023 Free Software Foundation, Inc.\n"),
        ("Clang", "Ubuntu clang version 17.0.6 (9ubuntu1)\nTarget: x86_64-pc-linux-gnu\n"),
        ("Rust", "rustc 1.75.0 (82e1608df 2023-12-21)\n"),
        ("Go", "go version go1.21.5 linux/amd64\n"),
    ];

    let mut group = c.benchmark_group("extract_version");
    for (key, text) in &outputs {
        let (_, re) = patterns.iter().find(|(k, _)| k == key).unwrap();
        group.bench_with_input(BenchmarkId::new("toolchain", key), text, |b, t| {
            b.iter(|| probe::extract_version(t, re));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmarks: aggregation and display
// ---------------------------------------------------------------------------

fn bench_aggregate(c: &mut Criterion) {
    let runs: Vec<f64> = (0..10).map(|i| 1.0 + i as f64 * 0.01).collect();
    c.bench_function("aggregate_10", |b| {
        b.iter(|| stats::aggregate(&runs));
    });
}

fn bench_display(c: &mut Criterion) {
    owo_colors_off();
    let now: DateTime<Utc> = DateTime::parse_from_rfc3339("2026-02-18T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let system = system();

    let mut group = c.benchmark_group("display");
    for &size in &[6, 50] {
        let (results, versions) = make_results(size);
        let rows = display::rank_results(&results, &versions);

        group.bench_with_input(BenchmarkId::new("rank_results", size), &size, |b, _| {
            b.iter(|| display::rank_results(&results, &versions));
        });
        group.bench_with_input(BenchmarkId::new("format_report", size), &size, |b, _| {
            b.iter(|| display::format_report(&rows, &system));
        });
        group.bench_with_input(BenchmarkId::new("format_json", size), &size, |b, _| {
            b.iter(|| display::format_json(&rows, &system, &versions, now));
        });
    }
    group.finish();
}

fn owo_colors_off() {
    owo_colors::set_override(false);
}

// ---------------------------------------------------------------------------
// Criterion groups
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_parse_elapsed,
    bench_extract_version,
    bench_aggregate,
    bench_display,
);
criterion_main!(benches);
