use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

use crate::types::{AggregateResult, RankedRow, SystemInfo, VersionMap};

const HEADERS: [&str; 3] = ["Rank", "Language (Compiler Version)", "Execution Time"];

/// Sorts ascending by mean time and assigns ranks starting at 1.
/// Ties keep benchmark order.
pub fn rank_results(results: &AggregateResult, versions: &VersionMap) -> Vec<RankedRow> {
    let mut entries: Vec<_> = results.entries.iter().collect();
    entries.sort_by(|a, b| a.mean_secs.total_cmp(&b.mean_secs));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| RankedRow {
            rank: i + 1,
            name: entry.target.name.clone(),
            version_key: entry.target.version_key.clone(),
            label: entry.target.label(versions),
            mean_secs: entry.mean_secs,
        })
        .collect()
}

pub fn format_seconds(secs: f64) -> String {
    format!("{:.4}s", secs)
}

fn style_rank() -> Style {
    Style::new().cyan().bold()
}

fn style_fastest() -> Style {
    Style::new().green().bold()
}

/// Grid table in the style of `+---+` borders with a `+===+` header rule.
/// The rank column is right-aligned, the others left-aligned.
pub fn format_table(rows: &[RankedRow]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|r| [r.rank.to_string(), r.label.clone(), format_seconds(r.mean_secs)])
        .collect();

    // Headers always get two columns of slack.
    let mut widths = HEADERS.map(|h| h.chars().count() + 2);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = |fill: char| {
        let mut line = String::from("+");
        for w in widths {
            line.extend(std::iter::repeat_n(fill, w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut out = String::new();
    out.push_str(&rule('-'));

    let header = format!(
        "| {:>w0$} | {:<w1$} | {:<w2$} |",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    out.push_str(
        &header
            .if_supports_color(Stream::Stdout, |s| s.bold())
            .to_string(),
    );
    out.push('\n');
    out.push_str(&rule('='));

    for (row, [rank, label, time]) in rows.iter().zip(&cells) {
        let rank_colored = format!("{:>w$}", rank, w = widths[0])
            .if_supports_color(Stream::Stdout, |s| s.style(style_rank()))
            .to_string();

        let label_padded = format!("{:<w$}", label, w = widths[1]);
        let label_colored = if row.rank == 1 {
            label_padded
                .if_supports_color(Stream::Stdout, |s| s.style(style_fastest()))
                .to_string()
        } else {
            label_padded
        };

        let time_colored = format!("{:<w$}", time, w = widths[2])
            .if_supports_color(Stream::Stdout, |s| s.yellow())
            .to_string();

        out.push_str(&format!(
            "| {} | {} | {} |\n",
            rank_colored, label_colored, time_colored
        ));
        out.push_str(&rule('-'));
    }

    out
}

/// Toolchain that built the harness, captured by the build script.
pub const RUSTC_VERSION: &str = env!("LANGBENCH_RUSTC_VERSION");

/// Table plus the system, harness and toolchain version footer.
pub fn format_report(rows: &[RankedRow], system: &SystemInfo) -> String {
    let mut out = String::new();
    out.push_str("\nBenchmark Results:\n");
    out.push_str(&format_table(rows));
    out.push_str(&format!("\nSystem Information: {}\n", system));
    out.push_str(&format!(
        "Harness version: {} {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(&format!("Rust version: {}\n", RUSTC_VERSION));
    out
}

/// JSON output format.
#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    harness_version: &'static str,
    rustc_version: &'static str,
    system: &'a SystemInfo,
    versions: &'a BTreeMap<String, String>,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    rank: usize,
    name: &'a str,
    label: &'a str,
    version_key: &'a str,
    mean_seconds: f64,
}

pub fn format_json(
    rows: &[RankedRow],
    system: &SystemInfo,
    versions: &VersionMap,
    now: DateTime<Utc>,
) -> String {
    let report = JsonReport {
        generated_at: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        harness_version: env!("CARGO_PKG_VERSION"),
        rustc_version: RUSTC_VERSION,
        system,
        versions,
        results: rows
            .iter()
            .map(|r| JsonResult {
                rank: r.rank,
                name: &r.name,
                label: &r.label,
                version_key: &r.version_key,
                mean_seconds: r.mean_secs,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}
