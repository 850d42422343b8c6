use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Toolchain key → probed version string, e.g. "GCC" → "13.2.0".
/// Keys whose probe failed are absent.
pub type VersionMap = BTreeMap<String, String>;

/// Placeholder rendered wherever a probe produced nothing usable.
pub const UNKNOWN: &str = "unknown";

/// How a target's display name is combined with its toolchain version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// `"C (GCC)"` → `"C (GCC) 13.2.0"`
    Append,
    /// `"Rust"` → `"Rust (1.75.0)"`
    Parenthesized,
}

/// A compiled program ready to be timed.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkTarget {
    pub name: String,
    pub version_key: String,
    pub label_style: LabelStyle,
    pub path: PathBuf,
}

impl BenchmarkTarget {
    /// Human-readable name with the toolchain version embedded.
    pub fn label(&self, versions: &VersionMap) -> String {
        let version = versions
            .get(&self.version_key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN);
        match self.label_style {
            LabelStyle::Append => format!("{} {}", self.name, version),
            LabelStyle::Parenthesized => format!("{} ({})", self.name, version),
        }
    }
}

/// Host description shown under the table and the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub cpu: String,
    pub kernel: String,
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPU: {}, Kernel: {}", self.cpu, self.kernel)
    }
}

/// Mean elapsed time for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetResult {
    pub target: BenchmarkTarget,
    pub mean_secs: f64,
}

/// One entry per benchmarked target, in benchmark order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub entries: Vec<TargetResult>,
}

/// A result row after sorting, shared by the table and the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub rank: usize,
    pub name: String,
    pub version_key: String,
    pub label: String,
    pub mean_secs: f64,
}

/// Renders an argv for diagnostics, single-quoting arguments that need it.
pub fn format_command(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if !arg.is_empty()
                && arg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_./=+:,@%".contains(c))
            {
                arg.clone()
            } else {
                shell_escape_single_quote(arg)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wraps a string in single quotes, escaping internal single quotes as `'\''`.
pub fn shell_escape_single_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}
