//! Host and toolchain metadata.
//!
//! Everything here is best effort: a missing tool or unexpected output
//! yields `unknown` (or an absent version key) plus a warning, never an error.

use std::process::{Command, Stdio};

use regex::Regex;

use crate::config::Toolchain;
use crate::types::{SystemInfo, UNKNOWN, VersionMap};

pub fn probe_system() -> SystemInfo {
    let cpu = std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|text| parse_cpu_model(&text))
        .unwrap_or_else(|| {
            tracing::warn!("could not determine CPU model");
            UNKNOWN.to_string()
        });

    let kernel = capture_stdout("uname", &["-r".to_string()])
        .map(|out| out.trim().to_string())
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| {
            tracing::warn!("could not determine kernel version");
            UNKNOWN.to_string()
        });

    SystemInfo { cpu, kernel }
}

pub fn probe_versions(toolchains: &[Toolchain]) -> VersionMap {
    let mut versions = VersionMap::new();
    for tc in toolchains {
        match probe_version(tc) {
            Some(v) => {
                tracing::debug!(key = %tc.key, version = %v, "probed toolchain");
                versions.insert(tc.key.clone(), v);
            }
            None => tracing::warn!(key = %tc.key, program = %tc.program, "could not determine version"),
        }
    }
    versions
}

fn probe_version(tc: &Toolchain) -> Option<String> {
    let pattern = Regex::new(&tc.version_pattern).ok()?;
    let output = Command::new(&tc.program)
        .args(&tc.version_args)
        .stdin(Stdio::null())
        .output()
        .ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    extract_version(&stdout, &pattern).or_else(|| extract_version(&stderr, &pattern))
}

fn capture_stdout(program: &str, args: &[String]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// First match of `pattern` in `text`: capture group 1 if the pattern has
/// one, otherwise the whole match. Empty matches count as no match.
pub fn extract_version(text: &str, pattern: &Regex) -> Option<String> {
    let caps = pattern.captures(text)?;
    let m = caps.get(1).or_else(|| caps.get(0))?;
    let version = m.as_str().trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Value of the first `model name : ...` line in `/proc/cpuinfo` text.
pub fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "model name")
        .map(|(_, value)| value.trim().to_string())
        .filter(|v| !v.is_empty())
}
