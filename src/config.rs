use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::BenchError;
use crate::types::{BenchmarkTarget, LabelStyle};

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "langbench.toml";

/// Everything the pipeline needs, passed explicitly into each stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub warmup_runs: usize,
    pub measured_runs: usize,
    /// Relative paths resolve against the working directory.
    pub chart_path: PathBuf,
    pub timer: TimerConfig,
    #[serde(rename = "toolchain")]
    pub toolchains: Vec<Toolchain>,
    #[serde(rename = "target")]
    pub targets: Vec<TargetSpec>,
}

/// Wall-clock timing utility wrapped around every benchmark run.
/// The executable path is appended after `args`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimerConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// How to ask a compiler for its version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Toolchain {
    pub key: String,
    pub program: String,
    #[serde(default)]
    pub version_args: Vec<String>,
    /// Regex; capture group 1 is the version if present, else the whole match.
    pub version_pattern: String,
}

/// One program to compile and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    pub name: String,
    pub version_key: String,
    pub label_style: LabelStyle,
    /// File name of the produced executable, relative to the working directory.
    pub binary: String,
    /// Compiler argv, run without a shell.
    pub compile: Vec<String>,
}

impl TargetSpec {
    pub fn binary_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.binary)
    }

    pub fn to_target(&self, dir: &Path) -> BenchmarkTarget {
        BenchmarkTarget {
            name: self.name.clone(),
            version_key: self.version_key.clone(),
            label_style: self.label_style,
            path: self.binary_path(dir),
        }
    }
}

const CC_FLAGS: &[&str] = &[
    "-O3",
    "-march=native",
    "-fomit-frame-pointer",
    "-flto",
    "-funroll-loops",
];

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

fn cc_target(
    name: &str,
    key: &str,
    compiler: &str,
    source: &str,
    binary: &str,
) -> TargetSpec {
    let mut compile = vec![compiler.to_string()];
    compile.extend(argv(CC_FLAGS));
    compile.extend(argv(&[source, "-o", &format!("./{binary}")]));
    TargetSpec {
        name: name.to_string(),
        version_key: key.to_string(),
        label_style: LabelStyle::Append,
        binary: binary.to_string(),
        compile,
    }
}

fn toolchain(key: &str, program: &str, version_args: &[&str], pattern: &str) -> Toolchain {
    Toolchain {
        key: key.to_string(),
        program: program.to_string(),
        version_args: argv(version_args),
        version_pattern: pattern.to_string(),
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            program: "/usr/bin/time".to_string(),
            args: argv(&["-f", "Total execution time: %E"]),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warmup_runs: 3,
            measured_runs: 10,
            chart_path: PathBuf::from("assets").join("benchmark_results.png"),
            timer: TimerConfig::default(),
            toolchains: vec![
                toolchain("GCC", "gcc", &["--version"], r"GCC\) (\d+\.\d+\.\d+)"),
                toolchain("G++", "g++", &["--version"], r"GCC\) (\d+\.\d+\.\d+)"),
                toolchain("Clang", "clang", &["--version"], r"version (\d+\.\d+\.\d+)"),
                toolchain("Clang++", "clang++", &["--version"], r"version (\d+\.\d+\.\d+)"),
                toolchain("Rust", "rustc", &["--version"], r"(\d+\.\d+\.\d+)"),
                toolchain("Go", "go", &["version"], r"go(\d+\.\d+\.\d+)"),
            ],
            targets: vec![
                cc_target("C (GCC)", "GCC", "gcc", "benchmark.c", "benchmark_gcc"),
                cc_target("C++ (G++)", "G++", "g++", "benchmark.cpp", "benchmark_gpp"),
                cc_target("C (Clang)", "Clang", "clang", "benchmark.c", "benchmark_clang"),
                cc_target(
                    "C++ (Clang++)",
                    "Clang++",
                    "clang++",
                    "benchmark.cpp",
                    "benchmark_clangpp",
                ),
                TargetSpec {
                    name: "Rust".to_string(),
                    version_key: "Rust".to_string(),
                    label_style: LabelStyle::Parenthesized,
                    binary: "benchmark_rust".to_string(),
                    compile: argv(&[
                        "rustc",
                        "-C",
                        "opt-level=3",
                        "-C",
                        "target-cpu=native",
                        "-C",
                        "lto=fat",
                        "-C",
                        "codegen-units=1",
                        "benchmark.rs",
                        "-o",
                        "./benchmark_rust",
                    ]),
                },
                TargetSpec {
                    name: "Go".to_string(),
                    version_key: "Go".to_string(),
                    label_style: LabelStyle::Parenthesized,
                    binary: "benchmark_go".to_string(),
                    compile: argv(&[
                        "go",
                        "build",
                        "-o",
                        "./benchmark_go",
                        "-ldflags",
                        "-s -w",
                        "-gcflags",
                        "-l=4",
                        "benchmark.go",
                    ]),
                },
            ],
        }
    }
}

impl BenchConfig {
    /// Loads `explicit` if given, else `<dir>/langbench.toml` if present,
    /// else the built-in defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, BenchError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    tracing::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| BenchError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_toml(&text).map_err(|detail| BenchError::ConfigParse { path, detail })
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        let invalid =
            |detail: String| -> Result<(), BenchError> { Err(BenchError::InvalidConfig { detail }) };

        if self.measured_runs == 0 {
            return invalid("measured_runs must be at least 1".to_string());
        }
        if self.targets.is_empty() {
            return invalid("at least one [[target]] is required".to_string());
        }
        if self.timer.program.trim().is_empty() {
            return invalid("timer.program must not be empty".to_string());
        }

        let mut names = HashSet::new();
        for target in &self.targets {
            if !names.insert(target.name.as_str()) {
                return invalid(format!("duplicate target name '{}'", target.name));
            }
            if target.binary.trim().is_empty() {
                return invalid(format!("target '{}' has an empty binary name", target.name));
            }
            if target.compile.first().is_none_or(|p| p.trim().is_empty()) {
                return invalid(format!("target '{}' has an empty compile command", target.name));
            }
            if !self.toolchains.iter().any(|t| t.key == target.version_key) {
                tracing::warn!(
                    name = %target.name,
                    key = %target.version_key,
                    "no toolchain probes this version key"
                );
            }
        }

        for tc in &self.toolchains {
            if let Err(e) = Regex::new(&tc.version_pattern) {
                return invalid(format!("toolchain '{}' has a bad version_pattern: {}", tc.key, e));
            }
        }

        Ok(())
    }

    pub fn benchmark_targets(&self, dir: &Path) -> Vec<BenchmarkTarget> {
        self.targets.iter().map(|t| t.to_target(dir)).collect()
    }

    pub fn binary_paths(&self, dir: &Path) -> Vec<PathBuf> {
        self.targets.iter().map(|t| t.binary_path(dir)).collect()
    }

    pub fn resolved_chart_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.chart_path)
    }
}
