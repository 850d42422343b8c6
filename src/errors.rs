use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to compile {target}: `{command}` exited with {status}")]
    CompileFailed {
        target: String,
        command: String,
        status: ExitStatus,
    },

    #[error("Benchmark binary {path} exited with {status}: {stderr}")]
    RunFailed {
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Couldn't parse time output: {output}")]
    TimingParse { output: String },

    #[error("Failed to write progress: {source}")]
    Progress { source: std::io::Error },

    #[error("No measured runs recorded for {target}")]
    NoMeasurements { target: String },

    #[error("Chart output directory {path} does not exist")]
    ChartDirMissing { path: PathBuf },

    #[error("Failed to render chart {path}: {detail}")]
    ChartRender { path: PathBuf, detail: String },
}
