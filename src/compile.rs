use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::TargetSpec;
use crate::errors::BenchError;
use crate::types::format_command;

/// Runs every target's compile command in `dir`, stopping at the first failure.
///
/// Compiler diagnostics pass through to stderr; compiler stdout is redirected
/// there too so that stdout carries only the report.
pub fn compile_programs(targets: &[TargetSpec], dir: &Path) -> Result<(), BenchError> {
    for target in targets {
        compile_target(target, dir)?;
    }
    Ok(())
}

fn compile_target(target: &TargetSpec, dir: &Path) -> Result<(), BenchError> {
    let command = format_command(&target.compile);
    let (program, args) = target
        .compile
        .split_first()
        .ok_or_else(|| BenchError::InvalidConfig {
            detail: format!("target '{}' has an empty compile command", target.name),
        })?;

    tracing::debug!(name = %target.name, %command, "compiling");

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::from(std::io::stderr()))
        .status()
        .map_err(|source| BenchError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(BenchError::CompileFailed {
            target: target.name.clone(),
            command,
            status,
        });
    }
    Ok(())
}
