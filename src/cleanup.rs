use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of deleting the compiled binaries.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, std::io::Error)>,
}

impl CleanupReport {
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.failed.len()
    }
}

/// Deletes every path, reporting each outcome to `out`. A failed deletion is
/// logged and skipped; it never stops the remaining ones.
pub fn cleanup_binaries(paths: &[PathBuf], out: &mut dyn Write) -> CleanupReport {
    let mut report = CleanupReport::default();

    for path in paths {
        let name = display_name(path);
        match std::fs::remove_file(path) {
            Ok(()) => {
                let _ = writeln!(out, "Removed {}", name);
                report.removed.push(path.clone());
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to remove binary");
                let _ = writeln!(out, "Error removing {}: {}", name, err);
                report.failed.push((path.clone(), err));
            }
        }
    }

    report
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINARIES: &[&str] = &[
        "benchmark_gcc",
        "benchmark_gpp",
        "benchmark_clang",
        "benchmark_clangpp",
        "benchmark_rust",
        "benchmark_go",
    ];

    #[test]
    fn removes_all_binaries() {
        let tmp = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = BINARIES.iter().map(|b| tmp.path().join(b)).collect();
        for p in &paths {
            std::fs::write(p, b"bin").unwrap();
        }

        let mut out = Vec::new();
        let report = cleanup_binaries(&paths, &mut out);

        assert_eq!(report.removed.len(), 6);
        assert!(report.failed.is_empty());
        assert!(paths.iter().all(|p| !p.exists()));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Removed benchmark_gcc\n"));
        assert!(text.contains("Removed benchmark_go\n"));
    }

    #[test]
    fn missing_binary_does_not_stop_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = BINARIES.iter().map(|b| tmp.path().join(b)).collect();
        // Leave the first binary absent.
        for p in &paths[1..] {
            std::fs::write(p, b"bin").unwrap();
        }

        let mut out = Vec::new();
        let report = cleanup_binaries(&paths, &mut out);

        assert_eq!(report.attempted(), 6);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, paths[0]);
        assert_eq!(report.removed, paths[1..].to_vec());
        assert!(paths.iter().all(|p| !p.exists()));

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Error removing benchmark_gcc: "));
        assert_eq!(text.matches("Removed ").count(), 5);
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let mut out = Vec::new();
        let report = cleanup_binaries(&[], &mut out);
        assert_eq!(report.attempted(), 0);
        assert!(out.is_empty());
    }
}
