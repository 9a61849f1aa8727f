//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code; timers run on the virtual clock
//!   and the frame loop ticks with `tokio::time::interval`
//! - No blocking I/O inside async functions
//!
//! The library holds the source scanning shared by the tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source roots, relative to the workspace root
pub const PRODUCTION_ROOTS: &[&str] = &["workshop/core/src", "tui/src"];

/// One offending line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line_number: usize,
    pub line: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} - {}",
            self.path.display(),
            self.line_number,
            self.line.trim()
        )
    }
}

/// Workspace root, two levels above this crate
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Every `.rs` file under the production roots
pub fn production_sources() -> Vec<PathBuf> {
    let root = workspace_root();
    PRODUCTION_ROOTS
        .iter()
        .map(|dir| root.join(dir))
        .filter(|dir| dir.exists())
        .flat_map(|dir| {
            walkdir::WalkDir::new(dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
                .map(|e| e.into_path())
        })
        .collect()
}

/// Lines of a file up to its `#[cfg(test)]` module
///
/// Unit tests sit at the bottom of each file, so everything after the
/// first `#[cfg(test)]` is test code.
pub fn production_lines(path: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .take_while(|line| line.trim() != "#[cfg(test)]")
        .map(str::to_string)
        .collect()
}

/// The part of a line before any `//` comment
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Scan production code for lines matching `is_violation`
///
/// The predicate receives the comment-free code, the whole file's
/// production lines and the line index.
pub fn scan(is_violation: impl Fn(&str, &[String], usize) -> bool) -> Vec<Violation> {
    let mut violations = Vec::new();
    for path in production_sources() {
        let lines = production_lines(&path);
        for (idx, line) in lines.iter().enumerate() {
            if is_violation(code_part(line), &lines, idx) {
                violations.push(Violation {
                    path: path.clone(),
                    line_number: idx + 1,
                    line: line.clone(),
                });
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_part_drops_comments() {
        assert_eq!(code_part("let x = 1; // note"), "let x = 1; ");
        assert_eq!(code_part("/// doc"), "");
    }

    #[test]
    fn test_production_sources_found() {
        let sources = production_sources();
        assert!(sources.iter().any(|p| p.ends_with("tui/src/app.rs")));
        assert!(sources.iter().any(|p| p.ends_with("workshop/core/src/lib.rs")));
    }

    #[test]
    fn test_production_lines_stop_at_tests() {
        let mut file = std::env::temp_dir();
        file.push(format!("arch-enforcement-{}.rs", std::process::id()));
        fs::write(&file, "fn a() {}\n#[cfg(test)]\nmod tests {}\n").unwrap();

        assert_eq!(production_lines(&file), vec!["fn a() {}".to_string()]);
        let _ = fs::remove_file(&file);
    }
}
