//! Architecture guard tests for the banquito workspace.
//!
//! These tests scan source files to enforce design-level consistency:
//! - Error types derive thiserror instead of hand-writing Display
//! - banquito-core never prints to stdout (the CLI owns it)
//!
//! Run: `cargo test --package banquito-core --test architecture_guards -- --nocapture`

use std::fs;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Walk `dir` recursively, collecting .rs files.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().is_some_and(|e| e == "rs") {
                files.push(path);
            }
        }
    }
    files
}

fn workspace_root() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")); // crates/banquito-core
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("cannot determine workspace root")
        .to_path_buf()
}

/// Strip the workspace root prefix for display.
fn rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn report(rule: &str, hint: &str, violations: &[(String, usize, String)]) {
    if violations.is_empty() {
        return;
    }
    let mut msg = format!("\n[{}] {}\n\n", rule, hint);
    for (file, line, text) in violations {
        msg.push_str(&format!("  {}:{} -> {}\n", file, line, text));
    }
    panic!("{msg}");
}

// ---------------------------------------------------------------------------
// Error types must use thiserror
// ---------------------------------------------------------------------------

#[test]
fn test_error_types_use_thiserror() {
    let root = workspace_root();
    let mut violations = Vec::new();

    for file in collect_rs_files(&root.join("crates")) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("impl")
                && trimmed.contains("Display for")
                && trimmed.contains("Error")
            {
                violations.push((rel(&file, &root), i + 1, trimmed.to_string()));
            }
        }
    }

    report(
        "ERR-01",
        "Hand-written Display for Error types detected. Use #[derive(thiserror::Error)].",
        &violations,
    );
}

// ---------------------------------------------------------------------------
// stdout carries only the status lines
// ---------------------------------------------------------------------------

#[test]
fn test_core_does_not_print_to_stdout() {
    let root = workspace_root();
    let mut violations = Vec::new();

    for file in collect_rs_files(&root.join("crates/banquito-core/src")) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("//") {
                continue;
            }
            if trimmed.contains("println!(") || trimmed.contains("print!(") {
                violations.push((rel(&file, &root), i + 1, trimmed.to_string()));
            }
        }
    }

    report(
        "OUT-01",
        "banquito-core writes to stdout. Log with tracing or take a Write sink.",
        &violations,
    );
}
