//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: async functions in the core and the TUI MUST NOT use blocking
//! I/O. Reading the guide and the config file happens in plain functions
//! called before the event loop starts.

use architectural_enforcement::{code_part, scan};

const BLOCKING_CALLS: &[&str] = &[
    "std::fs::",
    "fs::read",
    "fs::write",
    "File::open",
    "File::create",
    "OpenOptions::new",
    "std::net::",
    "Command::new",
];

/// Test that async functions do not use blocking I/O
#[test]
fn test_no_blocking_io_in_async_functions() {
    let violations = scan(|code, lines, idx| {
        BLOCKING_CALLS.iter().any(|call| code.contains(call)) && is_in_async_function(lines, idx)
    });

    if !violations.is_empty() {
        eprintln!("\nBlocking I/O found inside async functions!\n");

        for violation in &violations {
            eprintln!("  {}", violation);
        }

        eprintln!("\nMove the call into a plain function that runs before the loop,");
        eprintln!("or use the tokio::fs / tokio::process equivalent.");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Whether the nearest enclosing `fn` above `current_idx` is async
fn is_in_async_function(lines: &[String], current_idx: usize) -> bool {
    for line in lines[..=current_idx].iter().rev() {
        let code = code_part(line);
        if code.contains("fn ") {
            return code.contains("async fn ");
        }
    }
    false
}

#[test]
fn test_enclosing_function_detection() {
    let lines: Vec<String> = [
        "fn load() {",
        "    std::fs::read_to_string(p);",
        "}",
        "async fn run() {",
        "    std::fs::read_to_string(p);",
        "}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    assert!(!is_in_async_function(&lines, 1));
    assert!(is_in_async_function(&lines, 4));
}
