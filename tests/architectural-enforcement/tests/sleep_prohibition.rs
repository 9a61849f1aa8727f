//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the core and the TUI MUST NOT call sleep
//! methods. Mascot timers are deadlines on a virtual clock, and the frame
//! loop ticks with `tokio::time::interval`, so there are no exceptions.

use architectural_enforcement::scan;

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = scan(|code, _, _| code.contains("::sleep(") || code.contains(".sleep("));

    if !violations.is_empty() {
        eprintln!("\nSleep calls found in production code!\n");

        for violation in &violations {
            eprintln!("  {}", violation);
        }

        eprintln!("\nInstead:");
        eprintln!("  - Mascot timers: arm a deadline and let update(delta) fire it");
        eprintln!("  - Frame pacing: tokio::time::interval(frame_duration)");
        eprintln!("  - Waiting for input: await the crossterm EventStream");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// The frame loop must tick with an interval
#[test]
fn test_frame_loop_uses_interval() {
    let ticks = scan(|code, _, _| code.contains("tokio::time::interval("));
    assert!(
        ticks.iter().any(|v| v.path.ends_with("tui/src/app.rs")),
        "the TUI event loop should tick with tokio::time::interval"
    );
}
