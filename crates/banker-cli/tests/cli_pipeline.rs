//! Integration tests for the banker-cli pipeline.
//!
//! These tests drive the public library API the same way `main.rs` does:
//! an [`InputSource`] feeds an analysis use case, the result lands in an
//! [`AnalysisContext`], and the renderers turn it into text or JSON.

use banker_cli::application::analyze::{run_deadlock, run_safety, AnalysisContext, AnalyzeError};
use banker_cli::application::strategies::{apply_prevention, apply_recovery, ContextError};
use banker_cli::infrastructure::input::{SnapshotFile, TextInput};
use banker_cli::infrastructure::render::{
    render_deadlock_text, render_json, render_safety_text, render_strategy_text,
};
use banker_core::{PreventionStrategy, RecoveryStrategy, ValidationError};

fn textbook_input() -> TextInput {
    TextInput {
        allocation: Some("0,1,0\n2,0,0\n3,0,2\n2,1,1\n0,0,2".to_string()),
        max: Some("7,5,3\n3,2,2\n9,0,2\n2,2,2\n4,3,3".to_string()),
        available: Some("3,3,2".to_string()),
    }
}

/// Writes `content` to a uniquely named file in the temp directory.
fn temp_snapshot(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("banker-{name}-{}.toml", std::process::id()));
    std::fs::write(&path, content).expect("write temp snapshot");
    path
}

#[test]
fn test_textbook_state_renders_safe_sequence_and_details() {
    let mut ctx = AnalysisContext::new();
    let report = run_safety(&mut ctx, &textbook_input(), true).expect("valid input");

    let text = render_safety_text(&report, &ctx, true);

    assert!(text.starts_with("System is in a safe state."));
    assert!(text.contains("P1 → P3 → P0 → P2 → P4"));
    assert!(text.contains("Process P0\n  Allocation: R0: 0, R1: 1, R2: 0"));
    assert!(text.contains("  Need:       R0: 7, R1: 4, R2: 3"));
    assert!(text.ends_with("Available Resources\n  R0: 3, R1: 3, R2: 2"));
}

#[test]
fn test_safety_report_json_carries_sequence_and_verification() {
    let mut ctx = AnalysisContext::new();
    let report = run_safety(&mut ctx, &textbook_input(), true).expect("valid input");

    let json = render_json(&report).expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

    assert_eq!(value["safe"], true);
    assert_eq!(value["sequence"], serde_json::json!([1, 3, 0, 2, 4]));
    assert_eq!(value["verified"], true);
    assert_eq!(value["need"][2], serde_json::json!([6, 0, 0]));
}

#[test]
fn test_over_allocation_is_rejected_with_readable_message() {
    let input = TextInput {
        allocation: Some("3,0".to_string()),
        max: Some("2,0".to_string()),
        available: Some("0,0".to_string()),
    };
    let mut ctx = AnalysisContext::new();

    let err = run_safety(&mut ctx, &input, false).expect_err("allocation exceeds max");

    assert!(matches!(
        err,
        AnalyzeError::Invalid(ValidationError::InvalidAllocation { process: 0, resource: 0, .. })
    ));
    assert!(err.to_string().contains("process 0 has allocation greater than max for resource 0"));
    assert!(!ctx.is_loaded());
}

#[test]
fn test_snapshot_file_drives_deadlock_detection_and_recovery() {
    let path = temp_snapshot("deadlock", "allocation = \"1,0\\n0,1\"\navailable = \"1,0\"\n");
    let source = SnapshotFile::new(&path);
    let mut ctx = AnalysisContext::new();

    let report = run_deadlock(&mut ctx, &source).expect("valid snapshot");
    std::fs::remove_file(&path).ok();

    assert!(report.deadlocked);
    assert_eq!(report.processes, vec![1]);
    assert!(render_deadlock_text(&report, &ctx, false).contains("Deadlocked processes: P1"));

    let recovery = apply_recovery(&ctx, RecoveryStrategy::ProcessTermination).expect("state loaded");
    assert_eq!(recovery.title, "PROCESS TERMINATION");
    assert!(recovery.detail.contains("(P1)"));
}

#[test]
fn test_snapshot_file_with_full_triple_feeds_safety_check() {
    let path = temp_snapshot(
        "safety",
        "allocation = \"\"\"\n1,0\n0,1\n\"\"\"\nmax = \"\"\"\n2,1\n1,1\n\"\"\"\navailable = \"1,1\"\n",
    );
    let mut ctx = AnalysisContext::new();

    let report = run_safety(&mut ctx, &SnapshotFile::new(&path), false).expect("valid snapshot");
    std::fs::remove_file(&path).ok();

    assert!(report.safe);
    assert_eq!(report.sequence, Some(vec![0, 1]));
}

#[test]
fn test_strategies_require_a_loaded_state() {
    let ctx = AnalysisContext::new();
    assert_eq!(
        apply_prevention(&ctx, PreventionStrategy::CircularWait),
        Err(ContextError::NoState)
    );
    assert_eq!(
        apply_recovery(&ctx, RecoveryStrategy::ResourcePreemption),
        Err(ContextError::NoState)
    );
}

#[test]
fn test_prevention_after_safety_check_renders_heading_first() {
    let mut ctx = AnalysisContext::new();
    run_safety(&mut ctx, &textbook_input(), false).expect("valid input");

    let report = apply_prevention(&ctx, PreventionStrategy::HoldAndWait).expect("state loaded");
    let text = render_strategy_text(&report);

    assert!(text.starts_with("HOLD WAIT\nHold and Wait:"));
}

#[test]
fn test_recovery_on_safe_state_reports_nothing_to_do() {
    let mut ctx = AnalysisContext::new();
    run_safety(&mut ctx, &textbook_input(), false).expect("valid input");

    let report = apply_recovery(&ctx, RecoveryStrategy::ResourcePreemption).expect("state loaded");
    assert!(report.detail.starts_with("No deadlocked processes"));
}
