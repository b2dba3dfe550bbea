//! Report rendering for stdout.
//!
//! Text output mirrors what an operator wants to read: an outcome line, the
//! safe sequence if there is one, and optionally a per-process breakdown
//! drawn from the [`AnalysisContext`].  JSON output serializes the report
//! structures as they are.

use serde::Serialize;

use crate::application::analyze::{AnalysisContext, LoadedState};
use crate::domain::report::{DeadlockReport, SafetyReport, StrategyReport};

const SAFE_MESSAGE: &str = "System is in a safe state.";
const UNSAFE_MESSAGE: &str = "System is in unsafe state. Deadlock possible!";
const DEADLOCK_MESSAGE: &str = "Deadlock detected! One or more processes are deadlocked.";
const NO_DEADLOCK_MESSAGE: &str = "No deadlock detected. All processes can complete.";

/// Renders any report as pretty-printed JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn render_json<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Renders a safety report, optionally followed by the cached process details.
pub fn render_safety_text(
    report: &SafetyReport,
    ctx: &AnalysisContext,
    show_details: bool,
) -> String {
    let mut lines = Vec::new();
    match &report.sequence {
        Some(sequence) if report.safe => {
            lines.push(SAFE_MESSAGE.to_string());
            lines.push(String::new());
            lines.push("Safe Execution Sequence".to_string());
            lines.push(format_sequence(sequence));
            lines.push(
                "This sequence shows one possible order in which processes can execute without causing a deadlock."
                    .to_string(),
            );
            match report.verified {
                Some(true) => lines.push("Sequence verified by independent replay.".to_string()),
                Some(false) => lines.push("WARNING: sequence failed independent replay.".to_string()),
                None => {}
            }
        }
        _ => lines.push(UNSAFE_MESSAGE.to_string()),
    }
    push_details(&mut lines, ctx, show_details);
    lines.join("\n")
}

/// Renders a deadlock report, optionally followed by the cached process details.
pub fn render_deadlock_text(
    report: &DeadlockReport,
    ctx: &AnalysisContext,
    show_details: bool,
) -> String {
    let mut lines = Vec::new();
    if report.deadlocked {
        lines.push(DEADLOCK_MESSAGE.to_string());
        lines.push(format!("Deadlocked processes: {}", format_processes(&report.processes)));
    } else {
        lines.push(NO_DEADLOCK_MESSAGE.to_string());
    }
    push_details(&mut lines, ctx, show_details);
    lines.join("\n")
}

/// Renders a prevention or recovery explanation.
pub fn render_strategy_text(report: &StrategyReport) -> String {
    [report.title.as_str(), report.description.as_str(), report.detail.as_str()].join("\n")
}

/// Renders the per-process Allocation / Max / Need block and Available.
///
/// Max and Need rows are shown only when the state carries them.
pub fn render_details(state: &LoadedState) -> String {
    let mut lines = Vec::new();
    for (process, allocation) in state.allocation.iter().enumerate() {
        lines.push(format!("Process P{process}"));
        lines.push(format!("  Allocation: {}", format_row(allocation)));
        if let Some(max) = state.max.as_ref().and_then(|m| m.get(process)) {
            lines.push(format!("  Max:        {}", format_row(max)));
        }
        if let Some(need) = state.need.as_ref().and_then(|n| n.get(process)) {
            lines.push(format!("  Need:       {}", format_row(need)));
        }
    }
    lines.push("Available Resources".to_string());
    lines.push(format!("  {}", format_row(&state.available)));
    lines.join("\n")
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn push_details(lines: &mut Vec<String>, ctx: &AnalysisContext, show_details: bool) {
    if !show_details {
        return;
    }
    if let Some(state) = ctx.state() {
        lines.push(String::new());
        lines.push(render_details(state));
    }
}

/// `R0: 1, R1: 0, R2: 2`
fn format_row(row: &[u32]) -> String {
    row.iter()
        .enumerate()
        .map(|(resource, value)| format!("R{resource}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `P1 → P3 → P0`
fn format_sequence(sequence: &[usize]) -> String {
    sequence
        .iter()
        .map(|p| format!("P{p}"))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// `P1, P2`
fn format_processes(processes: &[usize]) -> String {
    processes
        .iter()
        .map(|p| format!("P{p}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
