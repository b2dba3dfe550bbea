//! Serializable analysis results.

use banker_core::Matrix;
use serde::Serialize;

/// Outcome of a Banker's safety check, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    /// `true` when a safe finishing order exists.
    pub safe: bool,
    /// The witness order; `None` for an unsafe state.
    pub sequence: Option<Vec<usize>>,
    /// `Max − Allocation` for every process.
    pub need: Matrix,
    /// Result of independently replaying `sequence`, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Outcome of allocation-graph deadlock detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlockReport {
    /// `true` when at least one process can never be resolved.
    pub deadlocked: bool,
    /// Indices of the unresolved processes, ascending.
    pub processes: Vec<usize>,
}

impl DeadlockReport {
    pub fn from_processes(processes: Vec<usize>) -> Self {
        Self {
            deadlocked: !processes.is_empty(),
            processes,
        }
    }
}

/// Explanation of a prevention or recovery strategy applied to the loaded state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyReport {
    /// Upper-case heading, e.g. `"CIRCULAR WAIT"`.
    pub title: String,
    pub description: String,
    /// What applying the strategy would do to this particular state.
    pub detail: String,
}
