//! Validated Allocation / Max / Available snapshot.

use serde::{Deserialize, Serialize};

use crate::analysis::deadlock::deadlocked_processes;
use crate::analysis::safety::{check_safety, SafetyOutcome};
use crate::analysis::validation::{validate, ValidationError};
use crate::domain::matrix::{need_matrix, Matrix, ResourceVector};

/// One point-in-time view of the system under analysis.
///
/// A `Snapshot` can only be obtained through [`Snapshot::new`] (or by
/// deserializing, which runs the same checks), so holding one proves that:
///
/// - Allocation and Max have the same number of rows (`P`),
/// - every row of both has exactly `R = available.len()` columns,
/// - no process holds more of any resource than its Max.
///
/// Need is deliberately not stored; [`Snapshot::need`] recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    allocation: Matrix,
    max: Matrix,
    available: ResourceVector,
}

/// Unchecked wire form used by `serde` before validation.
#[derive(Deserialize)]
struct RawSnapshot {
    allocation: Matrix,
    max: Matrix,
    available: ResourceVector,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = ValidationError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        Snapshot::new(raw.allocation, raw.max, raw.available)
    }
}

impl Snapshot {
    /// Validates the three inputs and wraps them in a `Snapshot`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] reported by [`validate`].
    pub fn new(
        allocation: Matrix,
        max: Matrix,
        available: ResourceVector,
    ) -> Result<Self, ValidationError> {
        validate(
            Some(allocation.as_slice()),
            Some(max.as_slice()),
            Some(available.as_slice()),
        )?;
        Ok(Self {
            allocation,
            max,
            available,
        })
    }

    pub fn allocation(&self) -> &[Vec<u32>] {
        &self.allocation
    }

    pub fn max(&self) -> &[Vec<u32>] {
        &self.max
    }

    pub fn available(&self) -> &[u32] {
        &self.available
    }

    /// Number of processes (`P`).
    pub fn process_count(&self) -> usize {
        self.allocation.len()
    }

    /// Number of resource types (`R`).
    pub fn resource_count(&self) -> usize {
        self.available.len()
    }

    /// Computes `Max − Allocation` afresh.
    pub fn need(&self) -> Matrix {
        need_matrix(&self.allocation, &self.max)
    }

    /// Runs the Banker's safety search on this snapshot.
    pub fn check_safety(&self) -> SafetyOutcome {
        check_safety(&self.allocation, &self.max, &self.available)
    }

    /// Runs allocation-graph deadlock detection, ignoring Max.
    pub fn deadlocked_processes(&self) -> Vec<usize> {
        deadlocked_processes(&self.allocation, &self.available)
    }

    /// Returns `true` if allocation-graph reduction leaves any process unresolved.
    pub fn detect_deadlock(&self) -> bool {
        !self.deadlocked_processes().is_empty()
    }

    /// Consumes the snapshot, returning `(allocation, max, available)`.
    pub fn into_parts(self) -> (Matrix, Matrix, ResourceVector) {
        (self.allocation, self.max, self.available)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
