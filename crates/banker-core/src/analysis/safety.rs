//! Banker's Algorithm safety check.
//!
//! # How the safety search works (for beginners)
//!
//! A state is *safe* if there is some order in which every process can be
//! given everything it might still ask for (its Need), run to completion, and
//! hand back everything it holds.  The search simulates exactly that:
//!
//! 1. `Work` starts as a copy of Available.
//! 2. Find a process that has not finished yet and whose whole Need row fits
//!    inside `Work`.  Pretend it runs to completion: its Allocation row is
//!    added back into `Work`.
//! 3. Repeat until every process has finished (safe) or no remaining process
//!    fits (unsafe).
//!
//! Each round scans processes in ascending index order and takes the first
//! one that fits, so the reported order is deterministic.  It is *a* safe
//! order, not necessarily the only one.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::matrix::{fits_within, need_matrix, release_into};

/// An order in which every process can run to completion.
///
/// Contains each process index `0..P` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SafeSequence(Vec<usize>);

impl SafeSequence {
    /// Returns the process indices in finishing order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of processes in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the sequence of a system with no processes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the process indices in finishing order.
    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    /// Consumes the sequence and returns the underlying indices.
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

/// Result of a safety check.
///
/// An unsafe state is a normal answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyOutcome {
    /// Every process can finish; the sequence is a witness order.
    Safe(SafeSequence),
    /// No finishing order exists from this state.
    Unsafe,
}

impl SafetyOutcome {
    /// Returns `true` if a safe sequence was found.
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyOutcome::Safe(_))
    }

    /// Returns the witness sequence, or `None` when the state is unsafe.
    pub fn sequence(&self) -> Option<&SafeSequence> {
        match self {
            SafetyOutcome::Safe(sequence) => Some(sequence),
            SafetyOutcome::Unsafe => None,
        }
    }
}

/// Runs the Banker's safety search over an already validated input triple.
///
/// Need is recomputed from `max − allocation` on every call.  The search
/// performs at most `P` rounds of a `P`-wide scan, each comparison touching
/// `R` resources, for `O(P² · R)` work in the worst case.
///
/// With zero processes the state is trivially safe with an empty sequence.
///
/// Inputs are expected to have passed [`crate::validate`].  Without that,
/// mismatched row lengths are compared only up to the shorter row, and an
/// Allocation / Max row-count mismatch is reported as [`SafetyOutcome::Unsafe`]
/// since some process has no declared maximum.
pub fn check_safety(allocation: &[Vec<u32>], max: &[Vec<u32>], available: &[u32]) -> SafetyOutcome {
    let processes = allocation.len();
    if max.len() != processes {
        debug!(processes, max_rows = max.len(), "row count mismatch; state is unsafe");
        return SafetyOutcome::Unsafe;
    }
    let need = need_matrix(allocation, max);
    let mut work = available.to_vec();
    let mut finish = vec![false; processes];
    let mut sequence = Vec::with_capacity(processes);

    for round in 0..processes {
        let candidate = (0..processes).find(|&i| !finish[i] && fits_within(&need[i], &work));

        let Some(process) = candidate else {
            debug!(round, finished = sequence.len(), ?work, "no process can proceed; state is unsafe");
            return SafetyOutcome::Unsafe;
        };

        release_into(&mut work, &allocation[process]);
        finish[process] = true;
        sequence.push(process);
        debug!(round, process, ?work, "process can run to completion");
    }

    SafetyOutcome::Safe(SafeSequence(sequence))
}

// ── Sequence replay ───────────────────────────────────────────────────────────

/// Reasons a proposed finishing order fails independent re-simulation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// The sequence names a process that does not exist.
    #[error("process {process} is out of range for {processes} processes")]
    OutOfRange { process: usize, processes: usize },

    /// The sequence names the same process twice.
    #[error("process {0} appears more than once in the sequence")]
    Duplicate(usize),

    /// A process cannot have its Need satisfied when its turn comes.
    #[error(
        "step {step}: process {process} needs {need} of resource {resource} but only {work} are free"
    )]
    Blocked {
        step: usize,
        process: usize,
        resource: usize,
        need: u32,
        work: u32,
    },

    /// The sequence does not cover every process.
    #[error("sequence covers {found} of {expected} processes")]
    Incomplete { expected: usize, found: usize },
}

/// Re-simulates `sequence` against the input triple and reports the first
/// step at which it stops being a valid finishing order.
///
/// This is independent of [`check_safety`]: it trusts nothing about how the
/// sequence was produced.
///
/// A process without a Max row (unvalidated input where Max is shorter than
/// Allocation) is reported as [`ReplayError::OutOfRange`].
///
/// # Errors
///
/// Returns a [`ReplayError`] naming the first violation found.
pub fn replay_sequence(
    allocation: &[Vec<u32>],
    max: &[Vec<u32>],
    available: &[u32],
    sequence: &[usize],
) -> Result<(), ReplayError> {
    let processes = allocation.len();
    let need = need_matrix(allocation, max);
    let mut work = available.to_vec();
    let mut finish = vec![false; processes];

    // Need has one row per process that has both an Allocation and a Max row.
    let known = need.len();

    for (step, &process) in sequence.iter().enumerate() {
        if process >= known {
            return Err(ReplayError::OutOfRange {
                process,
                processes: known,
            });
        }
        if finish[process] {
            return Err(ReplayError::Duplicate(process));
        }
        let blocked = need[process]
            .iter()
            .zip(&work)
            .position(|(&n, &w)| n > w);
        if let Some(resource) = blocked {
            return Err(ReplayError::Blocked {
                step,
                process,
                resource,
                need: need[process][resource],
                work: work[resource],
            });
        }
        release_into(&mut work, &allocation[process]);
        finish[process] = true;
    }

    if sequence.len() != processes {
        return Err(ReplayError::Incomplete {
            expected: processes,
            found: sequence.len(),
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> (Vec<Vec<u32>>, Vec<Vec<u32>>, Vec<u32>) {
        (
            vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]],
            vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]],
            vec![3, 3, 2],
        )
    }

    // ── check_safety ──────────────────────────────────────────────────────────

    #[test]
    fn test_check_safety_finds_lowest_index_order_for_textbook_state() {
        let (allocation, max, available) = textbook();
        let outcome = check_safety(&allocation, &max, &available);
        assert_eq!(outcome.sequence().map(SafeSequence::as_slice), Some(&[1, 3, 0, 2, 4][..]));
    }

    #[test]
    fn test_check_safety_reports_unsafe_when_no_process_fits() {
        let outcome = check_safety(&[vec![1, 0], vec![1, 0]], &[vec![2, 2], vec![2, 2]], &[0, 0]);
        assert_eq!(outcome, SafetyOutcome::Unsafe);
        assert!(!outcome.is_safe());
        assert!(outcome.sequence().is_none());
    }

    #[test]
    fn test_check_safety_is_trivially_safe_with_no_processes() {
        let outcome = check_safety(&[], &[], &[1, 2]);
        assert_eq!(outcome, SafetyOutcome::Safe(SafeSequence(Vec::new())));
    }

    #[test]
    fn test_check_safety_takes_zero_need_process_immediately() {
        // P1 already holds its max, so it goes first even though P0 cannot fit yet.
        let outcome = check_safety(&[vec![0], vec![2]], &[vec![3], vec![2]], &[1]);
        assert_eq!(outcome.sequence().map(SafeSequence::as_slice), Some(&[1, 0][..]));
    }

    #[test]
    fn test_check_safety_prefers_lowest_index_when_several_fit() {
        let outcome = check_safety(&[vec![0], vec![0], vec![0]], &[vec![1], vec![1], vec![1]], &[1]);
        assert_eq!(outcome.sequence().map(SafeSequence::as_slice), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn test_check_safety_detects_unsafe_after_partial_progress() {
        // P0 can finish, but releasing its single unit never satisfies P1 or P2.
        let allocation = vec![vec![1, 0], vec![0, 0], vec![0, 0]];
        let max = vec![vec![1, 0], vec![0, 3], vec![3, 0]];
        let outcome = check_safety(&allocation, &max, &[1, 1]);
        assert_eq!(outcome, SafetyOutcome::Unsafe);
    }

    #[test]
    fn test_check_safety_reports_unsafe_when_max_has_fewer_rows() {
        let outcome = check_safety(&[vec![0], vec![0]], &[vec![1]], &[1]);
        assert_eq!(outcome, SafetyOutcome::Unsafe);
    }

    #[test]
    fn test_check_safety_reports_unsafe_when_max_has_extra_rows() {
        let outcome = check_safety(&[vec![0]], &[vec![1], vec![1]], &[1]);
        assert_eq!(outcome, SafetyOutcome::Unsafe);
    }

    #[test]
    fn test_check_safety_is_idempotent() {
        let (allocation, max, available) = textbook();
        let first = check_safety(&allocation, &max, &available);
        let second = check_safety(&allocation, &max, &available);
        assert_eq!(first, second);
    }

    #[test]
    fn test_safety_outcome_serializes_sequence_as_plain_array() {
        let outcome = SafetyOutcome::Safe(SafeSequence(vec![1, 0]));
        let json = serde_json::to_string(&outcome).expect("serialize");
        assert_eq!(json, r#"{"safe":[1,0]}"#);
    }

    // ── replay_sequence ───────────────────────────────────────────────────────

    #[test]
    fn test_replay_accepts_alternative_textbook_order() {
        let (allocation, max, available) = textbook();
        assert_eq!(replay_sequence(&allocation, &max, &available, &[1, 3, 4, 0, 2]), Ok(()));
    }

    #[test]
    fn test_replay_rejects_order_that_starts_with_blocked_process() {
        let (allocation, max, available) = textbook();
        let result = replay_sequence(&allocation, &max, &available, &[0, 1, 2, 3, 4]);
        assert_eq!(
            result,
            Err(ReplayError::Blocked { step: 0, process: 0, resource: 0, need: 7, work: 3 })
        );
    }

    #[test]
    fn test_replay_rejects_duplicate_process() {
        let (allocation, max, available) = textbook();
        let result = replay_sequence(&allocation, &max, &available, &[1, 1]);
        assert_eq!(result, Err(ReplayError::Duplicate(1)));
    }

    #[test]
    fn test_replay_rejects_out_of_range_process() {
        let (allocation, max, available) = textbook();
        let result = replay_sequence(&allocation, &max, &available, &[7]);
        assert_eq!(result, Err(ReplayError::OutOfRange { process: 7, processes: 5 }));
    }

    #[test]
    fn test_replay_rejects_process_without_max_row() {
        let result = replay_sequence(&[vec![0], vec![0]], &[vec![1]], &[1], &[0, 1]);
        assert_eq!(result, Err(ReplayError::OutOfRange { process: 1, processes: 1 }));
    }

    #[test]
    fn test_replay_rejects_incomplete_sequence() {
        let (allocation, max, available) = textbook();
        let result = replay_sequence(&allocation, &max, &available, &[1, 3]);
        assert_eq!(result, Err(ReplayError::Incomplete { expected: 5, found: 2 }));
    }
}
