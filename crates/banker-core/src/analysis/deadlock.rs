//! Deadlock detection by allocation-graph reduction.
//!
//! Unlike the safety check this works from Allocation and Available alone; it
//! knows nothing about declared maximums.  The procedure repeatedly "resolves"
//! any process whose row fits inside the free pool, returns that row to the
//! pool, and keeps going until a full pass resolves nothing.  Whatever is left
//! unresolved is deadlocked.
//!
//! The fit test compares each process's *allocation* row against `Work`.
//! The textbook formulation compares a separate pending-request matrix
//! instead; no such matrix exists in this model, so the allocation row stands
//! in as the request bound.  This reproduces the established behaviour of the
//! tool rather than the textbook algorithm.

use tracing::debug;

use crate::domain::matrix::{fits_within, is_zero_row, release_into};

/// Returns `true` if at least one process can never be resolved.
///
/// Equivalent to `!deadlocked_processes(allocation, available).is_empty()`.
pub fn detect_deadlock(allocation: &[Vec<u32>], available: &[u32]) -> bool {
    !deadlocked_processes(allocation, available).is_empty()
}

/// Returns the indices (ascending) of processes left unresolved once the
/// reduction reaches its fixed point.
///
/// Inputs are expected to have passed [`crate::validate_allocation`].  A
/// ragged row is compared against `available` only up to the shorter of the
/// two, so resource columns beyond `available.len()` are ignored.
///
/// Processes holding nothing are resolved up front.  The remaining processes
/// are swept repeatedly; each sweep may resolve several of them, and sweeping
/// stops after a pass without progress.  At most `P` productive passes occur,
/// so the worst case is `O(P² · R)`.
pub fn deadlocked_processes(allocation: &[Vec<u32>], available: &[u32]) -> Vec<usize> {
    let mut work = available.to_vec();
    let mut finish: Vec<bool> = allocation.iter().map(|row| is_zero_row(row)).collect();

    let mut progressed = true;
    let mut pass = 0usize;
    while progressed {
        progressed = false;
        for (process, row) in allocation.iter().enumerate() {
            if finish[process] || !fits_within(row, &work) {
                continue;
            }
            release_into(&mut work, row);
            finish[process] = true;
            progressed = true;
            debug!(pass, process, ?work, "process resolved");
        }
        pass += 1;
    }

    let deadlocked: Vec<usize> = finish
        .iter()
        .enumerate()
        .filter_map(|(process, &done)| (!done).then_some(process))
        .collect();
    debug!(passes = pass, ?deadlocked, "reduction reached fixed point");
    deadlocked
}

// ── Tests ─────────────────────────────────────────────────────────────────────
