//! Safety and deadlock use cases plus the context that remembers the last
//! analysed state for display.
//!
//! # Why an explicit context? (for beginners)
//!
//! After an analysis the front-end shows per-process details (Allocation,
//! Max, Need) and later commands (prevention, recovery) refer back to "the
//! current state".  Rather than keeping that in global variables, the caller
//! owns an [`AnalysisContext`] and passes it by reference to every use case
//! and renderer.  Nothing inside `banker-core` holds state between calls.

use banker_core::{
    deadlocked_processes, replay_sequence, validate_allocation, Matrix, MatrixKind,
    ResourceVector, Snapshot, ValidationError,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::report::{DeadlockReport, SafetyReport};
use crate::infrastructure::input::{InputError, InputSource};

/// Error type for the analysis use cases.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The input source could not be read.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The input was read but rejected by validation.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
}

/// The state most recently loaded by an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedState {
    pub allocation: Matrix,
    /// Absent after a deadlock-only analysis, which takes no Max input.
    pub max: Option<Matrix>,
    pub available: ResourceVector,
    /// `Max − Allocation`, cached for display.  Absent whenever `max` is.
    pub need: Option<Matrix>,
}

impl LoadedState {
    pub fn process_count(&self) -> usize {
        self.allocation.len()
    }
}

/// Caller-owned cache of the last analysed state.
///
/// Used purely for re-display and for the strategy commands; every analysis
/// recomputes from its own input.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    state: Option<LoadedState>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last loaded state, if any analysis has succeeded since the last
    /// [`clear`](Self::clear).
    pub fn state(&self) -> Option<&LoadedState> {
        self.state.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Forgets the cached state.
    pub fn clear(&mut self) {
        self.state = None;
    }
}

/// Reads a full input triple, checks it for safety and records it in `ctx`.
///
/// With `verify` set, the returned sequence is independently replayed and the
/// result stored in [`SafetyReport::verified`].
///
/// The context is only updated when validation succeeds.
///
/// # Errors
///
/// Returns [`AnalyzeError::Input`] if the source cannot be read and
/// [`AnalyzeError::Invalid`] if the input fails validation.
pub fn run_safety(
    ctx: &mut AnalysisContext,
    source: &dyn InputSource,
    verify: bool,
) -> Result<SafetyReport, AnalyzeError> {
    let raw = source.read()?;
    let snapshot = build_snapshot(raw.allocation, raw.max, raw.available).map_err(|e| {
        warn!(error = %e, "safety input rejected");
        e
    })?;

    let outcome = snapshot.check_safety();
    let need = snapshot.need();
    let sequence = outcome.sequence().map(|s| s.as_slice().to_vec());

    let verified = match (&sequence, verify) {
        (Some(order), true) => Some(
            replay_sequence(snapshot.allocation(), snapshot.max(), snapshot.available(), order)
                .is_ok(),
        ),
        _ => None,
    };

    info!(
        processes = snapshot.process_count(),
        resources = snapshot.resource_count(),
        safe = outcome.is_safe(),
        ?sequence,
        "safety check complete"
    );

    let (allocation, max, available) = snapshot.into_parts();
    ctx.state = Some(LoadedState {
        allocation,
        max: Some(max),
        available,
        need: Some(need.clone()),
    });

    Ok(SafetyReport {
        safe: outcome.is_safe(),
        sequence,
        need,
        verified,
    })
}

/// Reads Allocation and Available, runs deadlock detection and records the
/// state in `ctx`.
///
/// Any Max supplied by the source is ignored.
///
/// # Errors
///
/// Returns [`AnalyzeError::Input`] if the source cannot be read and
/// [`AnalyzeError::Invalid`] if the input fails validation.
pub fn run_deadlock(
    ctx: &mut AnalysisContext,
    source: &dyn InputSource,
) -> Result<DeadlockReport, AnalyzeError> {
    let raw = source.read()?;
    validate_allocation(raw.allocation.as_deref(), raw.available.as_deref()).map_err(|e| {
        warn!(error = %e, "deadlock input rejected");
        e
    })?;
    let allocation = raw
        .allocation
        .ok_or(ValidationError::MissingInput(MatrixKind::Allocation))?;
    let available = raw
        .available
        .ok_or(ValidationError::MissingInput(MatrixKind::Available))?;

    let processes = deadlocked_processes(&allocation, &available);
    info!(
        processes = allocation.len(),
        deadlocked = ?processes,
        "deadlock detection complete"
    );

    ctx.state = Some(LoadedState {
        allocation,
        max: None,
        available,
        need: None,
    });

    Ok(DeadlockReport::from_processes(processes))
}

/// Unwraps the optional inputs in validation order and builds a [`Snapshot`].
fn build_snapshot(
    allocation: Option<Matrix>,
    max: Option<Matrix>,
    available: Option<ResourceVector>,
) -> Result<Snapshot, ValidationError> {
    let allocation = allocation.ok_or(ValidationError::MissingInput(MatrixKind::Allocation))?;
    let max = max.ok_or(ValidationError::MissingInput(MatrixKind::Max))?;
    let available = available.ok_or(ValidationError::MissingInput(MatrixKind::Available))?;
    Snapshot::new(allocation, max, available)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::input::{MockInputSource, RawInput};

    fn source_returning(raw: RawInput) -> MockInputSource {
        let mut source = MockInputSource::new();
        source.expect_read().times(1).returning(move || Ok(raw.clone()));
        source
    }

    fn textbook() -> RawInput {
        RawInput {
            allocation: Some(vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]]),
            max: Some(vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]]),
            available: Some(vec![3, 3, 2]),
        }
    }

    // ── run_safety ────────────────────────────────────────────────────────────

    #[test]
    fn test_run_safety_reports_sequence_and_need() {
        let mut ctx = AnalysisContext::new();
        let report = run_safety(&mut ctx, &source_returning(textbook()), false).expect("valid");

        assert!(report.safe);
        assert_eq!(report.sequence, Some(vec![1, 3, 0, 2, 4]));
        assert_eq!(report.need[0], vec![7, 4, 3]);
        assert_eq!(report.verified, None);
    }

    #[test]
    fn test_run_safety_caches_state_with_need() {
        let mut ctx = AnalysisContext::new();
        run_safety(&mut ctx, &source_returning(textbook()), false).expect("valid");

        let state = ctx.state().expect("state cached after success");
        assert_eq!(state.process_count(), 5);
        assert!(state.max.is_some());
        assert_eq!(state.need.as_ref().map(|n| n[1].clone()), Some(vec![1, 2, 2]));
    }

    #[test]
    fn test_run_safety_verifies_sequence_when_asked() {
        let mut ctx = AnalysisContext::new();
        let report = run_safety(&mut ctx, &source_returning(textbook()), true).expect("valid");
        assert_eq!(report.verified, Some(true));
    }

    #[test]
    fn test_run_safety_skips_verification_for_unsafe_state() {
        let raw = RawInput {
            allocation: Some(vec![vec![1, 0], vec![1, 0]]),
            max: Some(vec![vec![2, 2], vec![2, 2]]),
            available: Some(vec![0, 0]),
        };
        let mut ctx = AnalysisContext::new();
        let report = run_safety(&mut ctx, &source_returning(raw), true).expect("valid");

        assert!(!report.safe);
        assert_eq!(report.sequence, None);
        assert_eq!(report.verified, None);
    }

    #[test]
    fn test_run_safety_rejects_missing_max_and_leaves_context_untouched() {
        let raw = RawInput {
            max: None,
            ..textbook()
        };
        let mut ctx = AnalysisContext::new();
        let err = run_safety(&mut ctx, &source_returning(raw), false).expect_err("max is missing");

        assert!(matches!(
            err,
            AnalyzeError::Invalid(ValidationError::MissingInput(MatrixKind::Max))
        ));
        assert!(!ctx.is_loaded());
    }

    #[test]
    fn test_run_safety_propagates_input_errors() {
        let mut source = MockInputSource::new();
        source.expect_read().returning(|| {
            Err(InputError::Io {
                path: "missing.toml".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });
        let mut ctx = AnalysisContext::new();

        let err = run_safety(&mut ctx, &source, false).expect_err("source fails");
        assert!(matches!(err, AnalyzeError::Input(_)));
    }

    // ── run_deadlock ──────────────────────────────────────────────────────────

    #[test]
    fn test_run_deadlock_reports_no_deadlock_for_idle_processes() {
        let raw = RawInput {
            allocation: Some(vec![vec![0, 0], vec![0, 0]]),
            max: None,
            available: Some(vec![1, 1]),
        };
        let mut ctx = AnalysisContext::new();
        let report = run_deadlock(&mut ctx, &source_returning(raw)).expect("valid");

        assert!(!report.deadlocked);
        assert!(report.processes.is_empty());
    }

    #[test]
    fn test_run_deadlock_lists_deadlocked_processes() {
        let raw = RawInput {
            allocation: Some(vec![vec![2, 0], vec![0, 2]]),
            max: None,
            available: Some(vec![1, 1]),
        };
        let mut ctx = AnalysisContext::new();
        let report = run_deadlock(&mut ctx, &source_returning(raw)).expect("valid");

        assert_eq!(report, DeadlockReport::from_processes(vec![0, 1]));
    }

    #[test]
    fn test_run_deadlock_replaces_cached_safety_state_and_drops_need() {
        let mut ctx = AnalysisContext::new();
        run_safety(&mut ctx, &source_returning(textbook()), false).expect("valid");

        let raw = RawInput {
            allocation: Some(vec![vec![1]]),
            max: None,
            available: Some(vec![0]),
        };
        run_deadlock(&mut ctx, &source_returning(raw)).expect("valid");

        let state = ctx.state().expect("state cached");
        assert_eq!(state.allocation, vec![vec![1]]);
        assert_eq!(state.max, None);
        assert_eq!(state.need, None);
    }

    #[test]
    fn test_run_deadlock_rejects_resource_count_mismatch() {
        let raw = RawInput {
            allocation: Some(vec![vec![1, 1]]),
            max: None,
            available: Some(vec![1]),
        };
        let mut ctx = AnalysisContext::new();
        let err = run_deadlock(&mut ctx, &source_returning(raw)).expect_err("shape mismatch");
        assert!(matches!(err, AnalyzeError::Invalid(ValidationError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_clear_forgets_cached_state() {
        let mut ctx = AnalysisContext::new();
        run_safety(&mut ctx, &source_returning(textbook()), false).expect("valid");
        ctx.clear();
        assert!(ctx.state().is_none());
    }
}
