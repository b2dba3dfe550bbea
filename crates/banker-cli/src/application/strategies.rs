//! Prevention and recovery explanations applied to the loaded state.
//!
//! Both use cases refuse to run until an analysis has loaded a state into the
//! [`AnalysisContext`]; the explanation is only meaningful against a concrete
//! system.

use banker_core::{deadlocked_processes, PreventionStrategy, RecoveryStrategy};
use thiserror::Error;
use tracing::debug;

use crate::application::analyze::AnalysisContext;
use crate::domain::report::StrategyReport;

/// Error type for the strategy use cases.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// No analysis has loaded a state yet.
    #[error("no system state loaded: run an analysis first")]
    NoState,
}

/// Explains how `strategy` would keep the loaded system out of deadlock.
///
/// # Errors
///
/// Returns [`ContextError::NoState`] if nothing has been analysed yet.
pub fn apply_prevention(
    ctx: &AnalysisContext,
    strategy: PreventionStrategy,
) -> Result<StrategyReport, ContextError> {
    ctx.state().ok_or(ContextError::NoState)?;
    debug!(%strategy, "applying prevention strategy");
    Ok(StrategyReport {
        title: strategy.title(),
        description: strategy.description().to_string(),
        detail: strategy.effect().to_string(),
    })
}

/// Explains what `strategy` would do to the processes that are deadlocked in
/// the loaded state.
///
/// Deadlocked processes are recomputed from the cached Allocation and
/// Available, so this works after either kind of analysis.
///
/// # Errors
///
/// Returns [`ContextError::NoState`] if nothing has been analysed yet.
pub fn apply_recovery(
    ctx: &AnalysisContext,
    strategy: RecoveryStrategy,
) -> Result<StrategyReport, ContextError> {
    let state = ctx.state().ok_or(ContextError::NoState)?;
    let deadlocked = deadlocked_processes(&state.allocation, &state.available);
    debug!(%strategy, ?deadlocked, "applying recovery strategy");
    Ok(StrategyReport {
        title: strategy.title(),
        description: strategy.description().to_string(),
        detail: strategy.action(&deadlocked),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
