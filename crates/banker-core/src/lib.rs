//! # banker-core
//!
//! Resource-allocation safety analysis following the classical Banker's
//! Algorithm model.  Given a snapshot of what every process currently holds
//! (Allocation), the most it may ever hold (Max), and what is still free
//! (Available), this crate answers two questions:
//!
//! - **Is the state safe?**  Can every process run to completion in *some*
//!   order without the system getting stuck?  If so, which order?
//! - **Is the system deadlocked right now?**  Using only Allocation and
//!   Available, can every process eventually be resolved?
//!
//! The crate is pure computation.  It has no I/O, no global state, and no
//! dependency on how the matrices were entered or how results are displayed.
//!
//! # Architecture overview (for beginners)
//!
//! - **`domain`** – The data model: matrices, resource vectors, and the
//!   validated [`Snapshot`] that ties them together.
//!
//! - **`analysis`** – The algorithms.  [`validate`] screens the input shape,
//!   [`check_safety`] runs the Banker's safety search, and [`detect_deadlock`]
//!   runs the allocation-graph reduction.
//!
//! - **`strategy`** – A small catalog describing the textbook deadlock
//!   prevention and recovery strategies, used by front-ends to explain
//!   what could be done about an unsafe or deadlocked state.

pub mod analysis;
pub mod domain;
pub mod strategy;

// Re-export the most-used types at the crate root so callers can write
// `banker_core::Snapshot` instead of `banker_core::domain::snapshot::Snapshot`.
pub use analysis::deadlock::{deadlocked_processes, detect_deadlock};
pub use analysis::safety::{check_safety, replay_sequence, ReplayError, SafeSequence, SafetyOutcome};
pub use analysis::validation::{validate, validate_allocation, Dimension, MatrixKind, ValidationError};
pub use domain::matrix::{Matrix, ResourceVector};
pub use domain::snapshot::Snapshot;
pub use strategy::{PreventionStrategy, RecoveryStrategy, UnknownStrategy};
