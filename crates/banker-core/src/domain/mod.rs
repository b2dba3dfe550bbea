//! Data model for resource-allocation analysis.
//!
//! # Matrices and vectors (for beginners)
//!
//! The Banker's Algorithm describes a system with `P` processes and `R`
//! resource types using a handful of tables:
//!
//! - **Allocation** (`P × R`) – how many units of each resource type every
//!   process holds right now.
//! - **Max** (`P × R`) – the most each process has declared it will ever hold.
//! - **Need** (`P × R`) – `Max − Allocation`, the demand still outstanding.
//! - **Available** (`R`) – units of each resource type nobody holds.
//!
//! Row `i` of every matrix belongs to process `i`; column `j` belongs to
//! resource type `j`.

/// Matrix and vector helpers shared by all algorithms.
pub mod matrix;

/// The validated snapshot consumed by the analysis functions.
///
/// See [`snapshot::Snapshot`] for the main type.
pub mod snapshot;
