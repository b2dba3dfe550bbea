//! Input screening that runs before any simulation.
//!
//! Validation is a pure predicate plus a diagnostic: it never modifies its
//! inputs and stops at the first problem it finds.  Every error carries the
//! process and resource indices a front-end needs to point at the offending
//! cell.

use std::fmt;

use thiserror::Error;

/// Identifies one of the three analysis inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    Allocation,
    Max,
    Available,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixKind::Allocation => "allocation",
            MatrixKind::Max => "max",
            MatrixKind::Available => "available",
        };
        f.write_str(name)
    }
}

/// Which dimension two inputs disagree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Number of rows (processes).
    Processes,
    /// Number of columns (resource types).
    Resources,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Processes => f.write_str("processes"),
            Dimension::Resources => f.write_str("resources"),
        }
    }
}

/// Reasons an input triple is rejected before analysis.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One of the inputs was not supplied at all.
    #[error("missing input: {0} must be provided")]
    MissingInput(MatrixKind),

    /// Allocation, Max and Available disagree on the process or resource count.
    #[error("shape mismatch: {compared} has {found} {dimension}, expected {expected}")]
    ShapeMismatch {
        dimension: Dimension,
        /// The input whose size disagrees with the reference.
        compared: MatrixKind,
        expected: usize,
        found: usize,
    },

    /// A matrix row does not have exactly `R` columns.
    #[error("malformed input: {matrix} row for process {process} has {found} resources, expected {expected}")]
    MalformedInput {
        matrix: MatrixKind,
        process: usize,
        expected: usize,
        found: usize,
    },

    /// A process holds more of a resource than it declared it would ever need.
    #[error("process {process} has allocation greater than max for resource {resource} ({allocated} > {max})")]
    InvalidAllocation {
        process: usize,
        resource: usize,
        allocated: u32,
        max: u32,
    },
}

/// Screens the full Banker's input triple.
///
/// Checks run in this order and stop at the first failure:
///
/// 1. all three inputs are present,
/// 2. Allocation and Max have the same number of rows,
/// 3. Available has one entry per resource column of Allocation (with zero
///    processes this holds trivially and `R = available.len()`),
/// 4. every row of Allocation and Max has exactly `R` columns,
/// 5. `allocation[i][j] <= max[i][j]` everywhere.
///
/// # Errors
///
/// Returns the [`ValidationError`] describing the first failed check.
pub fn validate(
    allocation: Option<&[Vec<u32>]>,
    max: Option<&[Vec<u32>]>,
    available: Option<&[u32]>,
) -> Result<(), ValidationError> {
    let allocation = allocation.ok_or(ValidationError::MissingInput(MatrixKind::Allocation))?;
    let max = max.ok_or(ValidationError::MissingInput(MatrixKind::Max))?;
    let available = available.ok_or(ValidationError::MissingInput(MatrixKind::Available))?;

    if allocation.len() != max.len() {
        return Err(ValidationError::ShapeMismatch {
            dimension: Dimension::Processes,
            compared: MatrixKind::Max,
            expected: allocation.len(),
            found: max.len(),
        });
    }

    let resources = resource_count(allocation, available)?;
    check_rectangular(MatrixKind::Allocation, allocation, resources)?;
    check_rectangular(MatrixKind::Max, max, resources)?;

    for (process, (alloc_row, max_row)) in allocation.iter().zip(max).enumerate() {
        for (resource, (&allocated, &limit)) in alloc_row.iter().zip(max_row).enumerate() {
            if allocated > limit {
                return Err(ValidationError::InvalidAllocation {
                    process,
                    resource,
                    allocated,
                    max: limit,
                });
            }
        }
    }

    Ok(())
}

/// Screens the inputs of deadlock detection, which has no Max matrix.
///
/// Runs the presence, resource-count and rectangularity checks of
/// [`validate`] for Allocation and Available only.
///
/// # Errors
///
/// Returns the [`ValidationError`] describing the first failed check.
pub fn validate_allocation(
    allocation: Option<&[Vec<u32>]>,
    available: Option<&[u32]>,
) -> Result<(), ValidationError> {
    let allocation = allocation.ok_or(ValidationError::MissingInput(MatrixKind::Allocation))?;
    let available = available.ok_or(ValidationError::MissingInput(MatrixKind::Available))?;
    let resources = resource_count(allocation, available)?;
    check_rectangular(MatrixKind::Allocation, allocation, resources)
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Derives `R` from the first Allocation row and checks Available against it.
fn resource_count(allocation: &[Vec<u32>], available: &[u32]) -> Result<usize, ValidationError> {
    let Some(first) = allocation.first() else {
        return Ok(available.len());
    };
    if available.len() != first.len() {
        return Err(ValidationError::ShapeMismatch {
            dimension: Dimension::Resources,
            compared: MatrixKind::Available,
            expected: first.len(),
            found: available.len(),
        });
    }
    Ok(first.len())
}

fn check_rectangular(
    matrix: MatrixKind,
    rows: &[Vec<u32>],
    expected: usize,
) -> Result<(), ValidationError> {
    match rows.iter().position(|row| row.len() != expected) {
        Some(process) => Err(ValidationError::MalformedInput {
            matrix,
            process,
            expected,
            found: rows[process].len(),
        }),
        None => Ok(()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
