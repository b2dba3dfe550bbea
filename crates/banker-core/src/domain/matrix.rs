//! Row-level helpers over resource matrices.
//!
//! All helpers assume the rows they compare have the same length.  That holds
//! for any input that passed [`crate::validate`]; callers that skip validation
//! get comparisons truncated to the shorter row.

/// A `P × R` table of resource counts; row `i` belongs to process `i`.
pub type Matrix = Vec<Vec<u32>>;

/// `R` resource counts, one per resource type.
pub type ResourceVector = Vec<u32>;

/// Computes `Need = Max − Allocation` element by element.
///
/// Subtraction saturates at zero, so an unvalidated `allocation > max` cell
/// yields `0` rather than wrapping.
pub fn need_matrix(allocation: &[Vec<u32>], max: &[Vec<u32>]) -> Matrix {
    let need: Matrix = max
        .iter()
        .zip(allocation)
        .map(|(max_row, alloc_row)| {
            max_row
                .iter()
                .zip(alloc_row)
                .map(|(&m, &a)| m.saturating_sub(a))
                .collect()
        })
        .collect();
    tracing::trace!(processes = need.len(), "computed need matrix");
    need
}

/// Returns `true` when every component of `demand` can be covered by `work`
/// at the same time.
pub fn fits_within(demand: &[u32], work: &[u32]) -> bool {
    demand.iter().zip(work).all(|(&d, &w)| d <= w)
}

/// Adds `row` into `work`, simulating a process releasing what it holds.
///
/// Saturates at `u32::MAX` instead of overflowing.
pub fn release_into(work: &mut [u32], row: &[u32]) {
    for (w, &r) in work.iter_mut().zip(row) {
        *w = w.saturating_add(r);
    }
}

/// Returns `true` if the row holds zero units of every resource type.
pub fn is_zero_row(row: &[u32]) -> bool {
    row.iter().all(|&v| v == 0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
