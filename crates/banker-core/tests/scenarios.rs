//! Integration tests for the worked scenarios of the analysis API.
//!
//! These exercise the public crate-root re-exports the way a front-end would:
//! validate first, then run the safety check or deadlock detection.

use banker_core::{
    check_safety, detect_deadlock, replay_sequence, validate, SafetyOutcome, Snapshot,
    ValidationError,
};

fn textbook() -> (Vec<Vec<u32>>, Vec<Vec<u32>>, Vec<u32>) {
    (
        vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]],
        vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]],
        vec![3, 3, 2],
    )
}

#[test]
fn test_classic_textbook_state_is_safe() {
    let (allocation, max, available) = textbook();
    validate(Some(&allocation[..]), Some(&max[..]), Some(&available[..]))
        .expect("textbook input is valid");

    let outcome = check_safety(&allocation, &max, &available);

    let sequence = outcome.sequence().expect("textbook state must be safe");
    assert_eq!(sequence.as_slice(), &[1, 3, 0, 2, 4]);
    assert_eq!(replay_sequence(&allocation, &max, &available, sequence.as_slice()), Ok(()));
}

#[test]
fn test_textbook_alternative_order_is_also_a_valid_witness() {
    let (allocation, max, available) = textbook();
    assert_eq!(replay_sequence(&allocation, &max, &available, &[1, 3, 4, 0, 2]), Ok(()));
}

#[test]
fn test_no_process_satisfiable_is_unsafe() {
    let allocation = vec![vec![1, 0], vec![1, 0]];
    let max = vec![vec![2, 2], vec![2, 2]];
    let available = vec![0, 0];

    assert_eq!(check_safety(&allocation, &max, &available), SafetyOutcome::Unsafe);
}

#[test]
fn test_zero_allocation_is_never_deadlocked() {
    assert!(!detect_deadlock(&[vec![0, 0], vec![0, 0]], &[1, 1]));
}

#[test]
fn test_allocation_above_max_is_rejected_with_indices() {
    let result = validate(Some(&[vec![5]][..]), Some(&[vec![3]][..]), Some(&[10][..]));
    assert!(matches!(
        result,
        Err(ValidationError::InvalidAllocation { process: 0, resource: 0, .. })
    ));
}

#[test]
fn test_snapshot_round_trip_through_safety_and_deadlock() {
    let (allocation, max, available) = textbook();
    let snapshot = Snapshot::new(allocation, max, available).expect("valid");

    assert!(snapshot.check_safety().is_safe());
    assert!(!snapshot.detect_deadlock());
}
