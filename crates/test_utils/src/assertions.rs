//! Custom Test Assertions
//!
//! Assertion helpers for claims and status views that give more useful
//! failure messages than a bare `assert!`.

use domain_claims::{Claim, ClaimError, ClaimStatus, StatusView};

/// Asserts that claims are ordered by id, newest first, with no duplicates
pub fn assert_newest_first(claims: &[Claim]) {
    for pair in claims.windows(2) {
        assert!(
            pair[0].id > pair[1].id,
            "Claims out of order: {} listed before {}",
            pair[0].id,
            pair[1].id
        );
    }
}

/// Asserts that every claim is in the given status
pub fn assert_all_in_status(claims: &[Claim], status: ClaimStatus) {
    for claim in claims {
        assert_eq!(
            claim.status, status,
            "Claim {} is {}, expected {}",
            claim.id, claim.status, status
        );
    }
}

/// Asserts the flags of a named step in a status view
///
/// # Panics
///
/// Panics if the step is missing or its flags differ
pub fn assert_step(view: &StatusView, name: &str, completed: bool, current: bool) {
    let step = view
        .steps
        .iter()
        .find(|step| step.name == name)
        .unwrap_or_else(|| panic!("Step {name} missing from view of {}", view.current_status));

    assert_eq!(
        (step.is_completed, step.is_current),
        (completed, current),
        "Step {name} for a {} claim: expected completed={completed} current={current}",
        view.current_status
    );
}

/// Asserts that an error is a validation failure naming exactly these fields
pub fn assert_validation_fields(err: &ClaimError, expected: &[&str]) {
    assert!(
        matches!(err, ClaimError::ValidationFailed(_)),
        "Expected ValidationFailed, got {err:?}"
    );
    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, expected, "Unexpected validation fields");
}
