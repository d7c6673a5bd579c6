//! Property-Based Test Generators
//!
//! Proptest strategies for claims data that respect the submission rules.

use core_kernel::{ClaimPeriod, LecturerId};
use domain_claims::{ClaimLineInput, ClaimStatus, ClaimSubmission};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for any claim status
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop::sample::select(ClaimStatus::ALL.to_vec())
}

/// Strategy for valid claim periods
pub fn period_strategy() -> impl Strategy<Value = ClaimPeriod> {
    (1u32..=12, 2020i32..=2100).prop_map(|(month, year)| {
        ClaimPeriod::new(month, year).expect("generated period is in range")
    })
}

/// Strategy for decimals between 0.01 and `max` carrying 0 to 6 decimal places
fn fractional_strategy(max: i64) -> impl Strategy<Value = Decimal> {
    (0u32..=6).prop_flat_map(move |scale| {
        let unit = 10i64.pow(scale);
        let lowest = (unit / 100).max(1);
        (lowest..=max * unit).prop_map(move |mantissa| Decimal::new(mantissa, scale))
    })
}

/// Strategy for hours between 0.01 and 500
pub fn hours_strategy() -> impl Strategy<Value = Decimal> {
    fractional_strategy(500)
}

/// Strategy for hourly rates between 0.01 and 10000
pub fn hourly_rate_strategy() -> impl Strategy<Value = Decimal> {
    fractional_strategy(10_000)
}

/// Strategy for a valid activity line
pub fn line_strategy() -> impl Strategy<Value = ClaimLineInput> {
    ("[A-Za-z][A-Za-z0-9 :-]{0,60}", hours_strategy())
        .prop_map(|(description, hours)| ClaimLineInput::new(description, hours))
}

/// Strategy for a submission that passes validation
pub fn valid_submission_strategy() -> impl Strategy<Value = ClaimSubmission> {
    (
        1u64..1000u64,
        period_strategy(),
        hourly_rate_strategy(),
        prop::collection::vec(line_strategy(), 1..8),
    )
        .prop_map(|(lecturer, period, hourly_rate, lines)| ClaimSubmission {
            lecturer_id: LecturerId::new(lecturer),
            month: period.month(),
            year: period.year(),
            hourly_rate,
            additional_notes: String::new(),
            lines,
        })
}
