//! Sample data for demonstrations
//!
//! Seeding is an explicit start-up call, never a side effect of a query.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use core_kernel::{ClaimPeriod, LecturerId, Money};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::store::ClaimsStore;

fn sample(
    lecturer: u64,
    period: ClaimPeriod,
    rate: Decimal,
    status: ClaimStatus,
    lines: &[(&str, Decimal)],
) -> Result<Claim, ClaimError> {
    Claim::new(
        LecturerId::new(lecturer),
        period,
        Money::zar(rate),
        lines.iter().map(|&(desc, hours)| (desc.to_string(), hours)).collect(),
        status,
    )
}

/// The demonstration claims: two awaiting verification this month and one
/// awaiting approval from last month
pub fn sample_claims(current: ClaimPeriod) -> Result<Vec<Claim>, ClaimError> {
    Ok(vec![
        sample(
            1,
            current,
            dec!(500),
            ClaimStatus::Submitted,
            &[
                ("Lecture: PROG6212 - Introduction to C#", dec!(6)),
                ("Tutorial: Arrays and Lists", dec!(4)),
                ("Consultation: Student queries", dec!(2)),
            ],
        )?,
        sample(
            2,
            current,
            dec!(450),
            ClaimStatus::Submitted,
            &[
                ("Lecture: IPMA3221 - Project Management", dec!(5)),
                ("Marking: Assignment 1", dec!(3)),
            ],
        )?,
        sample(
            3,
            current.previous(),
            dec!(550),
            ClaimStatus::Verified,
            &[
                ("Lecture: DATA3043 - Database Design", dec!(8)),
                ("Lab Session: SQL Queries", dec!(5)),
                ("Marking: ICE Tasks", dec!(2)),
            ],
        )?,
    ])
}

impl ClaimsStore {
    /// Loads the sample claims into an empty store
    ///
    /// Does nothing when the store already holds claims. Returns how many
    /// claims were inserted.
    pub fn seed_sample_data(&self) -> Result<usize, ClaimError> {
        let inserted = self.add_claims_if_empty(sample_claims(ClaimPeriod::current())?);
        if inserted > 0 {
            info!(count = inserted, "Seeded sample claims");
        }
        Ok(inserted)
    }
}
