//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for claims. Values are fixed so that expected
//! totals can be written down in tests.

use core_kernel::{ClaimPeriod, LecturerId, Money};
use domain_claims::{ClaimLineInput, NewDocument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for money values
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard hourly rate (R 500)
    pub fn hourly_rate() -> Money {
        Money::zar(dec!(500))
    }

    /// Rate with cents, for rounding checks
    pub fn odd_hourly_rate() -> Money {
        Money::zar(dec!(412.75))
    }
}

/// Fixture for claim periods
pub struct PeriodFixtures;

impl PeriodFixtures {
    /// March 2025
    pub fn march_2025() -> ClaimPeriod {
        ClaimPeriod::new(3, 2025).expect("valid fixture period")
    }

    /// January 2025, whose previous month is in another year
    pub fn january_2025() -> ClaimPeriod {
        ClaimPeriod::new(1, 2025).expect("valid fixture period")
    }
}

/// Fixture for lecturer references
pub struct LecturerFixtures;

impl LecturerFixtures {
    pub fn lecturer() -> LecturerId {
        LecturerId::new(1)
    }

    pub fn other_lecturer() -> LecturerId {
        LecturerId::new(2)
    }
}

/// Fixture for claim lines
pub struct LineFixtures;

impl LineFixtures {
    /// Three lines totalling 12 hours
    pub fn teaching_week() -> Vec<(String, Decimal)> {
        vec![
            ("Lecture: PROG6212 - Introduction to C#".to_string(), dec!(6)),
            ("Tutorial: Arrays and Lists".to_string(), dec!(4)),
            ("Consultation: Student queries".to_string(), dec!(2)),
        ]
    }

    /// The same lines as form input
    pub fn teaching_week_inputs() -> Vec<ClaimLineInput> {
        Self::teaching_week()
            .into_iter()
            .map(|(description, hours)| ClaimLineInput::new(description, hours))
            .collect()
    }

    /// A row the lecturer left empty
    pub fn blank_row() -> ClaimLineInput {
        ClaimLineInput::default()
    }
}

/// Fixture for document metadata
pub struct DocumentFixtures;

impl DocumentFixtures {
    pub fn timesheet() -> NewDocument {
        NewDocument {
            file_name: "timesheet.pdf".to_string(),
            file_path: "uploads/claim-1/timesheet.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            size_bytes: 2048,
        }
    }

    pub fn register() -> NewDocument {
        NewDocument {
            file_name: "attendance.xlsx".to_string(),
            file_path: "uploads/claim-1/attendance.xlsx".to_string(),
            content_type: None,
            size_bytes: 512,
        }
    }
}
