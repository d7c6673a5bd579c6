//! Test Data Builders
//!
//! Builders let tests state only the fields they care about and take
//! defaults for everything else.

use core_kernel::{ClaimPeriod, LecturerId, Money};
use domain_claims::{Claim, ClaimLineInput, ClaimStatus, ClaimSubmission};
use rust_decimal::Decimal;

use crate::fixtures::{LecturerFixtures, LineFixtures, MoneyFixtures, PeriodFixtures};

/// Builder for claims that bypass the submission boundary
pub struct ClaimBuilder {
    lecturer_id: LecturerId,
    period: ClaimPeriod,
    hourly_rate: Money,
    lines: Vec<(String, Decimal)>,
    status: ClaimStatus,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// A submitted claim for 12 hours at R 500
    pub fn new() -> Self {
        Self {
            lecturer_id: LecturerFixtures::lecturer(),
            period: PeriodFixtures::march_2025(),
            hourly_rate: MoneyFixtures::hourly_rate(),
            lines: LineFixtures::teaching_week(),
            status: ClaimStatus::Submitted,
        }
    }

    pub fn with_lecturer(mut self, lecturer_id: LecturerId) -> Self {
        self.lecturer_id = lecturer_id;
        self
    }

    pub fn with_period(mut self, period: ClaimPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn with_hourly_rate(mut self, rate: Money) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Replaces the default lines with a single one
    pub fn with_single_line(mut self, description: impl Into<String>, hours: Decimal) -> Self {
        self.lines = vec![(description.into(), hours)];
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds the claim
    ///
    /// # Panics
    ///
    /// Panics if the amount overflows
    pub fn build(self) -> Claim {
        Claim::new(
            self.lecturer_id,
            self.period,
            self.hourly_rate,
            self.lines,
            self.status,
        )
        .expect("builder produces a valid claim")
    }
}

/// Builder for form submissions
pub struct SubmissionBuilder {
    submission: ClaimSubmission,
}

impl Default for SubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionBuilder {
    /// A valid submission for March 2025 at R 500 per hour
    pub fn new() -> Self {
        let period = PeriodFixtures::march_2025();
        Self {
            submission: ClaimSubmission {
                lecturer_id: LecturerFixtures::lecturer(),
                month: period.month(),
                year: period.year(),
                hourly_rate: MoneyFixtures::hourly_rate().amount(),
                additional_notes: String::new(),
                lines: LineFixtures::teaching_week_inputs(),
            },
        }
    }

    pub fn with_lecturer(mut self, lecturer_id: LecturerId) -> Self {
        self.submission.lecturer_id = lecturer_id;
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.submission.month = month;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.submission.year = year;
        self
    }

    pub fn with_hourly_rate(mut self, rate: Decimal) -> Self {
        self.submission.hourly_rate = rate;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.submission.additional_notes = notes.into();
        self
    }

    pub fn with_lines(mut self, lines: Vec<ClaimLineInput>) -> Self {
        self.submission.lines = lines;
        self
    }

    pub fn add_line(mut self, line: ClaimLineInput) -> Self {
        self.submission.lines.push(line);
        self
    }

    pub fn build(self) -> ClaimSubmission {
        self.submission
    }
}
