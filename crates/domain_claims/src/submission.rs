//! Claim submission
//!
//! The boundary between a lecturer's form and the claims store. A
//! [`ClaimSubmission`] is what arrives from the adapter layer; it is
//! normalized, validated as a whole, and only then turned into a [`Claim`].
//!
//! # Validation Rules
//!
//! - Month between 1 and 12, year between 2020 and 2100
//! - Hourly rate between 0.01 and 10000
//! - Additional notes at most 500 characters
//! - At least one activity line
//! - Each line: description required, at most 200 characters; hours between 0.01 and 500
//!
//! Every violation is reported, not just the first one found.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::{MAX_CLAIM_YEAR, MIN_CLAIM_YEAR};
use core_kernel::{ClaimPeriod, LecturerId, Money, TemporalError};

use crate::claim::{Claim, ClaimStatus};
use crate::error::{ClaimError, FieldError};
use crate::store::ClaimsStore;

pub const MIN_HOURLY_RATE: Decimal = dec!(0.01);
pub const MAX_HOURLY_RATE: Decimal = dec!(10000);
pub const MIN_LINE_HOURS: Decimal = dec!(0.01);
pub const MAX_LINE_HOURS: Decimal = dec!(500);
pub const MAX_NOTES_LEN: usize = 500;
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// One activity row as entered by the lecturer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimLineInput {
    pub activity_description: String,
    pub hours: Decimal,
}

impl ClaimLineInput {
    pub fn new(activity_description: impl Into<String>, hours: Decimal) -> Self {
        Self {
            activity_description: activity_description.into(),
            hours,
        }
    }

    /// A row the lecturer never filled in
    fn is_blank(&self) -> bool {
        self.activity_description.trim().is_empty() && self.hours <= Decimal::ZERO
    }
}

/// Whether the claim goes straight to verification or is kept as a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    #[default]
    Submit,
    SaveDraft,
}

impl SubmissionMode {
    fn initial_status(self) -> ClaimStatus {
        match self {
            SubmissionMode::Submit => ClaimStatus::Submitted,
            SubmissionMode::SaveDraft => ClaimStatus::Draft,
        }
    }
}

/// A lecturer's claim as received at the submission boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub lecturer_id: LecturerId,
    pub month: u32,
    pub year: i32,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub additional_notes: String,
    #[serde(default)]
    pub lines: Vec<ClaimLineInput>,
}

/// Collected validation messages
#[derive(Debug, Clone, Default)]
struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn into_result(self) -> Result<(), ClaimError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ClaimError::ValidationFailed(self.errors))
        }
    }
}

impl ClaimSubmission {
    /// Drops rows with neither a description nor any hours
    pub fn normalized(mut self) -> Self {
        self.lines.retain(|line| !line.is_blank());
        self
    }

    pub fn total_hours(&self) -> Decimal {
        self.lines.iter().map(|line| line.hours).sum()
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_hours() * self.hourly_rate
    }

    /// Checks every field, reporting all violations at once
    pub fn validate(&self) -> Result<(), ClaimError> {
        let mut result = ValidationResult::default();

        if !(1..=12).contains(&self.month) {
            result.add_error("month", TemporalError::InvalidMonth(self.month).to_string());
        }
        if !(MIN_CLAIM_YEAR..=MAX_CLAIM_YEAR).contains(&self.year) {
            result.add_error("year", TemporalError::InvalidYear(self.year).to_string());
        }

        if self.hourly_rate < MIN_HOURLY_RATE || self.hourly_rate > MAX_HOURLY_RATE {
            result.add_error("hourly_rate", "Hourly rate must be between 0.01 and 10000");
        }

        if self.additional_notes.chars().count() > MAX_NOTES_LEN {
            result.add_error("additional_notes", "Additional notes cannot exceed 500 characters");
        }

        if self.lines.is_empty() {
            result.add_error("lines", "At least one activity is required");
        }

        for (i, line) in self.lines.iter().enumerate() {
            let description = line.activity_description.trim();
            if description.is_empty() {
                result.add_error(format!("lines[{i}].activity_description"), "Activity description is required");
            } else if description.chars().count() > MAX_DESCRIPTION_LEN {
                result.add_error(format!("lines[{i}].activity_description"), "Description cannot exceed 200 characters");
            }

            if line.hours < MIN_LINE_HOURS || line.hours > MAX_LINE_HOURS {
                result.add_error(format!("lines[{i}].hours"), "Hours must be between 0.01 and 500");
            }
        }

        result.into_result()
    }

    /// Normalizes, validates and builds the claim
    pub fn into_claim(self, mode: SubmissionMode) -> Result<Claim, ClaimError> {
        let submission = self.normalized();
        submission.validate()?;

        let period = ClaimPeriod::new(submission.month, submission.year)?;
        let lines = submission
            .lines
            .into_iter()
            .map(|line| (line.activity_description.trim().to_string(), line.hours))
            .collect();

        Ok(Claim::new(
            submission.lecturer_id,
            period,
            Money::zar(submission.hourly_rate),
            lines,
            mode.initial_status(),
        )?
        .with_notes(submission.additional_notes))
    }
}

impl ClaimsStore {
    /// Validates a submission and stores the resulting claim
    pub fn submit(&self, submission: ClaimSubmission, mode: SubmissionMode) -> Result<Claim, ClaimError> {
        let claim = submission.into_claim(mode)?;
        Ok(self.add_claim(claim))
    }
}
