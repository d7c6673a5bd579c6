//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ClaimLineId, ClaimPeriod, DocumentId, LecturerId, Money};
use crate::error::ClaimError;

/// Claim status
///
/// Variants are declared in ordinal order, so the derived `Ord` gives
/// `Draft < Submitted < Verified < Approved < Rejected < Settled`. That order
/// only drives step-completion display; `Rejected` is not further along than
/// `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Saved but not yet sent for verification
    Draft,
    /// Awaiting coordinator verification
    Submitted,
    /// Verified by the coordinator, awaiting manager approval
    Verified,
    /// Approved for payment
    Approved,
    /// Rejected by the coordinator or manager
    Rejected,
    /// Paid
    Settled,
}

impl ClaimStatus {
    /// Every status, in ordinal order
    pub const ALL: [ClaimStatus; 6] = [
        ClaimStatus::Draft,
        ClaimStatus::Submitted,
        ClaimStatus::Verified,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Settled,
    ];

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "Draft",
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::Verified => "Verified",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Settled => "Settled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown claim status: {s}"))
    }
}

/// One billable activity on a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLine {
    pub id: ClaimLineId,
    pub activity_description: String,
    pub hours: Decimal,
}

/// Metadata for an uploaded supporting file
///
/// The bytes live with the document storage adapter; the claim only keeps
/// the path it was given back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique within the owning claim only
    pub id: DocumentId,
    pub file_name: String,
    pub file_path: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// A recorded status change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: ClaimStatus,
    pub to: ClaimStatus,
    pub comment: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// A lecturer's monthly compensation claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Assigned by the store; zero until then
    pub id: ClaimId,
    /// Lecturer the claim belongs to
    pub lecturer_id: LecturerId,
    /// Month and year being claimed for
    pub period: ClaimPeriod,
    /// Rate per hour
    pub hourly_rate: Money,
    /// Sum of line hours
    pub total_hours: Decimal,
    /// Total hours times hourly rate, fixed at creation
    pub amount: Money,
    /// Status
    pub status: ClaimStatus,
    /// Free-text notes from the lecturer
    pub additional_notes: Option<String>,
    /// Latest reviewer comment
    pub review_comment: Option<String>,
    /// Activities claimed
    pub lines: Vec<ClaimLine>,
    /// Supporting documents
    pub documents: Vec<Document>,
    /// Status changes, oldest first
    pub history: Vec<StatusChange>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    last_document_id: u32,
}

impl Claim {
    /// Placeholder id carried by a claim that has not been stored yet
    pub const UNASSIGNED: ClaimId = ClaimId::new(0);

    /// Creates a claim from its lines, computing total hours and amount
    pub fn new(
        lecturer_id: LecturerId,
        period: ClaimPeriod,
        hourly_rate: Money,
        lines: Vec<(String, Decimal)>,
        status: ClaimStatus,
    ) -> Result<Self, ClaimError> {
        let lines: Vec<ClaimLine> = lines
            .into_iter()
            .zip(1u32..)
            .map(|((activity_description, hours), n)| ClaimLine {
                id: ClaimLineId::new(n),
                activity_description,
                hours,
            })
            .collect();

        let total_hours: Decimal = lines.iter().map(|line| line.hours).sum();
        let amount = hourly_rate.checked_mul(total_hours)?;
        let now = Utc::now();

        Ok(Self {
            id: Self::UNASSIGNED,
            lecturer_id,
            period,
            hourly_rate,
            total_hours,
            amount,
            status,
            additional_notes: None,
            review_comment: None,
            lines,
            documents: Vec::new(),
            history: Vec::new(),
            created_at: now,
            updated_at: now,
            last_document_id: 0,
        })
    }

    /// Sets the lecturer's notes, dropping blank text
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.additional_notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }

    /// Finds a document by file name
    pub fn document_named(&self, file_name: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.file_name == file_name)
    }

    /// Issues the next document id; ids are never reused within a claim
    pub(crate) fn next_document_id(&mut self) -> DocumentId {
        self.last_document_id += 1;
        DocumentId::new(self.last_document_id)
    }
}
