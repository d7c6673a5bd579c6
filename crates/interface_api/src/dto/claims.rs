//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DocumentId, LecturerId};
use domain_claims::{
    Claim, ClaimAction, ClaimLine, ClaimLineInput, ClaimStatus, ClaimSubmission, Document,
    StatusChange, SubmissionMode,
};

#[derive(Debug, Deserialize)]
pub struct ClaimLineRequest {
    #[serde(default)]
    pub activity_description: String,
    #[serde(default)]
    pub hours: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateClaimRequest {
    pub lecturer_id: LecturerId,
    pub month: u32,
    pub year: i32,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub lines: Vec<ClaimLineRequest>,
}

impl From<CreateClaimRequest> for ClaimSubmission {
    fn from(request: CreateClaimRequest) -> Self {
        ClaimSubmission {
            lecturer_id: request.lecturer_id,
            month: request.month,
            year: request.year,
            hourly_rate: request.hourly_rate,
            additional_notes: request.additional_notes.unwrap_or_default(),
            lines: request
                .lines
                .into_iter()
                .map(|line| ClaimLineInput::new(line.activity_description, line.hours))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateClaimQuery {
    /// Keep the claim as a draft instead of submitting it
    #[serde(default)]
    pub draft: bool,
}

impl CreateClaimQuery {
    pub fn mode(&self) -> SubmissionMode {
        if self.draft {
            SubmissionMode::SaveDraft
        } else {
            SubmissionMode::Submit
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListClaimsQuery {
    pub status: Option<String>,
    pub lecturer_id: Option<LecturerId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransitionRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

/// Row in a claims listing
#[derive(Debug, Serialize)]
pub struct ClaimSummary {
    pub id: ClaimId,
    pub reference: String,
    pub lecturer_id: LecturerId,
    pub period: String,
    pub month: u32,
    pub year: i32,
    pub total_hours: Decimal,
    pub hourly_rate: Decimal,
    pub amount: Decimal,
    pub amount_display: String,
    pub status: ClaimStatus,
    pub status_text: &'static str,
    pub badge_class: &'static str,
    pub icon: &'static str,
    pub document_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Claim> for ClaimSummary {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            reference: claim.id.to_string(),
            lecturer_id: claim.lecturer_id,
            period: claim.period.to_string(),
            month: claim.period.month(),
            year: claim.period.year(),
            total_hours: claim.total_hours,
            hourly_rate: claim.hourly_rate.amount(),
            amount: claim.amount.amount(),
            amount_display: claim.amount.to_string(),
            status: claim.status,
            status_text: claim.status.display_text(),
            badge_class: claim.status.badge_class(),
            icon: claim.status.icon(),
            document_count: claim.documents.len(),
            created_at: claim.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: DocumentId,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Document> for DocumentResponse {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            file_name: doc.file_name.clone(),
            content_type: doc.content_type.clone(),
            size_bytes: doc.size_bytes,
            uploaded_at: doc.uploaded_at,
        }
    }
}

/// Full view of one claim
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    #[serde(flatten)]
    pub summary: ClaimSummary,
    pub additional_notes: Option<String>,
    pub review_comment: Option<String>,
    pub lines: Vec<ClaimLine>,
    pub documents: Vec<DocumentResponse>,
    pub history: Vec<StatusChange>,
    pub available_actions: Vec<ClaimAction>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Claim> for ClaimResponse {
    fn from(claim: &Claim) -> Self {
        Self {
            summary: ClaimSummary::from(claim),
            additional_notes: claim.additional_notes.clone(),
            review_comment: claim.review_comment.clone(),
            lines: claim.lines.clone(),
            documents: claim.documents.iter().map(DocumentResponse::from).collect(),
            history: claim.history.clone(),
            available_actions: ClaimAction::available_from(claim.status),
            updated_at: claim.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub count: usize,
    pub claims: Vec<ClaimSummary>,
}

impl ClaimListResponse {
    pub fn from_claims(claims: &[Claim]) -> Self {
        Self {
            count: claims.len(),
            claims: claims.iter().map(ClaimSummary::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub claim_id: ClaimId,
    pub documents: Vec<DocumentResponse>,
}
