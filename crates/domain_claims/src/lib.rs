//! Lecturer Claims Domain
//!
//! This crate implements the claim lifecycle engine: the claim model, the
//! store that numbers claims and answers the per-role inbox queries, the
//! transition rules between workflow stages, document attachments, and the
//! projection of a claim's status into a display-agnostic progress view.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Draft -> Submitted -> Verified -> Approved -> Settled
//!              |            |
//!              +------------+--> Rejected
//! ```
//!
//! A lecturer submits, a programme coordinator verifies (or rejects), an
//! academic manager approves (or rejects), and finance settles.

pub mod claim;
pub mod store;
pub mod workflow;
pub mod documents;
pub mod status;
pub mod submission;
pub mod seed;
pub mod ports;
pub mod error;

pub use claim::{Claim, ClaimLine, ClaimStatus, Document, StatusChange};
pub use store::ClaimsStore;
pub use workflow::ClaimAction;
pub use documents::{NewDocument, Upload};
pub use status::{StatusStep, StatusView};
pub use submission::{ClaimLineInput, ClaimSubmission, SubmissionMode};
pub use ports::{DocumentStorage, StoredFile};
pub use error::{ClaimError, FieldError};
