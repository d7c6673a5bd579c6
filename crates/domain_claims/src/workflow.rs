//! Claim workflow transitions
//!
//! | From              | Action  | To        | Actor       |
//! |-------------------|---------|-----------|-------------|
//! | Draft / Submitted | submit  | Submitted | lecturer    |
//! | Submitted         | verify  | Verified  | coordinator |
//! | Submitted         | reject  | Rejected  | coordinator |
//! | Verified          | approve | Approved  | manager     |
//! | Verified          | reject  | Rejected  | manager     |
//! | Approved          | settle  | Settled   | finance     |
//!
//! Every transition is checked and applied inside one store write lock, so
//! two reviewers acting on the same claim at once cannot both win: the
//! second sees the new status and gets `InvalidTransition`.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::ClaimId;

use crate::claim::{Claim, ClaimStatus, StatusChange};
use crate::error::ClaimError;
use crate::store::ClaimsStore;

/// An action that moves a claim between statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimAction {
    Submit,
    Verify,
    Approve,
    Reject,
    Settle,
}

impl ClaimAction {
    pub const ALL: [ClaimAction; 5] = [
        ClaimAction::Submit,
        ClaimAction::Verify,
        ClaimAction::Approve,
        ClaimAction::Reject,
        ClaimAction::Settle,
    ];

    /// Status the claim ends up in
    pub fn target(&self) -> ClaimStatus {
        match self {
            ClaimAction::Submit => ClaimStatus::Submitted,
            ClaimAction::Verify => ClaimStatus::Verified,
            ClaimAction::Approve => ClaimStatus::Approved,
            ClaimAction::Reject => ClaimStatus::Rejected,
            ClaimAction::Settle => ClaimStatus::Settled,
        }
    }

    /// Whether the action may be taken on a claim in `from`
    pub fn is_allowed_from(&self, from: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (*self, from),
            (ClaimAction::Submit, Draft) |
            (ClaimAction::Submit, Submitted) |
            (ClaimAction::Verify, Submitted) |
            (ClaimAction::Reject, Submitted) |
            (ClaimAction::Approve, Verified) |
            (ClaimAction::Reject, Verified) |
            (ClaimAction::Settle, Approved)
        )
    }

    /// Role expected to take the action
    pub fn actor(&self) -> &'static str {
        match self {
            ClaimAction::Submit => "lecturer",
            ClaimAction::Verify => "coordinator",
            ClaimAction::Approve => "manager",
            ClaimAction::Reject => "reviewer",
            ClaimAction::Settle => "finance",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ClaimAction::Submit => "submit",
            ClaimAction::Verify => "verify",
            ClaimAction::Approve => "approve",
            ClaimAction::Reject => "reject",
            ClaimAction::Settle => "settle",
        }
    }

    /// Actions available to a claim in `status`
    pub fn available_from(status: ClaimStatus) -> Vec<ClaimAction> {
        ClaimAction::ALL
            .into_iter()
            .filter(|action| action.is_allowed_from(status))
            .collect()
    }
}

impl fmt::Display for ClaimAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

impl Claim {
    /// Applies an action, recording the change in the claim's history
    ///
    /// The claim is only modified when the action is legal from the current
    /// status. Blank comments are treated as absent.
    pub fn apply(
        &mut self,
        action: ClaimAction,
        comment: Option<&str>,
    ) -> Result<StatusChange, ClaimError> {
        if !action.is_allowed_from(self.status) {
            return Err(ClaimError::InvalidTransition {
                from: self.status,
                action,
            });
        }

        let comment = comment
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);
        let change = StatusChange {
            from: self.status,
            to: action.target(),
            comment: comment.clone(),
            changed_at: Utc::now(),
        };

        self.status = change.to;
        if comment.is_some() {
            self.review_comment = comment;
        }
        self.updated_at = change.changed_at;
        self.history.push(change.clone());
        Ok(change)
    }
}

impl ClaimsStore {
    /// Sends a draft for verification; resubmitting a submitted claim is a no-op change
    pub fn submit_claim(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.transition(id, ClaimAction::Submit, None)
    }

    /// Coordinator verifies a submitted claim
    pub fn verify_claim(&self, id: ClaimId, comment: &str) -> Result<Claim, ClaimError> {
        self.transition(id, ClaimAction::Verify, Some(comment))
    }

    /// Manager approves a verified claim
    pub fn approve_claim(&self, id: ClaimId, comment: &str) -> Result<Claim, ClaimError> {
        self.transition(id, ClaimAction::Approve, Some(comment))
    }

    /// Coordinator or manager rejects a claim; a reason is mandatory
    pub fn reject_claim(&self, id: ClaimId, comment: &str) -> Result<Claim, ClaimError> {
        if comment.trim().is_empty() {
            return Err(ClaimError::invalid_field(
                "comment",
                "A comment is required when rejecting a claim",
            ));
        }
        self.transition(id, ClaimAction::Reject, Some(comment))
    }

    /// Finance records payment of an approved claim
    pub fn settle_claim(&self, id: ClaimId, reference: Option<&str>) -> Result<Claim, ClaimError> {
        self.transition(id, ClaimAction::Settle, reference)
    }

    fn transition(
        &self,
        id: ClaimId,
        action: ClaimAction,
        comment: Option<&str>,
    ) -> Result<Claim, ClaimError> {
        let (change, claim) = self.update(id, |claim| {
            let change = claim.apply(action, comment)?;
            Ok((change, claim.clone()))
        })?;

        info!(
            claim_id = %id,
            from = %change.from,
            to = %change.to,
            actor = action.actor(),
            "Claim status changed"
        );
        Ok(claim)
    }
}
