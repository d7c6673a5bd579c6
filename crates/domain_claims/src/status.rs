//! Status projection
//!
//! Turns a claim's status into a render-agnostic progress view: a label, a
//! colour token, a percentage and the list of workflow steps with their
//! completed/current flags. Presentation layers decide what to draw.
//!
//! Step completion follows the status ordinal with one exception: a rejected
//! claim still shows `Submitted` as done (rejection only happens after
//! submission) but never `Verified` or `Approved`, even though `Rejected`
//! sorts after both. A synthetic `Rejected` step is appended instead.

use serde::Serialize;

use core_kernel::ClaimId;

use crate::claim::{Claim, ClaimStatus};

/// Badge class used when a status name is not recognised
pub const DEFAULT_BADGE_CLASS: &str = "bg-secondary";
/// Icon used when a status name is not recognised
pub const DEFAULT_ICON: &str = "📄";

/// The canonical steps shown for every claim, in order
const CANONICAL_STEPS: [(ClaimStatus, &str); 4] = [
    (ClaimStatus::Submitted, "Claim submitted by lecturer"),
    (ClaimStatus::Verified, "Verified by Programme Coordinator"),
    (ClaimStatus::Approved, "Approved by Academic Manager"),
    (ClaimStatus::Settled, "Payment processed"),
];

/// One step in the progress tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusStep {
    pub name: &'static str,
    pub is_completed: bool,
    pub is_current: bool,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Progress snapshot of one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub claim_id: ClaimId,
    pub current_status: ClaimStatus,
    pub status_text: &'static str,
    pub status_color: &'static str,
    pub progress_percentage: u8,
    pub steps: Vec<StatusStep>,
}

impl StatusView {
    pub fn completed_steps(&self) -> impl Iterator<Item = &StatusStep> {
        self.steps.iter().filter(|step| step.is_completed)
    }

    pub fn current_step(&self) -> Option<&StatusStep> {
        self.steps.iter().rev().find(|step| step.is_current)
    }
}

impl ClaimStatus {
    /// Label shown to users
    pub fn display_text(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "Draft",
            ClaimStatus::Submitted => "Pending Verification",
            ClaimStatus::Verified => "Pending Approval",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Settled => "Settled",
        }
    }

    /// Colour token
    pub fn color(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "secondary",
            ClaimStatus::Submitted => "primary",
            ClaimStatus::Verified => "info",
            ClaimStatus::Approved => "success",
            ClaimStatus::Rejected => "danger",
            ClaimStatus::Settled => "dark",
        }
    }

    pub fn progress_percentage(&self) -> u8 {
        match self {
            ClaimStatus::Draft => 0,
            ClaimStatus::Submitted => 25,
            ClaimStatus::Verified => 50,
            ClaimStatus::Approved => 75,
            ClaimStatus::Rejected | ClaimStatus::Settled => 100,
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "bg-secondary",
            ClaimStatus::Submitted => "bg-primary",
            ClaimStatus::Verified => "bg-info",
            ClaimStatus::Approved => "bg-success",
            ClaimStatus::Rejected => "bg-danger",
            ClaimStatus::Settled => "bg-dark",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "📄",
            ClaimStatus::Submitted => "📝",
            ClaimStatus::Verified => "🔍",
            ClaimStatus::Approved => "✅",
            ClaimStatus::Rejected => "❌",
            ClaimStatus::Settled => "💰",
        }
    }

    /// Whether the tracker marks `step` as done for a claim in this status
    fn completes_step(&self, step: ClaimStatus) -> bool {
        match step {
            ClaimStatus::Submitted => *self >= ClaimStatus::Submitted,
            _ => *self >= step && *self != ClaimStatus::Rejected,
        }
    }
}

/// Badge class for a status given by name, falling back to [`DEFAULT_BADGE_CLASS`]
pub fn badge_class_for(name: &str) -> &'static str {
    name.parse::<ClaimStatus>()
        .map(|status| status.badge_class())
        .unwrap_or(DEFAULT_BADGE_CLASS)
}

/// Icon for a status given by name, falling back to [`DEFAULT_ICON`]
pub fn icon_for(name: &str) -> &'static str {
    name.parse::<ClaimStatus>()
        .map(|status| status.icon())
        .unwrap_or(DEFAULT_ICON)
}

/// Projects a claim into its progress view
pub fn project(claim: &Claim) -> StatusView {
    project_status(claim.id, claim.status)
}

/// Projects a bare status; the view depends on nothing else
pub fn project_status(claim_id: ClaimId, status: ClaimStatus) -> StatusView {
    let mut steps: Vec<StatusStep> = CANONICAL_STEPS
        .iter()
        .map(|&(step, description)| StatusStep {
            name: step.name(),
            is_completed: status.completes_step(step),
            is_current: status == step,
            icon: step.icon(),
            description,
        })
        .collect();

    if status == ClaimStatus::Rejected {
        steps.push(StatusStep {
            name: ClaimStatus::Rejected.name(),
            is_completed: true,
            is_current: true,
            icon: ClaimStatus::Rejected.icon(),
            description: "Claim rejected",
        });
    }

    StatusView {
        claim_id,
        current_status: status,
        status_text: status.display_text(),
        status_color: status.color(),
        progress_percentage: status.progress_percentage(),
        steps,
    }
}
