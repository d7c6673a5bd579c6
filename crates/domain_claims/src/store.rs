//! Claims store
//!
//! The store is the single owner of every claim and the only place claim
//! ids are issued. The coordinator and manager inboxes are filtered views
//! over the same collection, so a status change shows up in every view the
//! moment the write lock is released.
//!
//! All state sits behind one `RwLock`. Id allocation and insertion happen in
//! the same critical section, which keeps ids contiguous under concurrent
//! callers; readers always receive cloned, fully-written claims. Nothing in
//! here performs I/O while the lock is held.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use core_kernel::{ClaimId, LecturerId};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;

#[derive(Debug)]
struct StoreState {
    /// Keyed by id so iteration order is id order
    claims: BTreeMap<ClaimId, Claim>,
    last_id: ClaimId,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            claims: BTreeMap::new(),
            last_id: Claim::UNASSIGNED,
        }
    }
}

impl StoreState {
    fn insert(&mut self, mut claim: Claim) -> Claim {
        let id = self.last_id.next();
        self.last_id = id;
        claim.id = id;
        self.claims.insert(id, claim.clone());
        claim
    }
}

/// In-memory store of claims
///
/// Construct one per process and share it by reference or `Arc`.
#[derive(Debug, Default)]
pub struct ClaimsStore {
    state: RwLock<StoreState>,
}

impl ClaimsStore {
    /// Creates an empty store; the first claim added gets id 1
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations run validation before touching any field, so a guard
    // poisoned by a panicking thread still holds consistent data.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assigns the next id to the claim, stores it, and returns the stored copy
    pub fn add_claim(&self, claim: Claim) -> Claim {
        let stored = self.write().insert(claim);
        debug!(claim_id = %stored.id, status = %stored.status, "Claim added");
        stored
    }

    /// Inserts every claim only when the store holds none; returns how many were inserted
    pub(crate) fn add_claims_if_empty(&self, claims: Vec<Claim>) -> usize {
        let mut state = self.write();
        if !state.claims.is_empty() {
            return 0;
        }
        let count = claims.len();
        for claim in claims {
            state.insert(claim);
        }
        count
    }

    /// Looks up a claim by id
    pub fn get_claim_by_id(&self, id: ClaimId) -> Result<Claim, ClaimError> {
        self.read()
            .claims
            .get(&id)
            .cloned()
            .ok_or(ClaimError::ClaimNotFound(id))
    }

    /// All claims, most recent first
    pub fn get_all_claims(&self) -> Vec<Claim> {
        self.select(|_| true)
    }

    /// Claims in the given status, most recent first
    pub fn get_claims_by_status(&self, status: ClaimStatus) -> Vec<Claim> {
        self.select(|claim| claim.status == status)
    }

    /// Claims awaiting coordinator verification
    pub fn get_pending_for_coordinator(&self) -> Vec<Claim> {
        self.get_claims_by_status(ClaimStatus::Submitted)
    }

    /// Claims awaiting manager approval
    pub fn get_pending_for_manager(&self) -> Vec<Claim> {
        self.get_claims_by_status(ClaimStatus::Verified)
    }

    /// A lecturer's own claims, most recent first
    pub fn claims_for_lecturer(&self, lecturer_id: LecturerId) -> Vec<Claim> {
        self.select(|claim| claim.lecturer_id == lecturer_id)
    }

    pub fn len(&self) -> usize {
        self.read().claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().claims.is_empty()
    }

    /// Applies `change` to one claim under the write lock
    ///
    /// `change` must validate before mutating: if it returns an error the
    /// claim has to be left exactly as it was.
    pub(crate) fn update<T>(
        &self,
        id: ClaimId,
        change: impl FnOnce(&mut Claim) -> Result<T, ClaimError>,
    ) -> Result<T, ClaimError> {
        let mut state = self.write();
        let claim = state
            .claims
            .get_mut(&id)
            .ok_or(ClaimError::ClaimNotFound(id))?;
        change(claim)
    }

    fn select(&self, keep: impl Fn(&Claim) -> bool) -> Vec<Claim> {
        self.read()
            .claims
            .values()
            .rev()
            .filter(|claim| keep(claim))
            .cloned()
            .collect()
    }
}
