//! Supporting documents
//!
//! Documents can be attached or removed at any point in a claim's life. The
//! store only records metadata; bytes go through a [`DocumentStorage`]
//! adapter, and that write happens before the store lock is taken.

use chrono::Utc;
use tracing::{debug, warn};

use core_kernel::{ClaimId, DocumentId};

use crate::claim::Document;
use crate::error::ClaimError;
use crate::ports::{DocumentStorage, StoredFile};
use crate::store::ClaimsStore;

/// Metadata of a file that has already been stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub file_name: String,
    pub file_path: String,
    pub content_type: Option<String>,
    pub size_bytes: u64,
}

impl NewDocument {
    pub fn from_stored(file_name: impl Into<String>, content_type: Option<String>, stored: StoredFile) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: stored.path,
            content_type,
            size_bytes: stored.size_bytes,
        }
    }
}

/// A file received from a lecturer, not yet stored
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ClaimsStore {
    /// Records a document against a claim and returns it with its new id
    pub fn add_document(&self, claim_id: ClaimId, document: NewDocument) -> Result<Document, ClaimError> {
        let added = self.update(claim_id, |claim| {
            let doc = Document {
                id: claim.next_document_id(),
                file_name: document.file_name,
                file_path: document.file_path,
                content_type: document.content_type,
                size_bytes: document.size_bytes,
                uploaded_at: Utc::now(),
            };
            claim.documents.push(doc.clone());
            claim.updated_at = doc.uploaded_at;
            Ok(doc)
        })?;

        debug!(claim_id = %claim_id, document_id = %added.id, file = %added.file_name, "Document attached");
        Ok(added)
    }

    /// Removes a document record and returns it
    pub fn remove_document(&self, claim_id: ClaimId, document_id: DocumentId) -> Result<Document, ClaimError> {
        let removed = self.update(claim_id, |claim| {
            let index = claim
                .documents
                .iter()
                .position(|doc| doc.id == document_id)
                .ok_or(ClaimError::DocumentNotFound {
                    claim_id,
                    document_id,
                })?;
            claim.updated_at = Utc::now();
            Ok(claim.documents.remove(index))
        })?;

        debug!(claim_id = %claim_id, document_id = %document_id, "Document removed");
        Ok(removed)
    }
}

/// Stores an upload's bytes and attaches the resulting document to the claim
///
/// The claim is checked first so nothing is written for an unknown id.
pub async fn upload_document(
    store: &ClaimsStore,
    storage: &dyn DocumentStorage,
    claim_id: ClaimId,
    upload: Upload,
) -> Result<Document, ClaimError> {
    store.get_claim_by_id(claim_id)?;

    let stored = storage.store(claim_id, &upload.file_name, &upload.bytes).await?;
    let path = stored.path.clone();
    let document = NewDocument::from_stored(upload.file_name, upload.content_type, stored);

    match store.add_document(claim_id, document) {
        Ok(doc) => Ok(doc),
        Err(err) => {
            if let Err(cleanup) = storage.remove(&path).await {
                warn!(path = %path, error = %cleanup, "Failed to remove orphaned upload");
            }
            Err(err)
        }
    }
}

/// Stores a batch of uploads, attaching all of them or none
///
/// When a file fails, the documents already attached from this batch are
/// discarded again before the error is returned.
pub async fn upload_documents(
    store: &ClaimsStore,
    storage: &dyn DocumentStorage,
    claim_id: ClaimId,
    uploads: Vec<Upload>,
) -> Result<Vec<Document>, ClaimError> {
    let mut attached = Vec::with_capacity(uploads.len());

    for upload in uploads {
        match upload_document(store, storage, claim_id, upload).await {
            Ok(doc) => attached.push(doc),
            Err(err) => {
                for doc in attached.iter().rev() {
                    if let Err(rollback) = discard_document(store, storage, claim_id, doc.id).await {
                        warn!(claim_id = %claim_id, document_id = %doc.id, error = %rollback, "Failed to roll back upload");
                    }
                }
                return Err(err);
            }
        }
    }

    Ok(attached)
}

/// Detaches a document and deletes its bytes
///
/// Once the record is gone the removal counts as done; a file the storage
/// cannot delete is logged and left behind.
pub async fn discard_document(
    store: &ClaimsStore,
    storage: &dyn DocumentStorage,
    claim_id: ClaimId,
    document_id: DocumentId,
) -> Result<Document, ClaimError> {
    let removed = store.remove_document(claim_id, document_id)?;
    if let Err(err) = storage.remove(&removed.file_path).await {
        warn!(path = %removed.file_path, error = %err, "Failed to delete stored file");
    }
    Ok(removed)
}
