//! Supporting document handlers

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::{ClaimId, DocumentId};
use domain_claims::{documents, Upload};

use crate::dto::claims::{DocumentResponse, UploadResponse};
use crate::upload::UploadPolicy;
use crate::{error::ApiError, AppState};

/// Reads every file part; parts without a file name are ignored
async fn read_uploads(multipart: &mut Multipart) -> Result<Vec<Upload>, ApiError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if file_name.trim().is_empty() {
            continue;
        }
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;

        uploads.push(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(uploads)
}

/// Attaches one or more files to a claim
///
/// Every file is checked before any is stored, and a storage failure part
/// way through detaches the files already stored by this request.
pub async fn upload_documents(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let claim_id = ClaimId::new(id);
    state.store.get_claim_by_id(claim_id)?;

    let uploads = read_uploads(&mut multipart).await?;
    UploadPolicy::from_config(&state.config).check_all(&uploads)?;

    let stored = documents::upload_documents(&state.store, state.storage.as_ref(), claim_id, uploads)
        .await?
        .iter()
        .map(DocumentResponse::from)
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            claim_id,
            documents: stored,
        }),
    ))
}

/// Detaches a document and deletes its file
pub async fn delete_document(
    State(state): State<AppState>,
    Path((id, document_id)): Path<(u64, u32)>,
) -> Result<StatusCode, ApiError> {
    documents::discard_document(
        &state.store,
        state.storage.as_ref(),
        ClaimId::new(id),
        DocumentId::new(document_id),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
