//! Local filesystem document storage
//!
//! Files land under `<root>/claim-<id>/<uuid>-<name>`. The uuid prefix keeps
//! two uploads with the same name apart; the name is reduced to a safe
//! character set so it can never escape the claim directory.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use core_kernel::{AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{DocumentStorage, StoredFile};

/// Stores document bytes on the local disk
#[derive(Debug, Clone)]
pub struct LocalDocumentStorage {
    root: PathBuf,
}

impl LocalDocumentStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn claim_dir(&self, claim_id: ClaimId) -> PathBuf {
        self.root.join(format!("claim-{}", claim_id.value()))
    }
}

/// Keeps the final path component and replaces anything outside `[A-Za-z0-9._-]`
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed.to_string()
    }
}

impl DomainPort for LocalDocumentStorage {}

#[async_trait]
impl HealthCheckable for LocalDocumentStorage {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = tokio::fs::create_dir_all(&self.root).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (status, message) = match outcome {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(err) => (
                AdapterHealth::Unhealthy,
                Some(format!("Upload directory {} unavailable: {err}", self.root.display())),
            ),
        };

        HealthCheckResult {
            adapter_id: "local-document-storage".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    async fn store(
        &self,
        claim_id: ClaimId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, PortError> {
        let dir = self.claim_dir(claim_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PortError::io(format!("Failed to create {}", dir.display()), e))?;

        let path = dir.join(format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name)));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PortError::io(format!("Failed to write {}", path.display()), e))?;

        debug!(path = %path.display(), size = bytes.len(), "Stored document");
        Ok(StoredFile {
            path: path.display().to_string(),
            size_bytes: bytes.len() as u64,
        })
    }

    async fn remove(&self, path: &str) -> Result<(), PortError> {
        let target = Path::new(path);
        let climbs = target
            .components()
            .any(|component| matches!(component, Component::ParentDir));
        if climbs || !target.starts_with(&self.root) {
            return Err(PortError::validation_field(
                "Path is outside the upload directory",
                "path",
            ));
        }

        match tokio::fs::remove_file(target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PortError::not_found("Stored file", path)),
            Err(e) => Err(PortError::io(format!("Failed to delete {path}"), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("timesheet.pdf"), "timesheet.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\March claim.docx"), "March_claim.docx");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "document");
    }

    #[tokio::test]
    async fn test_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path());

        let stored = storage
            .store(ClaimId::new(3), "timesheet.pdf", b"%PDF-1.4")
            .await
            .unwrap();

        assert_eq!(stored.size_bytes, 8);
        assert!(stored.path.contains("claim-3"));
        assert!(stored.path.ends_with("-timesheet.pdf"));
        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), b"%PDF-1.4");

        storage.remove(&stored.path).await.unwrap();
        assert!(storage.remove(&stored.path).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_same_name_does_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path());

        let first = storage.store(ClaimId::new(1), "a.pdf", b"one").await.unwrap();
        let second = storage.store(ClaimId::new(1), "a.pdf", b"two").await.unwrap();

        assert_ne!(first.path, second.path);
    }

    #[tokio::test]
    async fn test_remove_outside_root_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path());

        let err = storage.remove("/etc/hosts").await.unwrap_err();
        assert!(matches!(err, PortError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_with_parent_segments_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path().join("uploads"));
        let outside = dir.path().join("outside.txt");
        tokio::fs::write(&outside, b"keep").await.unwrap();

        let sneaky = dir.path().join("uploads/claim-1/../../outside.txt");
        let err = storage.remove(&sneaky.display().to_string()).await.unwrap_err();

        assert!(matches!(err, PortError::Validation { .. }));
        assert!(outside.exists());
    }

    #[tokio::test]
    async fn test_health_check_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path().join("uploads"));

        let health = storage.health_check().await;

        assert!(health.is_healthy());
        assert!(storage.root().is_dir());
    }
}
