//! Claims Domain Ports
//!
//! The claims core records where a supporting document lives but never
//! handles its bytes. Those go through the [`DocumentStorage`] port, which
//! the HTTP layer implements on the local filesystem and tests replace with
//! an in-memory mock.
//!
//! ```rust,ignore
//! let storage: Arc<dyn DocumentStorage> = Arc::new(LocalDocumentStorage::new(upload_dir));
//! let doc = upload_document(&store, storage.as_ref(), claim_id, upload).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

/// Where a stored file ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Adapter-specific location, recorded as the document's file path
    pub path: String,
    pub size_bytes: u64,
}

/// File byte sink for supporting documents
#[async_trait]
pub trait DocumentStorage: DomainPort + HealthCheckable {
    /// Persists the bytes of one file belonging to a claim
    async fn store(
        &self,
        claim_id: ClaimId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, PortError>;

    /// Deletes a previously stored file
    async fn remove(&self, path: &str) -> Result<(), PortError>;
}

/// Mock implementation of DocumentStorage for testing
///
/// Keeps files in memory, keyed by a synthetic path.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of DocumentStorage
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryDocumentStorage {
        files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
        sequence: Arc<AtomicUsize>,
        capacity: Option<usize>,
    }

    impl InMemoryDocumentStorage {
        /// Creates a new mock storage
        pub fn new() -> Self {
            Self::default()
        }

        /// Mock that refuses writes once it holds `files` files
        pub fn with_capacity(files: usize) -> Self {
            Self {
                capacity: Some(files),
                ..Self::default()
            }
        }

        /// Stores a file under an explicit path
        pub async fn insert(&self, path: impl Into<String>, bytes: &[u8]) {
            self.files.write().await.insert(path.into(), bytes.to_vec());
        }

        pub async fn file_count(&self) -> usize {
            self.files.read().await.len()
        }

        pub async fn contents(&self, path: &str) -> Option<Vec<u8>> {
            self.files.read().await.get(path).cloned()
        }
    }

    impl DomainPort for InMemoryDocumentStorage {}

    #[async_trait]
    impl HealthCheckable for InMemoryDocumentStorage {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "in-memory-document-storage".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl DocumentStorage for InMemoryDocumentStorage {
        async fn store(
            &self,
            claim_id: ClaimId,
            file_name: &str,
            bytes: &[u8],
        ) -> Result<StoredFile, PortError> {
            let mut files = self.files.write().await;
            if self.capacity.is_some_and(|capacity| files.len() >= capacity) {
                return Err(PortError::internal("Storage is full"));
            }
            let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
            let path = format!("memory://claim-{}/{}-{}", claim_id.value(), n, file_name);
            files.insert(path.clone(), bytes.to_vec());
            Ok(StoredFile {
                path,
                size_bytes: bytes.len() as u64,
            })
        }

        async fn remove(&self, path: &str) -> Result<(), PortError> {
            self.files
                .write()
                .await
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Stored file", path))
        }
    }
}
