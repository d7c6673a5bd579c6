//! Upload policy
//!
//! Checks applied to each file before its bytes reach storage.

use domain_claims::{FieldError, Upload};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Limits on accepted documents
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: usize,
    allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    pub fn new(max_bytes: usize, allowed_extensions: &[String]) -> Self {
        Self {
            max_bytes,
            allowed_extensions: allowed_extensions
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.max_upload_bytes, &config.allowed_extensions)
    }

    fn extension_of(file_name: &str) -> Option<String> {
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Problems with one file, reported under `field`
    pub fn violations(&self, field: &str, upload: &Upload) -> Vec<FieldError> {
        let mut errors = Vec::new();

        match Self::extension_of(&upload.file_name) {
            Some(ext) if self.allowed_extensions.contains(&ext) => {}
            _ => errors.push(FieldError::new(
                field,
                format!(
                    "{} is not an accepted file type. Allowed: {}",
                    upload.file_name,
                    self.allowed_extensions.join(", ")
                ),
            )),
        }

        if upload.bytes.is_empty() {
            errors.push(FieldError::new(field, format!("{} is empty", upload.file_name)));
        } else if upload.bytes.len() > self.max_bytes {
            errors.push(FieldError::new(
                field,
                format!(
                    "{} exceeds the {} MB limit",
                    upload.file_name,
                    self.max_bytes / (1024 * 1024)
                ),
            ));
        }

        errors
    }

    /// Checks every upload, reporting all problems at once
    pub fn check_all(&self, uploads: &[Upload]) -> Result<(), ApiError> {
        if uploads.is_empty() {
            return Err(ApiError::invalid("files", "Select at least one file to upload"));
        }
        if uploads.len() > ApiConfig::MAX_FILES_PER_REQUEST {
            return Err(ApiError::invalid(
                "files",
                format!("At most {} files can be uploaded at once", ApiConfig::MAX_FILES_PER_REQUEST),
            ));
        }

        let errors: Vec<FieldError> = uploads
            .iter()
            .enumerate()
            .flat_map(|(i, upload)| self.violations(&format!("files[{i}]"), upload))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}
