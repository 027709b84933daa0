//! Image uploads.
//!
//! Uploaded files land in one directory under the name
//! `<unix millis>-<original name>` and are served back under a public URL
//! prefix. Only the last path component of the client's file name is used,
//! and it is percent-encoded in the returned URL path.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::error::UploadError;
use crate::store::unix_millis;

/// Default directory uploads are written to.
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Default URL prefix uploads are served under.
pub const DEFAULT_UPLOADS_PREFIX: &str = "/uploads";

/// Default cap on an upload request body (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Writes uploaded files to disk and hands back their public path.
#[derive(Debug, Clone)]
pub struct UploadSink {
    dir: PathBuf,
    public_prefix: String,
    max_bytes: usize,
}

impl UploadSink {
    /// Create a sink writing into `dir`, served under `public_prefix`.
    pub fn new(dir: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Set the largest request body the upload endpoint accepts.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Store `data` and return the path it is served at.
    pub async fn store(&self, data: &[u8], original_name: &str) -> Result<String, UploadError> {
        self.store_at(data, original_name, unix_millis()).await
    }

    /// Store `data` using `now_millis` as the name prefix.
    pub async fn store_at(
        &self,
        data: &[u8],
        original_name: &str,
        now_millis: u64,
    ) -> Result<String, UploadError> {
        let file_name = stored_file_name(original_name, now_millis)?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| UploadError::Io(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(&file_name);
        fs::write(&path, data)
            .await
            .map_err(|e| UploadError::Io(format!("{}: {}", path.display(), e)))?;

        info!(file = %file_name, bytes = data.len(), "Stored upload");
        Ok(format!(
            "{}/{}",
            self.public_prefix,
            urlencoding::encode(&file_name)
        ))
    }
}

/// Build the on-disk name for an upload.
pub fn stored_file_name(original_name: &str, now_millis: u64) -> Result<String, UploadError> {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." || base.contains('\0') {
        debug!(name = original_name, "Rejected upload file name");
        return Err(UploadError::InvalidFileName(original_name.to_string()));
    }

    Ok(format!("{}-{}", now_millis, base))
}
