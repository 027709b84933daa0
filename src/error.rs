use thiserror::Error;

use crate::content::Collection;

/// Errors raised by a content repository while reading or writing the document.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Filesystem error on the persisted document
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Persisted document is not valid JSON or does not match the document shape
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// Document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

/// Errors from content operations (collections, singletons, persistence).
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    /// No record with the given id in the collection
    #[error("{label} not found", label = .collection.label())]
    NotFound { collection: Collection, id: u64 },

    /// The mutated document could not be written back (should map to HTTP 500)
    #[error("Failed to persist content: {0}")]
    Persistence(#[from] StoreError),
}

/// Errors that can occur while accepting an uploaded file
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// Request carried no `file` field
    #[error("No file uploaded")]
    MissingFile,

    /// Multipart body could not be read
    #[error("Invalid multipart body: {0}")]
    Multipart(String),

    /// Request body exceeded the configured upload limit
    #[error("Upload exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    /// Original file name is unusable as a file name
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    /// Writing to the uploads directory failed
    #[error("Failed to store upload: {0}")]
    Io(String),
}
