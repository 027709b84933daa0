//! In-memory repository.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::content::Document;
use crate::error::StoreError;

use super::ContentRepository;

/// Repository that keeps the document in process memory.
///
/// Nothing survives a restart. Loads and saves can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    document: RwLock<Option<Document>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `document` already persisted.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: RwLock::new(Some(document)),
            ..Self::default()
        }
    }

    /// Make every following load fail as if the document were corrupt.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make every following save fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn load(&self) -> Result<Option<Document>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Parse("loads disabled".to_string()));
        }
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: self.location(),
                message: "saves disabled".to_string(),
            });
        }

        *self.document.write().await = Some(document.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
