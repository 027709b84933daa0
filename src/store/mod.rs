//! Document persistence.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │ snapshot() / mutate()
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              ContentStore               │
//! │  (seeded defaults, write lock, policy)  │
//! └────────────────────┬────────────────────┘
//!                      │ load() / save()
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │        ContentRepository Trait          │
//! └────────────────────┬────────────────────┘
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//! ┌─────────────────┐    ┌─────────────────────┐
//! │JsonFileRepository│   │  MemoryRepository   │
//! └─────────────────┘    └─────────────────────┘
//! ```
//!
//! Every write is a full load-mutate-save cycle of the whole document. The
//! store runs each cycle under one lock, so concurrent writers to different
//! sections cannot discard each other's changes.

mod file;
mod memory;

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::content::Document;
use crate::error::{ContentError, StoreError};

pub use file::JsonFileRepository;
pub use memory::MemoryRepository;

// =============================================================================
// Repository Trait
// =============================================================================

/// Backing storage for the document.
#[async_trait]
pub trait ContentRepository: Send + Sync + 'static {
    /// Read the persisted document. `Ok(None)` means nothing has been persisted yet.
    async fn load(&self) -> Result<Option<Document>, StoreError>;

    /// Overwrite the persisted document.
    async fn save(&self, document: &Document) -> Result<(), StoreError>;

    /// Where the document lives, for logs.
    fn location(&self) -> String;
}

/// What to do when saving a mutated document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistencePolicy {
    /// Log the failure and report success anyway.
    ///
    /// Hosts with a read-only or ephemeral filesystem keep working; the
    /// in-request response is all the client will ever see.
    #[default]
    Lenient,

    /// Report the failure to the caller as [`ContentError::Persistence`].
    Strict,
}

// =============================================================================
// Content Store
// =============================================================================

/// Process-wide access point to the document.
pub struct ContentStore<R: ContentRepository> {
    repository: R,
    defaults: Document,
    policy: PersistencePolicy,
    write_lock: Mutex<()>,
}

impl<R: ContentRepository> ContentStore<R> {
    /// Create a store over `repository`, falling back to `defaults` when
    /// nothing usable is persisted.
    pub fn new(repository: R, defaults: Document) -> Self {
        Self {
            repository,
            defaults,
            policy: PersistencePolicy::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Set the persistence policy.
    pub fn with_policy(mut self, policy: PersistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    /// Persist the defaults if nothing is persisted yet.
    ///
    /// Returns `true` if the document was seeded. A document that exists but
    /// cannot be read is left untouched.
    pub async fn initialize(&self) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        match self.repository.load().await {
            Ok(Some(_)) => {
                debug!(location = %self.repository.location(), "Existing document found");
                Ok(false)
            }
            Ok(None) => {
                self.repository.save(&self.defaults).await?;
                info!(location = %self.repository.location(), "Seeded default document");
                Ok(true)
            }
            Err(e) => {
                warn!(
                    location = %self.repository.location(),
                    "Existing document is unreadable, not seeding: {}",
                    e
                );
                Ok(false)
            }
        }
    }

    /// Current document. Never fails: anything unreadable yields the defaults.
    pub async fn snapshot(&self) -> Document {
        match self.load().await {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    location = %self.repository.location(),
                    "Failed to load document, serving defaults: {}",
                    e
                );
                self.defaults.clone()
            }
        }
    }

    /// Run one atomic load-mutate-save cycle.
    ///
    /// If the persisted document cannot be read, or `apply` fails, nothing is
    /// written. A failed save is returned or swallowed according to the
    /// [`PersistencePolicy`].
    pub async fn mutate<T, F>(&self, apply: F) -> Result<T, ContentError>
    where
        F: FnOnce(&mut Document) -> Result<T, ContentError>,
    {
        let _guard = self.write_lock.lock().await;

        // Saving over a document we could not read would erase it
        let mut document = self.load().await.map_err(|e| {
            error!(
                location = %self.repository.location(),
                "Refusing to write, document is unreadable: {}",
                e
            );
            ContentError::Persistence(e)
        })?;
        let value = apply(&mut document)?;

        match self.repository.save(&document).await {
            Ok(()) => Ok(value),
            Err(e) => match self.policy {
                PersistencePolicy::Strict => {
                    error!(location = %self.repository.location(), "Failed to save document: {}", e);
                    Err(ContentError::Persistence(e))
                }
                PersistencePolicy::Lenient => {
                    error!(
                        location = %self.repository.location(),
                        "Failed to save document, change is not durable: {}",
                        e
                    );
                    Ok(value)
                }
            },
        }
    }

    /// The persisted document, or the defaults if nothing is persisted yet.
    async fn load(&self) -> Result<Document, StoreError> {
        let document = match self.repository.load().await? {
            Some(document) => document,
            None => {
                debug!("No persisted document, using defaults");
                self.defaults.clone()
            }
        };
        Ok(self.with_seeded_users(document))
    }

    fn with_seeded_users(&self, mut document: Document) -> Document {
        if document.users.is_empty() {
            document.users = self.defaults.users.clone();
        }
        document
    }
}

/// Milliseconds since the Unix epoch (0 if the clock is before it).
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================
