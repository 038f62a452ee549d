//! # kakeibo-store: Draft Persistence for the Kakeibo Receipt Core
//!
//! Keyed local storage for receipt drafts and form preferences.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DraftController mutation                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   kakeibo-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   Store ──► DraftRepository        draft:<form-key>  → JSON    │   │
//! │  │         └─► PreferenceRepository   pref:pricing-mode:<form-key>│   │
//! │  │                      │                                          │   │
//! │  │                      ▼                                          │   │
//! │  │   StorageBackend (trait) ── FileBackend | MemoryBackend        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kakeibo_store::{MemoryBackend, Store};
//! use kakeibo_core::Receipt;
//!
//! let store = Store::new(MemoryBackend::new());
//! let draft = Receipt::empty("2024-06-01".parse().unwrap());
//!
//! store.drafts().save("expense-entry:1", &draft).unwrap();
//! assert_eq!(store.drafts().load("expense-entry:1"), Some(draft));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod draft;
pub mod error;
pub mod prefs;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use draft::DraftRepository;
pub use error::{StoreError, StoreResult};
pub use prefs::PreferenceRepository;

/// Facade over a storage backend, handing out the repositories.
///
/// Mirrors how the browser build hands one localStorage to every form:
/// one `Store`, shared by reference, repositories created per call.
#[derive(Debug)]
pub struct Store<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Store { backend }
    }

    /// Receipt draft storage.
    pub fn drafts(&self) -> DraftRepository<'_, B> {
        DraftRepository::new(&self.backend)
    }

    /// Form preference storage.
    pub fn preferences(&self) -> PreferenceRepository<'_, B> {
        PreferenceRepository::new(&self.backend)
    }
}
