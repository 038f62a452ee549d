//! # kakeibo-form: Receipt Entry Orchestration
//!
//! The layer the browser client drives. Single-threaded and
//! event-driven: every operation is a UI callback mutating one draft,
//! and the only asynchronous edge is the submission POST.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Keystroke/row edit ──► DraftController ──► autosave (kakeibo-store)    │
//! │                              │                                          │
//! │                              ▼ totals() on every read                   │
//! │                         kakeibo-core engine                             │
//! │                                                                         │
//! │  Submit button ──► SubmissionWorkflow                                   │
//! │        1. validate header (collect ALL field errors)                    │
//! │        2. business rules (items, discounts, points vs. total)           │
//! │        3. build payload ──► ReceiptSubmitter (kakeibo-api)              │
//! │        4. success: reset draft │ failure: keep draft, show message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`controller`] - the receipt draft controller (mutate + autosave)
//! - [`submit`] - the submission workflow with its in-flight guard
//! - [`unread`] - observable unread-notification counter
//! - [`toggle`] - optimistic apply-then-rollback transaction helper
//! - [`error`] - field-error map and workflow errors

// =============================================================================
// Module Declarations
// =============================================================================

pub mod controller;
pub mod error;
pub mod submit;
pub mod toggle;
pub mod unread;

// =============================================================================
// Re-exports
// =============================================================================

pub use controller::{DraftController, HeaderField};
pub use error::{FieldErrors, FormError};
pub use submit::SubmissionWorkflow;
pub use toggle::apply_optimistic;
pub use unread::{SubscriptionId, UnreadStore};
