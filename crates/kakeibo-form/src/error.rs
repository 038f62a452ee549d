//! # Form Error Types
//!
//! What the frontend sees when an operation cannot proceed.
//!
//! ## Error Flow
//! ```text
//! ValidationError ──► FieldErrors (per-field map, stored for display)
//! CoreError       ──► FormError::Rule (one workflow-level message)
//! ApiError        ──► FormError::Submit (draft kept, guard released)
//! ```
//!
//! Field and business-rule failures are values held in workflow state;
//! nothing here ever panics across the mutation path.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use kakeibo_api::ApiError;
use kakeibo_core::CoreError;

// =============================================================================
// Field Errors
// =============================================================================

/// Per-field validation messages, keyed by field name.
///
/// An absent key means the field is clean; the map is rebuilt on every
/// submission attempt rather than patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Message for one field, if it failed validation.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

// =============================================================================
// Form Error
// =============================================================================

/// Workflow-level failures surfaced to the user.
#[derive(Debug, Error)]
pub enum FormError {
    /// A submission is already outstanding; the duplicate send was
    /// suppressed.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// One or more fields failed validation; details are in the
    /// workflow's [`FieldErrors`].
    #[error("{count} field(s) need correction")]
    InvalidFields { count: usize },

    /// A business rule blocked submission (no items, points exceed
    /// total, discount exceeds item subtotal).
    #[error(transparent)]
    Rule(#[from] CoreError),

    /// The network call failed; the draft is preserved for retry.
    #[error("Submission failed: {0}")]
    Submit(#[from] ApiError),
}

// =============================================================================
// Unit Tests
// =============================================================================
