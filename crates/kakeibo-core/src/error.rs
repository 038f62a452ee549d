//! # Error Types
//!
//! Domain-specific error types for kakeibo-core.
//!
//! ## Error Flow
//! ```text
//! ValidationError → CoreError → FormError (kakeibo-form) → Frontend message
//! ```
//!
//! Validation and business-rule errors are values, never panics: the
//! submission workflow collects them into per-field messages for display.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business-rule violations on a receipt draft.
///
/// These block submission but are always user-correctable; the workflow
/// layer translates them into a single user-facing message.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The receipt has no line items.
    #[error("Receipt has no items")]
    NoItems,

    /// Point usage exceeds the computed receipt total.
    ///
    /// The message carries the offending total so the user can see the
    /// ceiling they ran into.
    #[error("Point usage {point_usage_yen} exceeds receipt total {total_yen}")]
    PointsExceedTotal { point_usage_yen: i64, total_yen: i64 },

    /// An item's discount exceeds its own subtotal (unit price × quantity).
    ///
    /// The totals engine deliberately does not clamp negative line totals;
    /// this rule is enforced before submission instead.
    #[error("Discount on '{name}' exceeds the item subtotal")]
    DiscountExceedsItemTotal { name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// One variant per failure shape; `Display` output is the per-field
/// message shown next to the offending input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Date lies in the future.
    #[error("{field} must not be a future date")]
    InFuture { field: String },

    /// Invalid format (e.g., unsupported tax rate, unparseable number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
