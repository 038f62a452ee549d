//! # Validation Module
//!
//! Input validation utilities for receipt entry.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: Frontend        immediate keystroke feedback
//! Layer 2: THIS MODULE     limit checks, numeric sanitization
//! Layer 3: Workflow        business rules (no items, points vs. total)
//! ```
//!
//! Everything here is pure: validators return a typed
//! [`ValidationError`](crate::error::ValidationError) whose `Display` is
//! the per-field message, and the sanitizer is a total function.
//!
//! Text limits count characters, not bytes — shop names and memos are
//! routinely Japanese.

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::{
    MAX_AMOUNT_YEN, MAX_DAYS, MAX_MEMO_CHARS, MAX_NAME_CHARS, MAX_PASSWORD_CHARS, MAX_QUANTITY,
    MIN_DAYS, MIN_PASSWORD_CHARS, MIN_QUANTITY,
};

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a yen amount against the standard ceiling.
///
/// Covers amounts, point usage, and discounts, all of which share the
/// 9,999,999 yen limit. Zero is allowed.
///
/// ## Example
/// ```rust
/// use kakeibo_core::validation::validate_amount;
///
/// assert!(validate_amount(0).is_ok());
/// assert!(validate_amount(9_999_999).is_ok());
/// assert!(validate_amount(-1).is_err());
/// assert!(validate_amount(10_000_000).is_err());
/// ```
pub fn validate_amount(value_yen: i64) -> ValidationResult<()> {
    validate_amount_up_to(value_yen, MAX_AMOUNT_YEN)
}

/// Validates a yen amount against an explicit ceiling.
pub fn validate_amount_up_to(value_yen: i64, max_yen: i64) -> ValidationResult<()> {
    if value_yen < 0 || value_yen > max_yen {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: max_yen,
        });
    }

    Ok(())
}

/// Validates a line-item quantity (1..=9999).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_QUANTITY,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a replenishment cycle in days (1..=365).
pub fn validate_days(days: i64) -> ValidationResult<()> {
    if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
        return Err(ValidationError::OutOfRange {
            field: "days".to_string(),
            min: MIN_DAYS,
            max: MAX_DAYS,
        });
    }

    Ok(())
}

// =============================================================================
// Text Validators
// =============================================================================

/// Validates text length in characters.
///
/// Empty text is valid at this layer; required-ness is checked by callers
/// that actually require the field.
pub fn validate_text_length(field: &str, text: &str, max: usize) -> ValidationResult<()> {
    if text.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a shop name (≤ 40 chars).
pub fn validate_shop_name(name: &str) -> ValidationResult<()> {
    validate_text_length("shop_name", name, MAX_NAME_CHARS)
}

/// Validates a product name (≤ 40 chars).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text_length("product_name", name, MAX_NAME_CHARS)
}

/// Validates a memo (≤ 500 chars).
pub fn validate_memo(memo: &str) -> ValidationResult<()> {
    validate_text_length("memo", memo, MAX_MEMO_CHARS)
}

/// Validates a password length (8..=16 chars).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    let len = password.chars().count();

    if len < MIN_PASSWORD_CHARS {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_CHARS,
        });
    }

    if len > MAX_PASSWORD_CHARS {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_CHARS,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a purchase day is not in the future.
///
/// `today` is passed in by the caller; this crate never reads a clock.
pub fn validate_purchase_day(day: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if day > today {
        return Err(ValidationError::InFuture {
            field: "purchase_day".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Input Sanitization
// =============================================================================

/// Normalizes raw numeric keystrokes to an ASCII-digits-only string.
///
/// Full-width digits (U+FF10–U+FF19) map to ASCII by subtracting 0xFEE0
/// from the code point; every other non-digit character is stripped. Total
/// function — the result may be empty, never an error.
///
/// ## Example
/// ```rust
/// use kakeibo_core::validation::sanitize_numeric_input;
///
/// assert_eq!(sanitize_numeric_input("１２３a４"), "1234");
/// assert_eq!(sanitize_numeric_input("¥1,980"), "1980");
/// assert_eq!(sanitize_numeric_input("abc"), "");
/// ```
pub fn sanitize_numeric_input(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '\u{FF10}'..='\u{FF19}' => char::from_u32(c as u32 - 0xFEE0),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
