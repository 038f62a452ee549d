//! # kakeibo-core: Pure Business Logic for the Kakeibo Receipt Engine
//!
//! This crate is the heart of the household-finance tracker's receipt
//! entry: line-item tax/total computation, validation rules, and the
//! domain types they operate on.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Browser Client (forms, calendar)                     │
//! └─────────────────────────────────┬───────────────────────────────────────┘
//! ┌─────────────────────────────────▼───────────────────────────────────────┐
//! │              kakeibo-form (controller + submission workflow)            │
//! └──────┬──────────────────────────┬──────────────────────────┬────────────┘
//! ┌──────▼───────┐   ┌──────────────▼──────────────┐   ┌───────▼───────────┐
//! │kakeibo-store │   │  ★ kakeibo-core (THIS) ★    │   │   kakeibo-api     │
//! │ draft store  │   │  types · totals · validation│   │  submit client    │
//! └──────────────┘   │  NO I/O · PURE FUNCTIONS    │   └───────────────────┘
//!                    └─────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Receipt, LineItem, TaxRate, PricingMode)
//! - [`totals`] - The tax/total computation engine (integer yen, floor math)
//! - [`validation`] - Limit checks and numeric input sanitization
//! - [`error`] - Typed domain errors
//!
//! ## Example
//!
//! ```rust
//! use kakeibo_core::{ComputedTotals, LineItem, PricingMode, TaxRate};
//!
//! let items = vec![LineItem {
//!     name: "牛乳".to_string(),
//!     unit_price_yen: 216,
//!     quantity: 2,
//!     discount_yen: 0,
//!     tax_rate: TaxRate::Reduced,
//!     category_id: 3,
//! }];
//!
//! // 432 yen tax-in at 8%: floor(432 × 8 / 108) = 32 yen embedded tax.
//! let totals = ComputedTotals::compute(&items, PricingMode::Inclusive);
//! assert_eq!(totals.total_amount_yen, 432);
//! assert_eq!(totals.tax_by_rate.rate8_yen, 32);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use totals::{ComputedTotals, TaxBreakdown};
pub use types::{LineItem, PricingMode, Receipt, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================
// The limits the browser client and the backend both enforce. These are
// fixed by the product, not configurable.

/// Ceiling shared by amounts, point usage, and discounts (yen).
pub const MAX_AMOUNT_YEN: i64 = 9_999_999;

/// Minimum quantity for a line item.
pub const MIN_QUANTITY: i64 = 1;

/// Maximum quantity for a line item.
pub const MAX_QUANTITY: i64 = 9999;

/// Maximum characters for shop and product names.
pub const MAX_NAME_CHARS: usize = 40;

/// Maximum characters for the receipt memo.
pub const MAX_MEMO_CHARS: usize = 500;

/// Minimum password length in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Maximum password length in characters.
pub const MAX_PASSWORD_CHARS: usize = 16;

/// Minimum replenishment cycle in days.
pub const MIN_DAYS: i64 = 1;

/// Maximum replenishment cycle in days.
pub const MAX_DAYS: i64 = 365;
