//! # Domain Types
//!
//! Core domain types for the receipt engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Receipt (draft)                                                        │
//! │  ├── shop_name / memo / purchase_day / point_usage_yen                  │
//! │  └── items: Vec<LineItem>  (insertion order = display order)            │
//! │                                                                         │
//! │  LineItem ── unit_price_yen, quantity, discount_yen, TaxRate            │
//! │  PricingMode ── Inclusive (tax-in) | Exclusive (tax added on top)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All monetary values are integer JPY (`i64` yen). There is no fractional
//! unit; tax math floors, and the lost fractions are intentional.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Japanese consumption-tax rate attached to a line item.
///
/// Only three rates exist: untaxed, the 8% reduced rate (groceries,
/// takeout), and the 10% standard rate. Serialized as the bare percent
/// integer, which is also what the wire payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaxRate {
    /// 0% - untaxed items.
    Zero,

    /// 8% - reduced rate.
    Reduced,

    /// 10% - standard rate.
    Standard,
}

impl TaxRate {
    /// Returns the rate as a percent integer (0, 8, or 10).
    #[inline]
    pub const fn percent(&self) -> u8 {
        match self {
            TaxRate::Zero => 0,
            TaxRate::Reduced => 8,
            TaxRate::Standard => 10,
        }
    }

    /// Checks whether the rate contributes tax at all.
    #[inline]
    pub const fn is_taxed(&self) -> bool {
        !matches!(self, TaxRate::Zero)
    }
}

/// New items default to the standard 10% rate.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::Standard
    }
}

impl From<TaxRate> for u8 {
    fn from(rate: TaxRate) -> u8 {
        rate.percent()
    }
}

impl TryFrom<u8> for TaxRate {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaxRate::Zero),
            8 => Ok(TaxRate::Reduced),
            10 => Ok(TaxRate::Standard),
            other => Err(ValidationError::InvalidFormat {
                field: "tax_rate".to_string(),
                reason: format!("{} is not one of 0, 8, 10", other),
            }),
        }
    }
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// Whether entered unit prices already contain consumption tax.
///
/// The mode belongs to the form, not to an individual receipt: it is
/// persisted under a lightweight preference key, separate from the draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PricingMode {
    /// Prices are tax-in; tax is carved out of the entered amount.
    #[default]
    Inclusive,

    /// Prices exclude tax; tax is added on top of the subtotal.
    Exclusive,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product/service entry on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Product name as printed on the receipt (≤ 40 chars).
    pub name: String,

    /// Unit price in yen. Whether this contains tax depends on the
    /// form's [`PricingMode`].
    pub unit_price_yen: i64,

    /// Quantity purchased (1..=9999).
    pub quantity: i64,

    /// Line-level discount in yen, subtracted from unit price × quantity.
    pub discount_yen: i64,

    /// Consumption-tax rate for this item.
    #[ts(as = "u8")]
    pub tax_rate: TaxRate,

    /// Spending-category reference maintained by the backend.
    pub category_id: i64,
}

impl LineItem {
    /// Calculates the line total: unit price × quantity − discount.
    ///
    /// Not clamped: a discount larger than the item subtotal yields a
    /// negative line total, which the submission workflow rejects before
    /// anything is sent.
    #[inline]
    pub const fn line_total_yen(&self) -> i64 {
        self.unit_price_yen * self.quantity - self.discount_yen
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A receipt draft: header fields plus ordered line items.
///
/// ## Invariants
/// - `items` keeps insertion order; update/delete address items by index,
///   so indices held across a delete go stale.
/// - `purchase_day` is a calendar date with no time-of-day and is never
///   in the future once validated.
/// - `point_usage_yen` may not exceed the computed total at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    /// Shop name (≤ 40 chars).
    pub shop_name: String,

    /// Free-form memo (≤ 500 chars).
    pub memo: String,

    /// Day of purchase. Serialized as an ISO-8601 date string.
    #[ts(as = "String")]
    pub purchase_day: NaiveDate,

    /// Points redeemed against the final payable amount. Does not affect
    /// tax computation.
    pub point_usage_yen: i64,

    /// Line items in display order.
    pub items: Vec<LineItem>,
}

impl Receipt {
    /// Creates an empty draft dated `today`.
    ///
    /// The caller supplies the date; this crate never reads a clock.
    pub fn empty(today: NaiveDate) -> Self {
        Receipt {
            shop_name: String::new(),
            memo: String::new(),
            purchase_day: today,
            point_usage_yen: 0,
            items: Vec::new(),
        }
    }

    /// Checks if the draft has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
