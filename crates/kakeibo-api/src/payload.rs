//! # Wire Payload
//!
//! The shape the backend's receipt endpoint accepts: an array containing
//! one receipt object with nested products. Field names are the API's
//! snake_case, independent of the camelCase the frontend DTOs use.
//!
//! ## Discount Handling
//! Two endpoints exist historically and they disagree about discounts:
//! one takes `discount` as its own field, the other expects it flattened
//! into the unit price. The strategy is configuration, not a fixed
//! transform — see [`DiscountStrategy`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kakeibo_core::{ComputedTotals, LineItem, Receipt};

// =============================================================================
// Discount Strategy
// =============================================================================

/// How a line item's discount is represented on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountStrategy {
    /// Send `discount` as its own field, price untouched.
    #[default]
    SeparateField,

    /// Fold the discount into the unit price:
    /// `floor((unit_price × quantity − discount) / quantity)`, discount 0.
    FlattenIntoPrice,
}

// =============================================================================
// Payload Types
// =============================================================================

/// One product entry in the wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub product_name: String,
    pub product_price: i64,
    pub quantity: i64,
    pub category_id: i64,
    pub discount: i64,
    pub tax_rate: u8,
}

/// The receipt object the backend accepts (sent as a one-element array).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPayload {
    pub shop_name: String,
    pub shop_address: String,
    /// ISO-8601 date string on the wire.
    pub purchase_day: NaiveDate,
    pub total_amount: i64,
    pub memo: String,
    pub products: Vec<ProductPayload>,
}

// =============================================================================
// Payload Construction
// =============================================================================

/// Builds the one-element wire payload for a validated draft.
///
/// `totals` must come from the same receipt and the active pricing mode;
/// the backend stores `total_amount` as-is and never recomputes it.
pub fn build_payload(
    receipt: &Receipt,
    totals: &ComputedTotals,
    shop_address: &str,
    strategy: DiscountStrategy,
) -> Vec<ReceiptPayload> {
    vec![ReceiptPayload {
        shop_name: receipt.shop_name.clone(),
        shop_address: shop_address.to_string(),
        purchase_day: receipt.purchase_day,
        total_amount: totals.total_amount_yen,
        memo: receipt.memo.clone(),
        products: receipt
            .items
            .iter()
            .map(|item| product_payload(item, strategy))
            .collect(),
    }]
}

fn product_payload(item: &LineItem, strategy: DiscountStrategy) -> ProductPayload {
    let (product_price, discount) = match strategy {
        DiscountStrategy::SeparateField => (item.unit_price_yen, item.discount_yen),
        DiscountStrategy::FlattenIntoPrice => (flattened_unit_price(item), 0),
    };

    ProductPayload {
        product_name: item.name.clone(),
        product_price,
        quantity: item.quantity,
        category_id: item.category_id,
        discount,
        tax_rate: item.tax_rate.percent(),
    }
}

/// floor((unit_price × quantity − discount) / quantity)
fn flattened_unit_price(item: &LineItem) -> i64 {
    item.line_total_yen() / item.quantity
}

// =============================================================================
// Unit Tests
// =============================================================================
