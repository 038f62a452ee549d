//! # OCR Import
//!
//! Receipt scans come back from the OCR service as loosely-typed records:
//! every numeric field is a string (often with full-width digits or a
//! currency mark still attached), dates may be absent, and items may be
//! incomplete. This module coerces those records into typed [`Receipt`]
//! drafts and assigns each one its own draft slot key, so a batch of
//! scanned receipts can queue for sequential confirmation.

use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use chrono::NaiveDate;

use kakeibo_core::validation::sanitize_numeric_input;
use kakeibo_core::{LineItem, Receipt, TaxRate};

// =============================================================================
// Inbound Records
// =============================================================================

/// One scanned receipt, as delivered by the OCR service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrReceiptRecord {
    #[serde(default)]
    pub shop_name: String,

    /// ISO date string, when the scan found one.
    #[serde(default)]
    pub purchase_day: Option<String>,

    #[serde(default)]
    pub items: Vec<OcrItemRecord>,
}

/// One scanned line item. All numerics are string-typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrItemRecord {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub quantity: String,

    #[serde(default)]
    pub discount: String,

    #[serde(default)]
    pub tax_rate: String,

    #[serde(default)]
    pub category_id: String,
}

// =============================================================================
// Coercion
// =============================================================================

/// A coerced draft waiting in its own slot for user confirmation.
#[derive(Debug, Clone)]
pub struct QueuedDraft {
    /// Draft-store key for this slot.
    pub key: String,

    pub receipt: Receipt,
}

/// Coerces a batch of OCR records into queued drafts.
///
/// `today` fills in for scans with no readable date and bounds nothing
/// here — future-date rejection stays in the submission workflow.
pub fn coerce_records(records: &[OcrReceiptRecord], today: NaiveDate) -> Vec<QueuedDraft> {
    records
        .iter()
        .map(|record| {
            let receipt = coerce_receipt(record, today);
            let key = format!("ocr:{}", Uuid::new_v4());
            debug!(key = %key, items = receipt.items.len(), "queued OCR draft");
            QueuedDraft { key, receipt }
        })
        .collect()
}

fn coerce_receipt(record: &OcrReceiptRecord, today: NaiveDate) -> Receipt {
    let purchase_day = record
        .purchase_day
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(today);

    let mut receipt = Receipt::empty(purchase_day);
    receipt.shop_name = record.shop_name.clone();
    receipt.items = record.items.iter().map(coerce_item).collect();
    receipt
}

fn coerce_item(record: &OcrItemRecord) -> LineItem {
    LineItem {
        name: record.name.clone(),
        unit_price_yen: coerce_int(&record.price),
        // A scan that lost the quantity still describes one purchase.
        quantity: coerce_int(&record.quantity).max(1),
        discount_yen: coerce_int(&record.discount),
        tax_rate: coerce_tax_rate(&record.tax_rate),
        category_id: coerce_int(&record.category_id),
    }
}

/// String → integer through the same sanitizer the keyboard path uses.
fn coerce_int(raw: &str) -> i64 {
    sanitize_numeric_input(raw).parse().unwrap_or(0)
}

fn coerce_tax_rate(raw: &str) -> TaxRate {
    sanitize_numeric_input(raw)
        .parse::<u8>()
        .ok()
        .and_then(|pct| TaxRate::try_from(pct).ok())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_string_numerics_are_coerced() {
        let record = OcrReceiptRecord {
            shop_name: "まいばすけっと".to_string(),
            purchase_day: Some("2024-03-09".to_string()),
            items: vec![OcrItemRecord {
                name: "食パン".to_string(),
                price: "￥１５８".to_string(),
                quantity: "2".to_string(),
                discount: "".to_string(),
                tax_rate: "8%".to_string(),
                category_id: "3".to_string(),
            }],
        };

        let drafts = coerce_records(&[record], day("2024-03-10"));
        assert_eq!(drafts.len(), 1);

        let item = &drafts[0].receipt.items[0];
        assert_eq!(item.unit_price_yen, 158);
        assert_eq!(item.quantity, 2);
        assert_eq!(item.discount_yen, 0);
        assert_eq!(item.tax_rate, TaxRate::Reduced);
        assert_eq!(drafts[0].receipt.purchase_day, day("2024-03-09"));
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let record = OcrReceiptRecord {
            shop_name: String::new(),
            purchase_day: None,
            items: vec![OcrItemRecord::default()],
        };

        let drafts = coerce_records(&[record], day("2024-03-10"));
        let receipt = &drafts[0].receipt;
        let item = &receipt.items[0];

        assert_eq!(receipt.purchase_day, day("2024-03-10"));
        assert_eq!(item.unit_price_yen, 0);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.tax_rate, TaxRate::Standard);
    }

    #[test]
    fn test_unsupported_rate_falls_back_to_standard() {
        let record = OcrItemRecord {
            tax_rate: "5".to_string(),
            ..OcrItemRecord::default()
        };
        assert_eq!(coerce_item(&record).tax_rate, TaxRate::Standard);
    }

    #[test]
    fn test_each_record_gets_its_own_slot_key() {
        let records = vec![OcrReceiptRecord::default(), OcrReceiptRecord::default()];
        let drafts = coerce_records(&records, day("2024-03-10"));

        assert_eq!(drafts.len(), 2);
        assert_ne!(drafts[0].key, drafts[1].key);
        assert!(drafts[0].key.starts_with("ocr:"));
    }
}
