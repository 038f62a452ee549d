//! # Draft Repository
//!
//! Serializes a receipt-in-progress to its storage key and back.
//!
//! ## Contract
//! - `save` writes the full draft as JSON (`purchase_day` as an ISO date
//!   string, which is chrono's serde form for `NaiveDate`).
//! - `load` returns `None` for missing, malformed, or unreadable entries.
//!   Parse failures never propagate: a broken draft is the same as no
//!   draft, logged at `warn` so quota bugs stay visible.
//! - `clear` removes the entry.
//!
//! One key per logical form instance, so several drafts can queue
//! concurrently (e.g. OCR-derived receipts awaiting sequential
//! confirmation).

use tracing::warn;

use kakeibo_core::Receipt;

use crate::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};

/// Namespace prefix separating drafts from other stored values.
const DRAFT_PREFIX: &str = "draft:";

/// Repository for receipt drafts.
pub struct DraftRepository<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> DraftRepository<'a, B> {
    pub(crate) fn new(backend: &'a B) -> Self {
        DraftRepository { backend }
    }

    fn storage_key(key: &str) -> String {
        format!("{}{}", DRAFT_PREFIX, key)
    }

    /// Persists the full draft under `key`.
    pub fn save(&self, key: &str, receipt: &Receipt) -> StoreResult<()> {
        let json =
            serde_json::to_string(receipt).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.backend.set(&Self::storage_key(key), &json)
    }

    /// Restores the draft stored under `key`, if any.
    ///
    /// Missing and malformed entries both come back as `None`.
    pub fn load(&self, key: &str) -> Option<Receipt> {
        let raw = match self.backend.get(&Self::storage_key(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "draft read failed, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                warn!(key = %key, error = %e, "stored draft is malformed, treating as absent");
                None
            }
        }
    }

    /// Removes the draft stored under `key`.
    pub fn clear(&self, key: &str) -> StoreResult<()> {
        self.backend.remove(&Self::storage_key(key))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use kakeibo_core::{LineItem, TaxRate};

    use super::*;
    use crate::backend::MemoryBackend;

    fn sample_receipt() -> Receipt {
        let day: NaiveDate = "2024-03-09".parse().unwrap();
        let mut receipt = Receipt::empty(day);
        receipt.shop_name = "スーパーマルエツ".to_string();
        receipt.memo = "weekly groceries".to_string();
        receipt.point_usage_yen = 120;
        receipt.items.push(LineItem {
            name: "牛乳".to_string(),
            unit_price_yen: 216,
            quantity: 2,
            discount_yen: 0,
            tax_rate: TaxRate::Reduced,
            category_id: 3,
        });
        receipt
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let backend = MemoryBackend::new();
        let drafts = DraftRepository::new(&backend);
        let receipt = sample_receipt();

        drafts.save("expense-entry:1", &receipt).unwrap();
        let restored = drafts.load("expense-entry:1").unwrap();

        assert_eq!(restored, receipt);
        // The date must survive as a calendar date.
        assert_eq!(restored.purchase_day, receipt.purchase_day);
    }

    #[test]
    fn test_purchase_day_stored_as_iso_string() {
        let backend = MemoryBackend::new();
        let drafts = DraftRepository::new(&backend);
        drafts.save("k", &sample_receipt()).unwrap();

        let raw = backend.get("draft:k").unwrap().unwrap();
        assert!(raw.contains("\"purchaseDay\":\"2024-03-09\""));
    }

    #[test]
    fn test_load_missing_returns_none() {
        let backend = MemoryBackend::new();
        let drafts = DraftRepository::new(&backend);
        assert!(drafts.load("nothing-here").is_none());
    }

    #[test]
    fn test_load_malformed_returns_none() {
        let backend = MemoryBackend::new();
        backend.set("draft:broken", "{not json").unwrap();
        backend.set("draft:wrong-shape", "{\"foo\": 1}").unwrap();

        let drafts = DraftRepository::new(&backend);
        assert!(drafts.load("broken").is_none());
        assert!(drafts.load("wrong-shape").is_none());
    }

    #[test]
    fn test_clear_removes_entry() {
        let backend = MemoryBackend::new();
        let drafts = DraftRepository::new(&backend);

        drafts.save("k", &sample_receipt()).unwrap();
        drafts.clear("k").unwrap();
        assert!(drafts.load("k").is_none());
    }

    #[test]
    fn test_keys_are_independent_slots() {
        let backend = MemoryBackend::new();
        let drafts = DraftRepository::new(&backend);

        let mut first = sample_receipt();
        first.shop_name = "first".to_string();
        let mut second = sample_receipt();
        second.shop_name = "second".to_string();

        drafts.save("ocr:1", &first).unwrap();
        drafts.save("ocr:2", &second).unwrap();

        assert_eq!(drafts.load("ocr:1").unwrap().shop_name, "first");
        assert_eq!(drafts.load("ocr:2").unwrap().shop_name, "second");
    }
}
