//! # Receipt Draft Controller
//!
//! Owns the receipt-in-progress for one logical form.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend Action          Controller Operation      Draft Change        │
//! │  ───────────────          ────────────────────      ────────────        │
//! │  Add row          ──────► add_item()          ────► items.push(item)    │
//! │  Edit row i       ──────► update_item(i, ..)  ────► items[i] = item     │
//! │  Remove row i     ──────► delete_item(i)      ────► items.remove(i)     │
//! │  Edit header      ──────► update_header(..)   ────► one header field    │
//! │  Tax toggle       ──────► set_pricing_mode()  ────► preference key      │
//! │  Cancel           ──────► reset()             ────► empty + clear store │
//! │                                                                         │
//! │  Every mutation autosaves the full draft. Persistence is best-effort:   │
//! │  a failed write is logged and swallowed, never a crash.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are addressed by rendered-list index. `delete_item` shifts later
//! indices down, so indices held across a delete are stale; out-of-bounds
//! updates and deletes are silent no-ops.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use kakeibo_core::{ComputedTotals, LineItem, PricingMode, Receipt};
use kakeibo_store::{StorageBackend, Store};

/// A typed patch for one receipt header field.
#[derive(Debug, Clone)]
pub enum HeaderField {
    ShopName(String),
    Memo(String),
    PurchaseDay(NaiveDate),
    PointUsage(i64),
}

/// Controller for a single receipt draft.
///
/// One instance per logical form slot; the `form_key` is also the draft's
/// storage key, so concurrent slots (queued OCR confirmations) never
/// clobber each other.
pub struct DraftController<'a, B: StorageBackend> {
    store: &'a Store<B>,
    form_key: String,
    today: NaiveDate,
    receipt: Receipt,
    pricing_mode: PricingMode,
}

impl<'a, B: StorageBackend> DraftController<'a, B> {
    /// Creates a controller for `form_key`.
    ///
    /// An explicit seed (edit mode, OCR import) wins; otherwise a
    /// persisted draft is restored; otherwise the draft starts empty,
    /// dated `today`. The pricing mode always comes from the preference
    /// store, independent of the draft itself.
    pub fn new(
        store: &'a Store<B>,
        form_key: impl Into<String>,
        today: NaiveDate,
        seed: Option<Receipt>,
    ) -> Self {
        let form_key = form_key.into();

        let receipt = match seed {
            Some(receipt) => receipt,
            None => match store.drafts().load(&form_key) {
                Some(receipt) => {
                    info!(form_key = %form_key, "restored persisted draft");
                    receipt
                }
                None => Receipt::empty(today),
            },
        };

        let pricing_mode = store.preferences().pricing_mode(&form_key);

        DraftController {
            store,
            form_key,
            today,
            receipt,
            pricing_mode,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn form_key(&self) -> &str {
        &self.form_key
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn pricing_mode(&self) -> PricingMode {
        self.pricing_mode
    }

    /// Recomputes totals from the current items and pricing mode.
    /// Derived on every read, never cached.
    pub fn totals(&self) -> ComputedTotals {
        ComputedTotals::compute(&self.receipt.items, self.pricing_mode)
    }

    /// Amount payable after point redemption.
    pub fn final_payable_yen(&self) -> i64 {
        self.totals().final_payable_yen(self.receipt.point_usage_yen)
    }

    // =========================================================================
    // Mutations (each one autosaves)
    // =========================================================================

    /// Appends an item. No dedup: the same product twice is two rows.
    pub fn add_item(&mut self, item: LineItem) {
        debug!(form_key = %self.form_key, name = %item.name, "add item");
        self.receipt.items.push(item);
        self.persist();
    }

    /// Replaces the item at `index`. Out of bounds is a silent no-op:
    /// the index came from the rendered list, and a stale one must not
    /// touch unrelated rows.
    pub fn update_item(&mut self, index: usize, item: LineItem) {
        match self.receipt.items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                self.persist();
            }
            None => debug!(form_key = %self.form_key, index, "update ignored, index out of bounds"),
        }
    }

    /// Removes the item at `index`, shifting later indices down.
    /// Out of bounds is a silent no-op.
    pub fn delete_item(&mut self, index: usize) {
        if index < self.receipt.items.len() {
            self.receipt.items.remove(index);
            self.persist();
        } else {
            debug!(form_key = %self.form_key, index, "delete ignored, index out of bounds");
        }
    }

    /// Sets one header field.
    pub fn update_header(&mut self, field: HeaderField) {
        match field {
            HeaderField::ShopName(value) => self.receipt.shop_name = value,
            HeaderField::Memo(value) => self.receipt.memo = value,
            HeaderField::PurchaseDay(value) => self.receipt.purchase_day = value,
            HeaderField::PointUsage(value) => self.receipt.point_usage_yen = value,
        }
        self.persist();
    }

    /// Flips the tax-in/tax-out toggle and persists it under the
    /// preference key, not the draft key.
    pub fn set_pricing_mode(&mut self, mode: PricingMode) {
        self.pricing_mode = mode;
        if let Err(e) = self.store.preferences().set_pricing_mode(&self.form_key, mode) {
            warn!(form_key = %self.form_key, error = %e, "pricing mode write failed");
        }
    }

    /// Restores the empty default draft and clears the persisted entry.
    pub fn reset(&mut self) {
        info!(form_key = %self.form_key, "draft reset");
        self.receipt = Receipt::empty(self.today);
        if let Err(e) = self.store.drafts().clear(&self.form_key) {
            warn!(form_key = %self.form_key, error = %e, "draft clear failed");
        }
    }

    /// Best-effort autosave of the full draft.
    fn persist(&self) {
        if let Err(e) = self.store.drafts().save(&self.form_key, &self.receipt) {
            warn!(form_key = %self.form_key, error = %e, "draft autosave failed");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
