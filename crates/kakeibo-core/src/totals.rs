//! # Totals Module
//!
//! The receipt tax/total computation engine.
//!
//! ## Why Integer Yen?
//! JPY has no fractional unit, so every amount in the system is an `i64`
//! yen count. Tax is derived with integer math and floors; the dropped
//! fractions are part of the contract, not an accident.
//!
//! ## Rounding Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Exclusive mode (tax added on top)                                      │
//! │    base[rate]  = Σ line totals at that rate                             │
//! │    tax[rate]   = floor(base[rate] × rate / 100)      ← per RATE BUCKET  │
//! │    total       = subtotal + Σ tax[rate]                                 │
//! │                                                                         │
//! │  Inclusive mode (tax already in the price)                              │
//! │    tax(item)   = floor(line × rate / (100 + rate))   ← per ITEM         │
//! │    tax[rate]   = Σ tax(item) at that rate                               │
//! │    total       = subtotal            (nothing is added)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The two modes floor at different granularities and therefore disagree
//! on multi-item mixed-rate receipts. That asymmetry is load-bearing:
//! unifying it would change stored financial totals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{LineItem, PricingMode, TaxRate};

// =============================================================================
// Tax Breakdown
// =============================================================================

/// Tax amounts keyed by rate. Only the 8% and 10% buckets exist; 0% items
/// contribute to the subtotal but never to a tax bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaxBreakdown {
    /// Tax attributed to the 8% reduced rate.
    pub rate8_yen: i64,

    /// Tax attributed to the 10% standard rate.
    pub rate10_yen: i64,
}

impl TaxBreakdown {
    /// Sum of both buckets.
    #[inline]
    pub const fn total_yen(&self) -> i64 {
        self.rate8_yen + self.rate10_yen
    }

    /// Returns the bucket for a rate (zero for the untaxed rate).
    pub const fn for_rate(&self, rate: TaxRate) -> i64 {
        match rate {
            TaxRate::Zero => 0,
            TaxRate::Reduced => self.rate8_yen,
            TaxRate::Standard => self.rate10_yen,
        }
    }

    fn add(&mut self, rate: TaxRate, amount_yen: i64) {
        match rate {
            TaxRate::Zero => {}
            TaxRate::Reduced => self.rate8_yen += amount_yen,
            TaxRate::Standard => self.rate10_yen += amount_yen,
        }
    }
}

// =============================================================================
// Computed Totals
// =============================================================================

/// Derived totals for a receipt draft. Never stored: recomputed from the
/// items and the pricing mode on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComputedTotals {
    /// Σ (unit price × quantity − discount), mode-independent.
    pub sub_total_yen: i64,

    /// Per-rate tax amounts.
    pub tax_by_rate: TaxBreakdown,

    /// Grand total. Exclusive mode: subtotal + tax. Inclusive mode: the
    /// subtotal itself (tax is embedded, not added).
    pub total_amount_yen: i64,
}

impl ComputedTotals {
    /// Computes totals for the given items under the given pricing mode.
    ///
    /// An empty item list yields all-zero totals. Negative line totals
    /// (discount above the item subtotal) pass through unclamped; keeping
    /// them out is the submission workflow's job.
    pub fn compute(items: &[LineItem], mode: PricingMode) -> Self {
        let mut sub_total_yen: i64 = 0;
        let mut tax_by_rate = TaxBreakdown::default();
        // Exclusive mode pools line totals per rate before flooring once.
        let mut base_by_rate = TaxBreakdown::default();

        for item in items {
            let line_total = item.line_total_yen();
            sub_total_yen += line_total;

            match mode {
                PricingMode::Exclusive => {
                    base_by_rate.add(item.tax_rate, line_total);
                }
                PricingMode::Inclusive => {
                    tax_by_rate.add(item.tax_rate, embedded_tax(line_total, item.tax_rate));
                }
            }
        }

        let total_amount_yen = match mode {
            PricingMode::Exclusive => {
                tax_by_rate.rate8_yen = added_tax(base_by_rate.rate8_yen, TaxRate::Reduced);
                tax_by_rate.rate10_yen = added_tax(base_by_rate.rate10_yen, TaxRate::Standard);
                sub_total_yen + tax_by_rate.total_yen()
            }
            PricingMode::Inclusive => sub_total_yen,
        };

        ComputedTotals {
            sub_total_yen,
            tax_by_rate,
            total_amount_yen,
        }
    }

    /// Subtotal with tax stripped back out, for inclusive-mode display.
    #[inline]
    pub const fn sub_total_excluding_tax_yen(&self) -> i64 {
        self.total_amount_yen - self.tax_by_rate.total_yen()
    }

    /// Amount actually payable after point redemption, floored at zero.
    #[inline]
    pub fn final_payable_yen(&self, point_usage_yen: i64) -> i64 {
        (self.total_amount_yen - point_usage_yen).max(0)
    }
}

/// Tax added on top of a tax-free base: floor(base × rate / 100).
///
/// Widened to i128 so pathological bases cannot overflow mid-multiply.
fn added_tax(base_yen: i64, rate: TaxRate) -> i64 {
    let pct = rate.percent() as i128;
    (base_yen as i128 * pct / 100) as i64
}

/// Tax embedded in a tax-in amount: floor(amount × rate / (100 + rate)).
fn embedded_tax(amount_yen: i64, rate: TaxRate) -> i64 {
    if !rate.is_taxed() {
        return 0;
    }
    let pct = rate.percent() as i128;
    (amount_yen as i128 * pct / (100 + pct)) as i64
}

// =============================================================================
// Unit Tests
// =============================================================================
