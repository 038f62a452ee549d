//! # Submission Workflow
//!
//! Validates a draft end-to-end, builds the wire payload, and hands it to
//! the submitter.
//!
//! ## Precondition Order
//! ```text
//! 1. Header fields        shop name / memo length, point range, date
//!                         → ALL failures collected into FieldErrors
//! 2. At least one item    → "no items"
//! 3. Discount per item    → "discount exceeds the item subtotal"
//! 4. Points vs. total     → "points exceed total" (message names the total)
//! ──────────────────────────────────────────────────────────────────────
//! 5. build payload → submit → on success: reset draft, clear errors
//!                            on failure: keep draft, surface message
//! ```
//!
//! One submission may be in flight at a time. The guard only suppresses
//! duplicate sends — an in-flight request is never cancelled, because the
//! remote effect is not retractable once sent.

use tracing::{debug, info, warn};

use kakeibo_api::{build_payload, DiscountStrategy, ReceiptSubmitter, SubmitAck};
use kakeibo_core::validation::{
    validate_amount, validate_memo, validate_purchase_day, validate_shop_name,
};
use kakeibo_core::{ComputedTotals, CoreError, Receipt};
use kakeibo_store::StorageBackend;

use crate::controller::DraftController;
use crate::error::{FieldErrors, FormError};

/// Drives validation and submission for one form.
pub struct SubmissionWorkflow<S: ReceiptSubmitter> {
    submitter: S,
    discount_strategy: DiscountStrategy,
    shop_address: String,
    in_flight: bool,
    field_errors: FieldErrors,
    message: Option<String>,
}

impl<S: ReceiptSubmitter> SubmissionWorkflow<S> {
    pub fn new(submitter: S, discount_strategy: DiscountStrategy) -> Self {
        SubmissionWorkflow {
            submitter,
            discount_strategy,
            shop_address: String::new(),
            in_flight: false,
            field_errors: FieldErrors::new(),
            message: None,
        }
    }

    /// Shop address forwarded on the wire payload (the receipt draft
    /// itself does not carry one).
    pub fn set_shop_address(&mut self, address: impl Into<String>) {
        self.shop_address = address.into();
    }

    /// Per-field messages from the last attempt, for display.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Workflow-level message from the last attempt, for display.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Validates the draft and, if everything holds, submits it.
    ///
    /// On success the controller is reset (which clears the persisted
    /// draft) and stored errors are wiped. On any failure the draft stays
    /// intact and the guard is released so the user can correct and
    /// retry.
    pub async fn submit<B: StorageBackend>(
        &mut self,
        controller: &mut DraftController<'_, B>,
    ) -> Result<SubmitAck, FormError> {
        if self.in_flight {
            debug!(form_key = %controller.form_key(), "duplicate submit suppressed");
            return Err(FormError::SubmissionInFlight);
        }

        let totals = controller.totals();
        if let Err(e) = self.check_preconditions(controller, &totals) {
            self.message = Some(e.to_string());
            return Err(e);
        }

        self.in_flight = true;
        let payload = build_payload(
            controller.receipt(),
            &totals,
            &self.shop_address,
            self.discount_strategy,
        );

        let result = self.submitter.submit(&payload).await;
        self.in_flight = false;

        match result {
            Ok(ack) => {
                info!(form_key = %controller.form_key(), receipt_id = ?ack.receipt_id, "submission accepted");
                controller.reset();
                self.field_errors.clear();
                self.message = None;
                Ok(ack)
            }
            Err(e) => {
                warn!(form_key = %controller.form_key(), error = %e, "submission failed, draft kept");
                self.message = Some(e.to_string());
                Err(FormError::Submit(e))
            }
        }
    }

    fn check_preconditions<B: StorageBackend>(
        &mut self,
        controller: &DraftController<'_, B>,
        totals: &ComputedTotals,
    ) -> Result<(), FormError> {
        let receipt = controller.receipt();

        self.field_errors = validate_header(receipt, controller.today());
        if !self.field_errors.is_empty() {
            return Err(FormError::InvalidFields {
                count: self.field_errors.len(),
            });
        }

        if receipt.is_empty() {
            return Err(CoreError::NoItems.into());
        }

        for item in &receipt.items {
            if item.discount_yen > item.unit_price_yen * item.quantity {
                return Err(CoreError::DiscountExceedsItemTotal {
                    name: item.name.clone(),
                }
                .into());
            }
        }

        if receipt.point_usage_yen > totals.total_amount_yen {
            return Err(CoreError::PointsExceedTotal {
                point_usage_yen: receipt.point_usage_yen,
                total_yen: totals.total_amount_yen,
            }
            .into());
        }

        Ok(())
    }
}

/// Runs every header validator and collects every failure — no
/// short-circuit, so the user sees all problems at once.
fn validate_header(receipt: &Receipt, today: chrono::NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(e) = validate_shop_name(&receipt.shop_name) {
        errors.insert("shop_name", e.to_string());
    }
    if let Err(e) = validate_memo(&receipt.memo) {
        errors.insert("memo", e.to_string());
    }
    if let Err(e) = validate_amount(receipt.point_usage_yen) {
        errors.insert("point_usage", e.to_string());
    }
    if let Err(e) = validate_purchase_day(receipt.purchase_day, today) {
        errors.insert("purchase_day", e.to_string());
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::NaiveDate;

    use kakeibo_api::{ApiError, ApiResult, ReceiptPayload};
    use kakeibo_core::{LineItem, TaxRate};
    use kakeibo_store::{MemoryBackend, Store};

    use super::*;
    use crate::controller::HeaderField;

    /// Counts calls; optionally fails every request.
    struct MockSubmitter {
        calls: Cell<usize>,
        fail: bool,
    }

    impl MockSubmitter {
        fn ok() -> Self {
            MockSubmitter {
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            MockSubmitter {
                calls: Cell::new(0),
                fail: true,
            }
        }
    }

    impl ReceiptSubmitter for &MockSubmitter {
        async fn submit(&self, _payload: &[ReceiptPayload]) -> ApiResult<SubmitAck> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(ApiError::Rejected {
                    status: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok(SubmitAck::default())
            }
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn item(price: i64, qty: i64, discount: i64) -> LineItem {
        LineItem {
            name: "item".to_string(),
            unit_price_yen: price,
            quantity: qty,
            discount_yen: discount,
            tax_rate: TaxRate::Standard,
            category_id: 1,
        }
    }

    fn store() -> Store<MemoryBackend> {
        // RUST_LOG=debug shows the workflow's tracing output when a test fails.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        Store::new(MemoryBackend::new())
    }

    #[tokio::test]
    async fn test_empty_items_block_submission_entirely() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.update_header(HeaderField::ShopName("valid".to_string()));

        let submitter = MockSubmitter::ok();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);

        let err = workflow.submit(&mut controller).await.unwrap_err();
        assert!(matches!(err, FormError::Rule(CoreError::NoItems)));
        // The API collaborator must never have been called.
        assert_eq!(submitter.calls.get(), 0);
        assert_eq!(workflow.message(), Some("Receipt has no items"));
    }

    #[tokio::test]
    async fn test_field_errors_are_collected_not_short_circuited() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.add_item(item(100, 1, 0));
        controller.update_header(HeaderField::ShopName("x".repeat(41)));
        controller.update_header(HeaderField::Memo("y".repeat(501)));
        controller.update_header(HeaderField::PointUsage(-5));

        let submitter = MockSubmitter::ok();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);

        let err = workflow.submit(&mut controller).await.unwrap_err();
        assert!(matches!(err, FormError::InvalidFields { count: 3 }));
        assert!(workflow.field_errors().message("shop_name").is_some());
        assert!(workflow.field_errors().message("memo").is_some());
        assert!(workflow.field_errors().message("point_usage").is_some());
        assert_eq!(submitter.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_future_purchase_day_is_a_field_error() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.add_item(item(100, 1, 0));
        controller.update_header(HeaderField::PurchaseDay(day("2024-06-02")));

        let submitter = MockSubmitter::ok();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);

        assert!(workflow.submit(&mut controller).await.is_err());
        assert!(workflow.field_errors().message("purchase_day").is_some());
    }

    #[tokio::test]
    async fn test_points_exceeding_total_name_the_total() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.add_item(item(1000, 1, 0)); // inclusive total: 1000
        controller.update_header(HeaderField::PointUsage(1500));

        let submitter = MockSubmitter::ok();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);

        let err = workflow.submit(&mut controller).await.unwrap_err();
        assert!(matches!(
            err,
            FormError::Rule(CoreError::PointsExceedTotal { total_yen: 1000, .. })
        ));
        assert_eq!(
            workflow.message(),
            Some("Point usage 1500 exceeds receipt total 1000")
        );
        assert_eq!(submitter.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_oversized_discount_blocks() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.add_item(item(100, 2, 300)); // discount 300 > 200

        let submitter = MockSubmitter::ok();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);

        let err = workflow.submit(&mut controller).await.unwrap_err();
        assert!(matches!(
            err,
            FormError::Rule(CoreError::DiscountExceedsItemTotal { .. })
        ));
        assert_eq!(submitter.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_success_resets_draft_and_errors() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.add_item(item(1000, 1, 0));
        controller.update_header(HeaderField::ShopName("やおや".to_string()));

        let submitter = MockSubmitter::ok();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);

        workflow.submit(&mut controller).await.unwrap();

        assert_eq!(submitter.calls.get(), 1);
        assert!(controller.receipt().is_empty());
        assert!(store.drafts().load("f").is_none());
        assert!(workflow.field_errors().is_empty());
        assert!(workflow.message().is_none());
        assert!(!workflow.is_in_flight());
    }

    #[tokio::test]
    async fn test_failure_keeps_draft_and_allows_retry() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.add_item(item(1000, 1, 0));

        let submitter = MockSubmitter::failing();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);

        let err = workflow.submit(&mut controller).await.unwrap_err();
        assert!(matches!(err, FormError::Submit(_)));

        // Draft intact, guard released, message surfaced.
        assert_eq!(controller.receipt().item_count(), 1);
        assert!(store.drafts().load("f").is_some());
        assert!(!workflow.is_in_flight());
        assert!(workflow.message().unwrap().contains("500"));

        // Retry reaches the submitter again.
        let _ = workflow.submit(&mut controller).await;
        assert_eq!(submitter.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_in_flight_guard_suppresses_duplicates() {
        let store = store();
        let mut controller = DraftController::new(&store, "f", day("2024-06-01"), None);
        controller.add_item(item(1000, 1, 0));

        let submitter = MockSubmitter::ok();
        let mut workflow = SubmissionWorkflow::new(&submitter, DiscountStrategy::SeparateField);
        workflow.in_flight = true;

        let err = workflow.submit(&mut controller).await.unwrap_err();
        assert!(matches!(err, FormError::SubmissionInFlight));
        assert_eq!(submitter.calls.get(), 0);
    }
}
