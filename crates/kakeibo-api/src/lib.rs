//! # kakeibo-api: The Outbound Boundary of the Kakeibo Receipt Core
//!
//! Everything that crosses the wire lives here, in both directions:
//!
//! - [`payload`] - wire payload construction, with the configurable
//!   discount strategy (separate field vs. flattened into price)
//! - [`client`] - the [`ReceiptSubmitter`] seam and its HTTP
//!   implementation (one POST; URL and token supplied by the caller)
//! - [`normalize`] - canonicalizes the backend's shape-shifting responses
//!   at the boundary, ids and offset-explicit timestamps included
//! - [`import`] - coerces string-typed OCR records into typed drafts
//! - [`config`] - endpoint, token, timeout, discount strategy
//!
//! Authentication is an external collaborator: this crate attaches the
//! token it is given and owns nothing about sessions.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod import;
pub mod normalize;
pub mod payload;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{HttpSubmitter, ReceiptSubmitter};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use import::{coerce_records, OcrItemRecord, OcrReceiptRecord, QueuedDraft};
pub use normalize::{normalize_ack, SubmitAck};
pub use payload::{build_payload, DiscountStrategy, ProductPayload, ReceiptPayload};
