//! # Submission Client
//!
//! The one outbound call this system makes: POST the receipt payload to
//! the backend. [`ReceiptSubmitter`] is the seam the workflow depends on,
//! so tests can count calls without a network; [`HttpSubmitter`] is the
//! real implementation over reqwest.
//!
//! A submission, once sent, is not retractable — cancellation is the
//! workflow's concern (it suppresses duplicate sends; it never aborts an
//! in-flight request).

use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::normalize::{normalize_ack, SubmitAck};
use crate::payload::ReceiptPayload;

/// Seam for submitting a receipt payload.
#[allow(async_fn_in_trait)]
pub trait ReceiptSubmitter {
    async fn submit(&self, payload: &[ReceiptPayload]) -> ApiResult<SubmitAck>;
}

// =============================================================================
// HTTP Submitter
// =============================================================================

/// Submits receipts over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    http: reqwest::Client,
    submit_url: String,
}

impl HttpSubmitter {
    /// Builds the client from configuration. The bearer token, when
    /// present, rides along as a default header on every request.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));

        if let Some(token) = &config.api_token {
            let mut headers = reqwest::header::HeaderMap::new();
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Config("api token is not a valid header value".into()))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let http = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(HttpSubmitter {
            http,
            submit_url: config.submit_url.clone(),
        })
    }
}

impl ReceiptSubmitter for HttpSubmitter {
    async fn submit(&self, payload: &[ReceiptPayload]) -> ApiResult<SubmitAck> {
        debug!(url = %self.submit_url, receipts = payload.len(), "submitting receipt");

        let response = self
            .http
            .post(&self.submit_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: self.submit_url.clone(),
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Http {
            endpoint: self.submit_url.clone(),
            source: e,
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), "receipt submission rejected");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        let ack = normalize_ack(&value);
        info!(receipt_id = ?ack.receipt_id, "receipt submitted");
        Ok(ack)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use kakeibo_core::{ComputedTotals, LineItem, PricingMode, Receipt, TaxRate};

    use super::*;
    use crate::payload::{build_payload, DiscountStrategy};

    fn sample_payload() -> Vec<ReceiptPayload> {
        let mut receipt = Receipt::empty("2024-03-09".parse().unwrap());
        receipt.shop_name = "コンビニ".to_string();
        receipt.items.push(LineItem {
            name: "おにぎり".to_string(),
            unit_price_yen: 150,
            quantity: 2,
            discount_yen: 0,
            tax_rate: TaxRate::Reduced,
            category_id: 2,
        });
        let totals = ComputedTotals::compute(&receipt.items, PricingMode::Inclusive);
        build_payload(&receipt, &totals, "", DiscountStrategy::SeparateField)
    }

    fn config_for(server: &MockServer, token: Option<&str>) -> ApiConfig {
        ApiConfig {
            submit_url: format!("{}/api/receipts", server.uri()),
            api_token: token.map(String::from),
            timeout_secs: 5,
            discount_strategy: DiscountStrategy::SeparateField,
        }
    }

    #[tokio::test]
    async fn test_submit_success_normalizes_ack() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/receipts"))
            .and(body_partial_json(serde_json::json!([
                { "shop_name": "コンビニ", "total_amount": 300 }
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ID": "31",
                "registered_at": "2024-03-09T21:05:00+09:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpSubmitter::new(&config_for(&server, None)).unwrap();
        let ack = client.submit(&sample_payload()).await.unwrap();

        assert_eq!(ack.receipt_id, Some(31));
        assert!(ack.registered_at.is_some());
    }

    #[tokio::test]
    async fn test_submit_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpSubmitter::new(&config_for(&server, Some("sekrit"))).unwrap();
        client.submit(&sample_payload()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("total mismatch"))
            .mount(&server)
            .await;

        let client = HttpSubmitter::new(&config_for(&server, None)).unwrap();
        let err = client.submit(&sample_payload()).await.unwrap_err();

        match err {
            ApiError::Rejected { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "total mismatch");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_with_empty_body_is_empty_ack() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = HttpSubmitter::new(&config_for(&server, None)).unwrap();
        let ack = client.submit(&sample_payload()).await.unwrap();
        assert_eq!(ack, SubmitAck::default());
    }
}
