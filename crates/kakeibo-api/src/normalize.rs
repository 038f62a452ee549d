//! # Response Normalization
//!
//! The backend is not consistent about response shapes: the same record
//! identifier arrives as `id`, `ID`, or `_id`, sometimes as a string, and
//! timestamps come under a few different keys. Everything is normalized
//! here, once, into [`SubmitAck`] — business logic never branches on
//! casing.
//!
//! Timestamps keep their explicit UTC offset (`DateTime<FixedOffset>`):
//! reinterpreting server time through the local clock is exactly the bug
//! this adapter exists to prevent.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Canonical result of a successful submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitAck {
    /// Identifier the backend assigned to the stored receipt, if it sent
    /// one back.
    pub receipt_id: Option<i64>,

    /// Server-side registration time, offset preserved.
    pub registered_at: Option<DateTime<FixedOffset>>,
}

/// Normalizes an arbitrary response body into a [`SubmitAck`].
///
/// Tolerant by design: a body that carries neither an id nor a timestamp
/// (or is not an object at all) normalizes to an empty ack — a 2xx status
/// already decided that the submission succeeded.
pub fn normalize_ack(body: &Value) -> SubmitAck {
    // Some endpoints wrap the record in a one-element array.
    let record = match body {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    };

    SubmitAck {
        receipt_id: canonical_id(record),
        registered_at: canonical_timestamp(record),
    }
}

const ID_KEYS: &[&str] = &["id", "ID", "_id"];
const TIMESTAMP_KEYS: &[&str] = &["registered_at", "registeredAt", "created_at", "createdAt"];

fn canonical_id(record: &Value) -> Option<i64> {
    let value = first_present(record, ID_KEYS)?;
    match value {
        Value::Number(n) => n.as_i64(),
        // Ids show up string-typed from one of the endpoints.
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn canonical_timestamp(record: &Value) -> Option<DateTime<FixedOffset>> {
    let value = first_present(record, TIMESTAMP_KEYS)?;
    let raw = value.as_str()?;
    DateTime::parse_from_rfc3339(raw).ok()
}

fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| record.get(key))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_under_any_casing() {
        for key in ["id", "ID", "_id"] {
            let ack = normalize_ack(&json!({ key: 42 }));
            assert_eq!(ack.receipt_id, Some(42), "key {}", key);
        }
    }

    #[test]
    fn test_string_typed_id_is_coerced() {
        let ack = normalize_ack(&json!({ "_id": "77" }));
        assert_eq!(ack.receipt_id, Some(77));

        let ack = normalize_ack(&json!({ "id": "not-a-number" }));
        assert_eq!(ack.receipt_id, None);
    }

    #[test]
    fn test_wrapped_array_is_unwrapped() {
        let ack = normalize_ack(&json!([{ "ID": 5 }]));
        assert_eq!(ack.receipt_id, Some(5));
    }

    #[test]
    fn test_timestamp_keeps_offset() {
        let ack = normalize_ack(&json!({
            "id": 1,
            "registered_at": "2024-03-09T21:05:00+09:00"
        }));

        let ts = ack.registered_at.unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(ts.to_rfc3339(), "2024-03-09T21:05:00+09:00");
    }

    #[test]
    fn test_unrecognized_body_is_empty_ack() {
        assert_eq!(normalize_ack(&json!("ok")), SubmitAck::default());
        assert_eq!(normalize_ack(&json!({})), SubmitAck::default());
        assert_eq!(normalize_ack(&Value::Null), SubmitAck::default());
    }
}
