use crate::utils::error::VerificationError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(150);

/// Checks `request.timestamp` in the body is within `tolerance` of `now`, in either direction.
pub fn validate_timestamp(
    body: &Value,
    tolerance: Duration,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, VerificationError> {
    let invalid = |reason: String| VerificationError::InvalidTimestamp { reason };

    let raw = body
        .pointer("/request/timestamp")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("request.timestamp is missing".to_string()))?;

    let timestamp = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| invalid(format!("'{}' is not an RFC 3339 timestamp: {}", raw, e)))?
        .with_timezone(&Utc);

    let skew = (now - timestamp).num_milliseconds().unsigned_abs();
    if u128::from(skew) > tolerance.as_millis() {
        return Err(invalid(format!(
            "'{}' is {}s away from now, tolerance is {}s",
            raw,
            skew / 1000,
            tolerance.as_secs()
        )));
    }

    Ok(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn body_at(timestamp: &str) -> Value {
        json!({ "request": { "type": "LaunchRequest", "timestamp": timestamp } })
    }

    #[test]
    fn test_fresh_timestamp_passes() {
        let parsed = validate_timestamp(&body_at("2024-03-01T11:59:30Z"), DEFAULT_TOLERANCE, fixed_now())
            .unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 11, 59, 30).unwrap());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        assert!(validate_timestamp(&body_at("2024-03-01T11:57:30Z"), DEFAULT_TOLERANCE, fixed_now()).is_ok());
        assert!(validate_timestamp(&body_at("2024-03-01T11:57:29Z"), DEFAULT_TOLERANCE, fixed_now()).is_err());
    }

    #[test]
    fn test_future_timestamp_outside_tolerance_fails() {
        assert!(validate_timestamp(&body_at("2024-03-01T12:05:00Z"), DEFAULT_TOLERANCE, fixed_now()).is_err());
        assert!(validate_timestamp(&body_at("2024-03-01T12:02:00+00:00"), DEFAULT_TOLERANCE, fixed_now()).is_ok());
    }

    #[test]
    fn test_missing_or_malformed_timestamp_fails() {
        assert!(validate_timestamp(&json!({"request": {}}), DEFAULT_TOLERANCE, fixed_now()).is_err());
        assert!(validate_timestamp(&json!({}), DEFAULT_TOLERANCE, fixed_now()).is_err());
        assert!(validate_timestamp(&body_at("yesterday"), DEFAULT_TOLERANCE, fixed_now()).is_err());
    }
}
