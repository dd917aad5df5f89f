//! Structural validation of decoded response bodies.
//!
//! # Design
//! The client returns the create envelope as raw JSON; callers assert its
//! shape here before reading fields. Validation is purely structural: every
//! required field present and of the right primitive type, dates parsing as
//! `YYYY-MM-DD`. Business rules (date ordering, price positivity) are not
//! checked — the reference API does not enforce them either, so they stay
//! test-level assertions.

use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;

/// A single shape mismatch: which field failed and what was expected there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    pub field: String,
    pub expected: &'static str,
    pub found: String,
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field `{}`: expected {}, found {}",
            self.field, self.expected, self.found
        )
    }
}

impl std::error::Error for ContractError {}

/// Validate a bare booking object.
pub fn validate_booking(value: &Value) -> Result<(), ContractError> {
    booking_shape(value, "")
}

/// Validate a checkin/checkout pair on its own.
pub fn validate_booking_dates(value: &Value) -> Result<(), ContractError> {
    dates_shape(value, "")
}

/// Validate a create-response envelope: integer `bookingid` plus a nested
/// booking object.
pub fn validate_booking_response(value: &Value) -> Result<(), ContractError> {
    expect_integer(value, "bookingid", "bookingid")?;
    let booking = expect_object(value, "booking", "booking")?;
    booking_shape(booking, "booking.")
}

fn booking_shape(value: &Value, prefix: &str) -> Result<(), ContractError> {
    expect_string(value, "firstname", &format!("{prefix}firstname"))?;
    expect_string(value, "lastname", &format!("{prefix}lastname"))?;
    expect_integer(value, "totalprice", &format!("{prefix}totalprice"))?;
    expect_boolean(value, "depositpaid", &format!("{prefix}depositpaid"))?;
    let dates = expect_object(value, "bookingdates", &format!("{prefix}bookingdates"))?;
    dates_shape(dates, &format!("{prefix}bookingdates."))?;

    // Optional: absence is fine, but a present value must be a string
    // (null is tolerated, the API serializes cleared fields that way).
    if let Some(needs) = value.get("additionalneeds") {
        if !needs.is_string() && !needs.is_null() {
            return Err(mismatch(
                &format!("{prefix}additionalneeds"),
                "string",
                needs,
            ));
        }
    }
    Ok(())
}

fn dates_shape(value: &Value, prefix: &str) -> Result<(), ContractError> {
    expect_date(value, "checkin", &format!("{prefix}checkin"))?;
    expect_date(value, "checkout", &format!("{prefix}checkout"))?;
    Ok(())
}

fn mismatch(label: &str, expected: &'static str, found: &Value) -> ContractError {
    ContractError {
        field: label.to_string(),
        expected,
        found: type_name(found).to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn field<'a>(value: &'a Value, key: &str, label: &str) -> Result<&'a Value, ContractError> {
    value.get(key).ok_or_else(|| ContractError {
        field: label.to_string(),
        expected: "present",
        found: "missing".to_string(),
    })
}

fn expect_string<'a>(value: &'a Value, key: &str, label: &str) -> Result<&'a str, ContractError> {
    let v = field(value, key, label)?;
    v.as_str().ok_or_else(|| mismatch(label, "string", v))
}

fn expect_integer(value: &Value, key: &str, label: &str) -> Result<i64, ContractError> {
    let v = field(value, key, label)?;
    v.as_i64().ok_or_else(|| mismatch(label, "integer", v))
}

fn expect_boolean(value: &Value, key: &str, label: &str) -> Result<bool, ContractError> {
    let v = field(value, key, label)?;
    v.as_bool().ok_or_else(|| mismatch(label, "boolean", v))
}

fn expect_object<'a>(value: &'a Value, key: &str, label: &str) -> Result<&'a Value, ContractError> {
    let v = field(value, key, label)?;
    if v.is_object() {
        Ok(v)
    } else {
        Err(mismatch(label, "object", v))
    }
}

fn expect_date(value: &Value, key: &str, label: &str) -> Result<NaiveDate, ContractError> {
    let s = expect_string(value, key, label)?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ContractError {
        field: label.to_string(),
        expected: "date (YYYY-MM-DD)",
        found: format!("\"{s}\""),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_booking() -> Value {
        json!({
            "firstname": "Jim",
            "lastname": "Brown",
            "totalprice": 111,
            "depositpaid": true,
            "bookingdates": {"checkin": "2025-02-01", "checkout": "2025-02-10"},
            "additionalneeds": "Breakfast"
        })
    }

    #[test]
    fn accepts_valid_booking() {
        assert!(validate_booking(&valid_booking()).is_ok());
    }

    #[test]
    fn accepts_booking_without_additionalneeds() {
        let mut booking = valid_booking();
        booking.as_object_mut().unwrap().remove("additionalneeds");
        assert!(validate_booking(&booking).is_ok());
    }

    #[test]
    fn accepts_null_additionalneeds() {
        let mut booking = valid_booking();
        booking["additionalneeds"] = Value::Null;
        assert!(validate_booking(&booking).is_ok());
    }

    #[test]
    fn rejects_numeric_additionalneeds() {
        let mut booking = valid_booking();
        booking["additionalneeds"] = json!(5);
        let err = validate_booking(&booking).unwrap_err();
        assert_eq!(err.field, "additionalneeds");
        assert_eq!(err.expected, "string");
    }

    #[test]
    fn reports_missing_firstname() {
        let mut booking = valid_booking();
        booking.as_object_mut().unwrap().remove("firstname");
        let err = validate_booking(&booking).unwrap_err();
        assert_eq!(err.field, "firstname");
        assert_eq!(err.found, "missing");
    }

    #[test]
    fn reports_totalprice_type_mismatch() {
        let mut booking = valid_booking();
        booking["totalprice"] = json!("111");
        let err = validate_booking(&booking).unwrap_err();
        assert_eq!(err.field, "totalprice");
        assert_eq!(err.expected, "integer");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn reports_fractional_totalprice_as_mismatch() {
        let mut booking = valid_booking();
        booking["totalprice"] = json!(111.5);
        let err = validate_booking(&booking).unwrap_err();
        assert_eq!(err.field, "totalprice");
        assert_eq!(err.expected, "integer");
    }

    #[test]
    fn reports_unparseable_checkin_with_nested_path() {
        let mut booking = valid_booking();
        booking["bookingdates"]["checkin"] = json!("01/02/2025");
        let err = validate_booking(&booking).unwrap_err();
        assert_eq!(err.field, "bookingdates.checkin");
        assert_eq!(err.expected, "date (YYYY-MM-DD)");
    }

    #[test]
    fn rejects_non_object_bookingdates() {
        let mut booking = valid_booking();
        booking["bookingdates"] = json!("2025-02-01");
        let err = validate_booking(&booking).unwrap_err();
        assert_eq!(err.field, "bookingdates");
        assert_eq!(err.expected, "object");
    }

    #[test]
    fn validates_dates_pair_standalone() {
        let ok = json!({"checkin": "2025-02-01", "checkout": "2025-02-10"});
        assert!(validate_booking_dates(&ok).is_ok());
        let bad = json!({"checkin": "2025-02-01"});
        let err = validate_booking_dates(&bad).unwrap_err();
        assert_eq!(err.field, "checkout");
        assert_eq!(err.found, "missing");
    }

    // Date ordering is deliberately not a contract concern.
    #[test]
    fn does_not_enforce_checkin_before_checkout() {
        let reversed = json!({"checkin": "2025-02-10", "checkout": "2025-02-01"});
        assert!(validate_booking_dates(&reversed).is_ok());
    }

    #[test]
    fn accepts_valid_envelope() {
        let envelope = json!({"bookingid": 7, "booking": valid_booking()});
        assert!(validate_booking_response(&envelope).is_ok());
    }

    #[test]
    fn reports_missing_bookingid() {
        let envelope = json!({"booking": valid_booking()});
        let err = validate_booking_response(&envelope).unwrap_err();
        assert_eq!(err.field, "bookingid");
        assert_eq!(err.found, "missing");
    }

    #[test]
    fn reports_nested_field_with_full_path() {
        let mut envelope = json!({"bookingid": 7, "booking": valid_booking()});
        envelope["booking"]["depositpaid"] = json!("yes");
        let err = validate_booking_response(&envelope).unwrap_err();
        assert_eq!(err.field, "booking.depositpaid");
        assert_eq!(err.expected, "boolean");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn display_names_field_and_types() {
        let err = ContractError {
            field: "totalprice".to_string(),
            expected: "integer",
            found: "string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field `totalprice`: expected integer, found string"
        );
    }
}
