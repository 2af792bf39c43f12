//! Inbound field-map validation and normalization.
//!
//! Operations receive their input as a plain JSON object (the HTTP layer is
//! out of scope). [`FieldMap`] applies the presence rules the existing
//! ledgers were built on: a required field is missing when the key is
//! absent, null, or a blank string - the literal number `0` and the literal
//! string `"0.00%"` count as present. This is intentional, not an oversight.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::RequestError;
use crate::policy::{MoneyPolicy, VatPolicy};
use crate::request::types::PaymentStatus;

/// A normalized view over an inbound JSON object.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    values: Map<String, Value>,
}

impl From<Map<String, Value>> for FieldMap {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl FieldMap {
    /// Wraps a JSON value, which must be an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }

    fn get(&self, field: &str) -> Option<&Value> {
        match self.values.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }

    /// Returns a required, trimmed text field.
    ///
    /// # Errors
    ///
    /// [`RequestError::MissingField`] when absent or blank.
    pub fn required_text(&self, field: &str) -> Result<String, RequestError> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(s.trim().to_string()),
            Some(other) => Ok(other.to_string()),
            None => Err(RequestError::MissingField(field.to_string())),
        }
    }

    /// Returns an optional trimmed text field, empty when absent.
    #[must_use]
    pub fn optional_text(&self, field: &str) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Returns a required monetary field, rounded to 2 decimal places.
    ///
    /// Accepts JSON numbers and numeric strings. The literal `0` is present.
    ///
    /// # Errors
    ///
    /// [`RequestError::MissingField`] when absent,
    /// [`RequestError::InvalidAmount`] when non-numeric or negative.
    pub fn required_amount(&self, field: &str) -> Result<Decimal, RequestError> {
        let value = self
            .get(field)
            .ok_or_else(|| RequestError::MissingField(field.to_string()))?;
        let amount = MoneyPolicy::round(parse_decimal(field, value)?);
        if amount < Decimal::ZERO {
            return Err(RequestError::InvalidAmount {
                field: field.to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        Ok(amount)
    }

    /// Returns an optional monetary field, `0.00` when absent.
    ///
    /// # Errors
    ///
    /// [`RequestError::InvalidAmount`] when present but non-numeric or
    /// negative.
    pub fn optional_amount(&self, field: &str) -> Result<Decimal, RequestError> {
        if self.get(field).is_none() {
            return Ok(Decimal::ZERO);
        }
        self.required_amount(field)
    }

    /// Returns a required percentage in `[0, 100]`, rounded to 2 places.
    ///
    /// # Errors
    ///
    /// [`RequestError::MissingField`] when absent,
    /// [`RequestError::InvalidAmount`] when non-numeric or out of range.
    pub fn required_percentage(&self, field: &str) -> Result<Decimal, RequestError> {
        let value = self
            .get(field)
            .ok_or_else(|| RequestError::MissingField(field.to_string()))?;
        let percentage = MoneyPolicy::round(parse_decimal(field, value)?);
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(RequestError::InvalidAmount {
                field: field.to_string(),
                reason: "must be between 0 and 100".to_string(),
            });
        }
        Ok(percentage)
    }

    /// Returns a required `YYYY-MM-DD` date field.
    ///
    /// # Errors
    ///
    /// [`RequestError::MissingField`] when absent,
    /// [`RequestError::InvalidDate`] when unparseable.
    pub fn required_date(&self, field: &str) -> Result<NaiveDate, RequestError> {
        let raw = self.required_text(field)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| RequestError::InvalidDate {
            field: field.to_string(),
            value: raw,
        })
    }

    /// Returns the required `vat_policy` field as a parsed code.
    ///
    /// The literal `"0.00%"` counts as present.
    ///
    /// # Errors
    ///
    /// [`RequestError::MissingField`] when absent,
    /// [`RequestError::InvalidPolicyCode`] for unrecognized codes.
    pub fn vat_policy(&self) -> Result<VatPolicy, RequestError> {
        let raw = self.required_text("vat_policy")?;
        VatPolicy::parse(&raw)
    }

    /// Returns the optional `payment_status` field, `Pending` when absent.
    ///
    /// Creation accepts a caller-supplied initial status - including `Paid`.
    ///
    /// # Errors
    ///
    /// [`RequestError::InvalidStatus`] when present but outside the valid
    /// states.
    pub fn payment_status(&self) -> Result<PaymentStatus, RequestError> {
        match self.get("payment_status") {
            None => Ok(PaymentStatus::default()),
            Some(Value::String(s)) => PaymentStatus::parse(s.trim()),
            Some(other) => Err(RequestError::InvalidStatus(other.to_string())),
        }
    }
}

fn parse_decimal(field: &str, value: &Value) -> Result<Decimal, RequestError> {
    let parsed = match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    parsed.ok_or_else(|| RequestError::InvalidAmount {
        field: field.to_string(),
        reason: "not a number".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        FieldMap::from_value(value).expect("test input must be an object")
    }

    #[test]
    fn test_missing_and_blank_are_absent() {
        let map = fields(json!({"a": "", "b": "   ", "c": null}));
        assert!(map.required_text("a").is_err());
        assert!(map.required_text("b").is_err());
        assert!(map.required_text("c").is_err());
        assert!(map.required_text("d").is_err());
    }

    #[test]
    fn test_zero_and_exempt_code_are_present() {
        // The literal 0 and the literal "0.00%" are present, not missing.
        let map = fields(json!({"discount": 0, "vat_policy": "0.00%"}));
        assert_eq!(map.required_amount("discount").unwrap(), dec!(0));
        assert_eq!(map.vat_policy().unwrap(), VatPolicy::Exempt);
    }

    #[test]
    fn test_text_is_trimmed() {
        let map = fields(json!({"supplier_name": "  Acme Ltd  "}));
        assert_eq!(map.required_text("supplier_name").unwrap(), "Acme Ltd");
    }

    #[test]
    fn test_amount_from_number_and_string() {
        let map = fields(json!({"a": 1000.255, "b": "99.90"}));
        assert_eq!(map.required_amount("a").unwrap(), dec!(1000.26));
        assert_eq!(map.required_amount("b").unwrap(), dec!(99.90));
    }

    #[test]
    fn test_amount_rejects_garbage_and_negatives() {
        let map = fields(json!({"a": "ten", "b": -5}));
        assert!(matches!(
            map.required_amount("a").unwrap_err(),
            RequestError::InvalidAmount { .. }
        ));
        assert!(matches!(
            map.required_amount("b").unwrap_err(),
            RequestError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_optional_amount_defaults_to_zero() {
        let map = fields(json!({}));
        assert_eq!(map.optional_amount("other_charges").unwrap(), dec!(0));
    }

    #[test]
    fn test_percentage_bounds() {
        let map = fields(json!({"p": 100, "q": 100.5, "r": -1}));
        assert_eq!(map.required_percentage("p").unwrap(), dec!(100));
        assert!(map.required_percentage("q").is_err());
        assert!(map.required_percentage("r").is_err());
    }

    #[test]
    fn test_date_parsing() {
        let map = fields(json!({"ok": "2026-02-03", "bad": "03/02/2026"}));
        assert_eq!(
            map.required_date("ok").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()
        );
        assert!(matches!(
            map.required_date("bad").unwrap_err(),
            RequestError::InvalidDate { .. }
        ));
    }

    #[test]
    fn test_payment_status_defaults_to_pending() {
        let map = fields(json!({}));
        assert_eq!(map.payment_status().unwrap(), PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_status_accepts_initial_paid() {
        let map = fields(json!({"payment_status": "Paid"}));
        assert_eq!(map.payment_status().unwrap(), PaymentStatus::Paid);
    }

    #[test]
    fn test_payment_status_rejects_unknown() {
        let map = fields(json!({"payment_status": "Settled"}));
        assert!(matches!(
            map.payment_status().unwrap_err(),
            RequestError::InvalidStatus(s) if s == "Settled"
        ));
    }
}
