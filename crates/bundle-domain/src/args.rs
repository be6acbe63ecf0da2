use bundle_object::{CallError, Result};
use serde_json::Value;

/// Read a finite number argument.
pub(crate) fn number(method: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CallError::invalid_argument(method, format!("expected a number, got {value}")))
}

/// Read a strictly positive amount.
pub(crate) fn positive_amount(method: &str, value: &Value) -> Result<f64> {
    let amount = number(method, value)?;
    if amount <= 0.0 {
        return Err(CallError::invalid_argument(
            method,
            format!("amount must be positive, got {amount}"),
        ));
    }
    Ok(amount)
}

/// Read an integer argument.
pub(crate) fn integer(method: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| CallError::invalid_argument(method, format!("expected an integer, got {value}")))
}

/// Read a non-empty string argument.
pub(crate) fn text(method: &str, value: &Value) -> Result<String> {
    match value.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(CallError::invalid_argument(
            method,
            format!("expected a non-empty string, got {value}"),
        )),
    }
}
