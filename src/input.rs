//! Loose numeric fields: clients send numbers either as JSON numbers or as
//! strings typed into a form.

use serde_json::Value;

use crate::error::ApiError;

/// Whole count; absent or `null` reads as 0, fractions are truncated.
pub fn count(body: &Value, field: &str) -> Result<i64, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| not_numeric(field)),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| not_numeric(field)),
        Some(_) => Err(not_numeric(field)),
    }
}

/// Required non-negative decimal.
pub fn amount(body: &Value, field: &str) -> Result<f64, ApiError> {
    let value = match body.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| not_numeric(field))
}

fn not_numeric(field: &str) -> ApiError {
    ApiError::invalid(format!("Invalid input! '{field}' must be a numeric value."))
}
