use crate::cell::{cell_f64, cell_i64};
use indexmap::IndexMap;
use serde_json::Value;

/// Control key -> current value, in panel order.
pub type ControlValues = IndexMap<String, Value>;

pub fn control_str<'a>(values: &'a ControlValues, key: &str) -> &'a str {
    values.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// `parseFloat` reading of a control; unparseable values read as `0`.
pub fn control_f64(values: &ControlValues, key: &str) -> f64 {
    values
        .get(key)
        .and_then(cell_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `parseInt` reading of a control; unparseable values read as `0`.
pub fn control_i64(values: &ControlValues, key: &str) -> i64 {
    values.get(key).and_then(cell_i64).unwrap_or(0)
}

pub fn control_bool(values: &ControlValues, key: &str) -> bool {
    match values.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim(), "true" | "on" | "1"),
        _ => false,
    }
}
