//! Lenient coercion of spreadsheet cell values.
//!
//! Sheet ranges arrive half-typed: numbers may be strings, strings may be empty while the user is
//! still typing. The helpers here follow the coercions a spreadsheet UI applies (`parseFloat` /
//! `parseInt` style prefix parsing) instead of strict typing.

use serde_json::{Number, Value};

/// A single cell as delivered by the sheet reader.
pub type Cell = Value;

/// Returns the participant identity carried by a cell, or `None` when the cell is falsy.
///
/// Non-empty strings, non-zero numbers and `true` are identities; empty strings, `0`, `false` and
/// `null` are not.
pub fn cell_identity(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let v = n.as_f64()?;
            if v == 0.0 || !v.is_finite() {
                return None;
            }
            Some(fmt_number(n))
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Parses a flow weight: a finite number `>= 0`, coerced from numbers or numeric strings.
pub fn parse_weight(cell: &Value) -> Option<f64> {
    let v = cell_f64(cell)?;
    (v.is_finite() && v >= 0.0).then_some(v)
}

/// `parseFloat`-like coercion of a cell. Booleans and nulls do not coerce.
pub fn cell_f64(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// `parseInt`-like (base 10) coercion of a cell. Numbers truncate toward zero.
pub fn cell_i64(cell: &Value) -> Option<i64> {
    match cell {
        Value::Number(n) => n.as_i64().or_else(|| {
            let v = n.as_f64()?.trunc();
            (v.is_finite() && v.abs() < 9.0e15).then_some(v as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Parses the longest leading decimal float of `s`, ignoring leading whitespace and any trailing
/// garbage (`" 12.5kg"` -> `12.5`). `Infinity` is recognised so callers can reject it explicitly.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }
    if s[pos..].starts_with("Infinity") {
        let v = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -v } else { v });
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
        if digits > 0 {
            pos = end;
        }
    }
    if digits == 0 {
        return None;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let exp_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_start {
            pos = end;
        }
    }

    s[..pos].parse::<f64>().ok()
}

/// Parses the longest leading base-10 integer of `s` (`"20px"` -> `20`, `"0.05"` -> `0`).
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }
    let digits_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == digits_start {
        return None;
    }
    s[..pos].parse::<i64>().ok()
}

fn fmt_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let v = n.as_f64().unwrap_or(0.0);
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn float_prefix_matches_spreadsheet_coercion() {
        assert_eq!(parse_float_prefix("100"), Some(100.0));
        assert_eq!(parse_float_prefix("  12.5kg"), Some(12.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("-3e2x"), Some(-300.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("x"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn int_prefix_truncates() {
        assert_eq!(parse_int_prefix("20px"), Some(20));
        assert_eq!(parse_int_prefix("0.05"), Some(0));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(cell_i64(&json!(14.9)), Some(14));
        assert_eq!(cell_i64(&json!("600")), Some(600));
    }

    #[test]
    fn identities_follow_truthiness() {
        assert_eq!(cell_identity(&json!("mars")), Some("mars".to_string()));
        assert_eq!(cell_identity(&json!("")), None);
        assert_eq!(cell_identity(&json!(0)), None);
        assert_eq!(cell_identity(&json!(42)), Some("42".to_string()));
        assert_eq!(cell_identity(&json!(3.0)), Some("3".to_string()));
        assert_eq!(cell_identity(&json!(null)), None);
        assert_eq!(cell_identity(&json!(false)), None);
    }

    #[test]
    fn weights_must_be_finite_and_non_negative() {
        assert_eq!(parse_weight(&json!(10)), Some(10.0));
        assert_eq!(parse_weight(&json!("100")), Some(100.0));
        assert_eq!(parse_weight(&json!(0)), Some(0.0));
        assert_eq!(parse_weight(&json!(-1)), None);
        assert_eq!(parse_weight(&json!("x")), None);
        assert_eq!(parse_weight(&json!("Infinity")), None);
        assert_eq!(parse_weight(&json!(true)), None);
        assert_eq!(parse_weight(&json!(null)), None);
    }
}
