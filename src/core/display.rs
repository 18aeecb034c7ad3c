//! Value display and lenient number parsing
//!
//! Server payloads are loosely typed (amounts come back as numbers or strings).
//! Fields show them the way a text node would.

use serde_json::Value;

/// Render a JSON value as field text. `null` renders empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f.fract() == 0.0 && f.abs() < 1e15 { format!("{:.0}", f) } else { f.to_string() }
            }
        }
        other => other.to_string(),
    }
}

/// Parse the longest numeric prefix of `input`, skipping leading whitespace.
///
/// `"12.5abc"` is 12.5, `"abc"` is `None`, `"-Infinity"` is negative infinity.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let b = s.as_bytes();
    let mut i = 0;

    let negative = matches!(b.first(), Some(b'-'));
    if matches!(b.first(), Some(b'-') | Some(b'+')) {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < b.len() && b[i] == b'.' {
        let mut j = i + 1;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - (i + 1);
        if frac_digits > 0 {
            i = j;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse::<f64>().ok()
}
