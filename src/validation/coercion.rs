//! Value stringification, truthiness and final type coercion.
//!
//! Request values arrive as JSON. Predicates run on a string rendering of the
//! value that follows the usual web-framework string coercion, and validated
//! values are coerced according to the chain's type rule.

use crate::domain::TypeHint;
use serde_json::{Number, Value};

/// Magnitude from which numbers render with an exponent.
const EXPONENT_FROM: f64 = 1e21;

/// Smallest magnitude that still renders in fixed notation.
const FIXED_FROM: f64 = 1e-6;

/// Renders a value the way predicates see it.
///
/// Strings are returned verbatim, numbers in their shortest form (with an
/// exponent below `1e-6` and from `1e21` upwards, as in `"1e+21"`), booleans
/// and `null` by name, arrays as comma-joined elements (with `null` elements
/// rendered empty) and objects as `[object Object]`.
///
/// # Examples
///
/// ```
/// use paramguard::validation::stringify;
/// use serde_json::json;
///
/// assert_eq!(stringify(&json!("17")), "17");
/// assert_eq!(stringify(&json!(1.0)), "1");
/// assert_eq!(stringify(&json!([1, null, "a"])), "1,,a");
/// assert_eq!(stringify(&json!({ "a": 1 })), "[object Object]");
/// ```
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => stringify_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                if item.is_null() {
                    String::new()
                } else {
                    stringify(item)
                }
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn stringify_number(number: &Number) -> String {
    number
        .as_i64()
        .map(|int| int.to_string())
        .or_else(|| number.as_u64().map(|int| int.to_string()))
        .or_else(|| number.as_f64().map(stringify_float))
        .unwrap_or_else(|| number.to_string())
}

fn stringify_float(float: f64) -> String {
    let magnitude = float.abs();
    if magnitude == 0.0 {
        return "0".to_owned();
    }
    if (FIXED_FROM..EXPONENT_FROM).contains(&magnitude) {
        return float.to_string();
    }
    let formatted = format!("{float:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Returns the truthiness of a value.
///
/// `null`, `false`, zero and the empty string are falsy; every other value,
/// including empty arrays and objects, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|float| float != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Applies the chain's final coercion to a validated raw value.
///
/// Without a type hint the raw value passes through unchanged. Numeric
/// parsing reads the longest numeric prefix of the stringified value; when
/// nothing numeric can be read the raw value is kept.
#[must_use]
pub fn coerce(raw: &Value, hint: Option<TypeHint>) -> Value {
    match hint {
        Some(TypeHint::Int) => parse_int(&stringify(raw)).unwrap_or_else(|| raw.clone()),
        Some(TypeHint::Float) => parse_float(&stringify(raw)).unwrap_or_else(|| raw.clone()),
        Some(TypeHint::Boolean) => Value::Bool(is_truthy(raw)),
        None => raw.clone(),
    }
}

fn split_sign(text: &str) -> (&str, &str) {
    let trimmed = text.trim_start();
    if let Some(rest) = trimmed.strip_prefix('-') {
        ("-", rest)
    } else {
        ("", trimmed.strip_prefix('+').unwrap_or(trimmed))
    }
}

fn parse_int(text: &str) -> Option<Value> {
    let (sign, rest) = split_sign(text);
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let literal = format!("{sign}{digits}");
    literal.parse::<i64>().map(Value::from).ok().or_else(|| {
        literal
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    })
}

fn parse_float(text: &str) -> Option<Value> {
    let (sign, rest) = split_sign(text);
    let literal = format!("{sign}{}", float_prefix(rest));
    literal
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Longest prefix of `text` shaped like `digits[.digits][e[+-]digits]`.
fn float_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .iter()
            .skip(start)
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let integral = digits_from(0);
    let mut end = integral;
    if bytes.get(end) == Some(&b'.') {
        end += 1 + digits_from(end + 1);
    }
    if end == 0 || (end == 1 && integral == 0) {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign_len = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign_len);
        if exponent > 0 {
            end += 1 + sign_len + exponent;
        }
    }
    text.get(..end).unwrap_or_default()
}
