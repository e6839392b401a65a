//! JS-style total coercions and arithmetic helpers shared by operator
//! callbacks.

use crate::error::EvalError;
use crate::value::ExprValue;
use serde_json::Value;

/// Converts a value to a number. Inputs with no numeric reading coerce
/// to 0.
pub fn num(value: &ExprValue) -> f64 {
    let n = match value {
        ExprValue::Color(_) => f64::NAN,
        ExprValue::Json(v) => match v {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::Array(_) | Value::Object(_) => f64::NAN,
        },
    };
    if n.is_nan() {
        0.0
    } else {
        n
    }
}

/// Converts a value to its default string form.
pub fn str_coerce(value: &ExprValue) -> String {
    match value {
        ExprValue::Color(c) => {
            let [r, g, b, a] = c.0;
            format!(
                "rgba({},{},{},{})",
                (r * 255.0).round(),
                (g * 255.0).round(),
                (b * 255.0).round(),
                a
            )
        }
        ExprValue::Json(v) => match v {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            // Containers render as JSON.
            _ => v.to_string(),
        },
    }
}

/// The string form used by `concat`: null renders as the empty string,
/// numbers in their default decimal form, booleans as `true`/`false`.
pub fn concat_str(value: &ExprValue) -> String {
    match value {
        ExprValue::Json(Value::Null) => String::new(),
        other => str_coerce(other),
    }
}

/// JS-style truthiness.
pub fn truthy(value: &ExprValue) -> bool {
    match value {
        ExprValue::Color(_) => true,
        ExprValue::Json(v) => match v {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        },
    }
}

/// Clamps a non-finite arithmetic result to 0, so `Number`-typed
/// operators always produce an actual JSON number.
pub fn finite(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Division. A zero divisor is an evaluation error; a non-finite result
/// clamps to 0.
pub fn slash(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(EvalError::new("Division by zero"));
    }
    Ok(finite(a / b))
}

/// Remainder, with the same guards as [`slash`].
pub fn modulo(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(EvalError::new("Division by zero"));
    }
    Ok(finite(a % b))
}

/// Converts a float to a JSON number; non-finite values map to null.
pub fn f64_to_json(n: f64) -> Value {
    match serde_json::Number::from_f64(n) {
        Some(num) => Value::Number(num),
        None => Value::Null,
    }
}

pub fn number_value(n: f64) -> ExprValue {
    ExprValue::Json(f64_to_json(n))
}

pub fn bool_value(b: bool) -> ExprValue {
    ExprValue::Json(Value::Bool(b))
}

pub fn string_value(s: String) -> ExprValue {
    ExprValue::Json(Value::String(s))
}

/// Structural value equality: numbers compare numerically regardless of
/// their JSON representation, colors componentwise, containers deeply.
pub fn deep_equal(a: &ExprValue, b: &ExprValue) -> bool {
    match (a, b) {
        (ExprValue::Color(x), ExprValue::Color(y)) => x == y,
        (ExprValue::Json(x), ExprValue::Json(y)) => json_deep_equal(x, y),
        _ => false,
    }
}

fn json_deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| json_deep_equal(v, w))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map_or(false, |w| json_deep_equal(v, w)))
        }
        _ => a == b,
    }
}

fn as_comparable(value: &ExprValue) -> Result<f64, String> {
    match value {
        ExprValue::Json(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0)),
        other => Err(str_coerce(other)),
    }
}

/// Orders two values the way `>`/`<` do: numerically when both sides are
/// numbers, lexicographically on the coerced strings otherwise.
pub fn compare(a: &ExprValue, b: &ExprValue) -> std::cmp::Ordering {
    match (as_comparable(a), as_comparable(b)) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => str_coerce(a).cmp(&str_coerce(b)),
    }
}
