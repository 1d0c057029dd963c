//! Helpers for reading scene overrides out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key or
//! a value of the wrong type yields the default, so overrides never fail here;
//! range checks happen later when the scene is validated.

use serde_json::Value;

/// Reads `params[name]` as `f64`; integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer.
///
/// Floats, negatives and strings fall back to `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads `params[name]` as a two-element numeric array such as `[0.5, 0.25]`.
pub fn param_point(params: &Value, name: &str, default: [f64; 2]) -> [f64; 2] {
    match params.get(name).and_then(Value::as_array).map(Vec::as_slice) {
        Some([x, y]) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => [x, y],
            _ => default,
        },
        _ => default,
    }
}
