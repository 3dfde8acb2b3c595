use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("valid numeric pattern"));

static INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").expect("valid int pattern"));

/// String form a rule sees: missing and null are empty.
pub fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_numeric(s.trim()) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts `true`, `false`, `1` and `0`, as JSON values or strings.
pub fn parse_bool(value: Option<&Value>) -> Option<bool> {
    match coerce_string(value).as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub(super) fn is_numeric(s: &str) -> bool {
    NUMERIC.is_match(s)
}

pub(super) fn is_int(s: &str) -> bool {
    INT.is_match(s)
}
