//! Trigger conditions.
//!
//! A condition compares one value in the event payload against a literal.
//! Conditions on a trigger are combined with AND; an empty list always
//! matches. Evaluation is total: undefined paths and non-numeric values
//! simply make the comparison false.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::event::Payload;
use super::path::PayloadPath;

/// Comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOp {
    // === Identity ===
    Eq,
    Neq,

    // === Numeric ===
    Gt,
    Gte,
    Lt,
    Lte,

    /// Unrecognized operator. Never matches.
    #[serde(other)]
    Unknown,
}

/// Literal a payload value is compared against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for ConditionValue {
    fn from(v: bool) -> Self {
        ConditionValue::Bool(v)
    }
}

impl From<i64> for ConditionValue {
    fn from(v: i64) -> Self {
        ConditionValue::Number(v as f64)
    }
}

impl From<i32> for ConditionValue {
    fn from(v: i32) -> Self {
        ConditionValue::Number(f64::from(v))
    }
}

impl From<f64> for ConditionValue {
    fn from(v: f64) -> Self {
        ConditionValue::Number(v)
    }
}

impl From<&str> for ConditionValue {
    fn from(v: &str) -> Self {
        ConditionValue::Text(v.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(v: String) -> Self {
        ConditionValue::Text(v)
    }
}

/// A single payload comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub path: PayloadPath,
    pub op: ConditionOp,
    pub value: ConditionValue,
}

impl Condition {
    /// Create a condition.
    pub fn new(path: &str, op: ConditionOp, value: impl Into<ConditionValue>) -> Self {
        Self {
            path: PayloadPath::new(path),
            op,
            value: value.into(),
        }
    }

    /// `path == value`
    pub fn eq(path: &str, value: impl Into<ConditionValue>) -> Self {
        Self::new(path, ConditionOp::Eq, value)
    }

    /// `path != value`
    pub fn neq(path: &str, value: impl Into<ConditionValue>) -> Self {
        Self::new(path, ConditionOp::Neq, value)
    }

    /// `path > value`
    pub fn gt(path: &str, value: impl Into<ConditionValue>) -> Self {
        Self::new(path, ConditionOp::Gt, value)
    }

    /// `path >= value`
    pub fn gte(path: &str, value: impl Into<ConditionValue>) -> Self {
        Self::new(path, ConditionOp::Gte, value)
    }

    /// `path < value`
    pub fn lt(path: &str, value: impl Into<ConditionValue>) -> Self {
        Self::new(path, ConditionOp::Lt, value)
    }

    /// `path <= value`
    pub fn lte(path: &str, value: impl Into<ConditionValue>) -> Self {
        Self::new(path, ConditionOp::Lte, value)
    }
}

/// Evaluator for trigger conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied by a payload.
    pub fn evaluate(payload: &Payload, condition: &Condition) -> bool {
        let resolved = condition.path.resolve(payload);
        let actual = resolved.as_deref();

        match condition.op {
            ConditionOp::Eq => identical(actual, &condition.value),
            ConditionOp::Neq => !identical(actual, &condition.value),
            ConditionOp::Gt => compare(actual, &condition.value, |a, b| a > b),
            ConditionOp::Gte => compare(actual, &condition.value, |a, b| a >= b),
            ConditionOp::Lt => compare(actual, &condition.value, |a, b| a < b),
            ConditionOp::Lte => compare(actual, &condition.value, |a, b| a <= b),
            ConditionOp::Unknown => false,
        }
    }

    /// Check that every condition holds. Vacuously true when empty.
    pub fn evaluate_all(payload: &Payload, conditions: &[Condition]) -> bool {
        conditions.iter().all(|c| Self::evaluate(payload, c))
    }
}

/// Strict identity: same type and same value. Undefined, null, arrays and
/// objects are never identical to a literal.
fn identical(actual: Option<&Value>, expected: &ConditionValue) -> bool {
    match (actual, expected) {
        (Some(Value::Number(n)), ConditionValue::Number(e)) => n.as_f64() == Some(*e),
        (Some(Value::String(s)), ConditionValue::Text(e)) => s == e,
        (Some(Value::Bool(b)), ConditionValue::Bool(e)) => b == e,
        _ => false,
    }
}

/// Numeric comparison. NaN on either side makes every comparison false.
fn compare(actual: Option<&Value>, expected: &ConditionValue, cmp: fn(f64, f64) -> bool) -> bool {
    let lhs = actual.map_or(f64::NAN, value_to_number);
    let rhs = literal_to_number(expected);
    cmp(lhs, rhs)
}

fn value_to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => bool_to_number(*b),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => text_to_number(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn literal_to_number(value: &ConditionValue) -> f64 {
    match value {
        ConditionValue::Bool(b) => bool_to_number(*b),
        ConditionValue::Number(n) => *n,
        ConditionValue::Text(s) => text_to_number(s),
    }
}

fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Numeric text to number; blank text is 0, anything non-numeric is NaN.
///
/// Accepts signed decimals with optional exponent, `Infinity` forms, and
/// unsigned `0x`/`0o`/`0b` integers.
fn text_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => radix_prefixed(trimmed).unwrap_or_else(|| decimal(trimmed)),
    }
}

fn decimal(text: &str) -> f64 {
    let allowed = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if allowed {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// `0x1f`, `0o17`, `0b101`. `None` when there is no radix prefix.
fn radix_prefixed(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_eq_neq() {
        let p = payload(json!({ "zone": "board", "slot": 2, "hidden": false }));

        assert!(ConditionEvaluator::evaluate(&p, &Condition::eq("zone", "board")));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::eq("zone", "hand")));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::eq("slot", 2)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::eq("hidden", false)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::neq("zone", "hand")));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::neq("slot", 2)));
    }

    #[test]
    fn test_eq_is_type_strict() {
        let p = payload(json!({ "slot": "2", "flag": 1 }));

        assert!(!ConditionEvaluator::evaluate(&p, &Condition::eq("slot", 2)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::eq("flag", true)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::neq("slot", 2)));
    }

    #[test]
    fn test_undefined_path() {
        let p = payload(json!({}));

        assert!(!ConditionEvaluator::evaluate(&p, &Condition::eq("damage", 3)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::neq("damage", 3)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::gte("damage", 0)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::lt("damage", 100)));
    }

    #[test]
    fn test_numeric_comparisons() {
        let p = payload(json!({ "damage": 3 }));

        assert!(ConditionEvaluator::evaluate(&p, &Condition::gte("damage", 3)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::gt("damage", 3)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::gt("damage", 2.5)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::lte("damage", 3)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::lt("damage", 3)));
    }

    #[test]
    fn test_numeric_coercion() {
        let p = payload(json!({
            "text": " 4 ",
            "blank": "",
            "word": "lots",
            "yes": true,
            "nothing": null,
            "list": [1],
            "obj": { "a": 1 }
        }));

        assert!(ConditionEvaluator::evaluate(&p, &Condition::gt("text", 3)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::lte("blank", 0)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::gte("word", 0)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::lt("word", 0)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::gte("yes", 1)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::lte("nothing", 0)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::gte("list", 0)));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::gte("obj", 0)));
    }

    #[test]
    fn test_non_numeric_literal() {
        let p = payload(json!({ "damage": 3 }));
        assert!(!ConditionEvaluator::evaluate(&p, &Condition::gt("damage", "high")));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::gt("damage", "2")));
    }

    #[test]
    fn test_text_to_number() {
        assert_eq!(text_to_number("12"), 12.0);
        assert_eq!(text_to_number("-1.5e2"), -150.0);
        assert_eq!(text_to_number("Infinity"), f64::INFINITY);
        assert!(text_to_number("inf").is_nan());
        assert!(text_to_number("NaN").is_nan());
        assert!(text_to_number("1-").is_nan());
    }

    #[test]
    fn test_radix_prefixed_text() {
        assert_eq!(text_to_number("0x10"), 16.0);
        assert_eq!(text_to_number(" 0XfF "), 255.0);
        assert_eq!(text_to_number("0o17"), 15.0);
        assert_eq!(text_to_number("0b101"), 5.0);
        assert!(text_to_number("0x").is_nan());
        assert!(text_to_number("0xg1").is_nan());
        assert!(text_to_number("-0x10").is_nan());
        assert_eq!(text_to_number("010"), 10.0);
    }

    #[test]
    fn test_array_length_condition() {
        let p = payload(json!({ "targets": [1, 2, 3], "power": "0x10" }));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::gte("targets.length", 3)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::eq("targets.length", 3)));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::gt("power", 15)));
    }

    #[test]
    fn test_nested_path() {
        let p = payload(json!({ "source": { "kind": "spell", "power": 5 } }));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::eq("source.kind", "spell")));
        assert!(ConditionEvaluator::evaluate(&p, &Condition::gt("source.power", 4)));
    }

    #[test]
    fn test_evaluate_all() {
        let p = payload(json!({ "damage": 4, "kind": "fire" }));

        assert!(ConditionEvaluator::evaluate_all(&p, &[]));
        assert!(ConditionEvaluator::evaluate_all(
            &p,
            &[Condition::gte("damage", 3), Condition::eq("kind", "fire")]
        ));
        assert!(!ConditionEvaluator::evaluate_all(
            &p,
            &[Condition::gte("damage", 3), Condition::eq("kind", "ice")]
        ));
    }

    #[test]
    fn test_unknown_operator() {
        let raw = json!({ "path": "damage", "op": "between", "value": 3 });
        let condition: Condition = serde_json::from_value(raw).unwrap();
        assert_eq!(condition.op, ConditionOp::Unknown);

        let p = payload(json!({ "damage": 3 }));
        assert!(!ConditionEvaluator::evaluate(&p, &condition));
    }

    #[test]
    fn test_condition_wire_format() {
        let condition: Condition =
            serde_json::from_value(json!({ "path": "a.b", "op": "gte", "value": 3 })).unwrap();
        assert_eq!(condition, Condition::gte("a.b", 3));

        let flag: Condition =
            serde_json::from_value(json!({ "path": "x", "op": "eq", "value": true })).unwrap();
        assert_eq!(flag.value, ConditionValue::Bool(true));
    }
}
