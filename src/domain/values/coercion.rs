//! Safe conversion of raw cells into finite outputs.
//!
//! Two defaulting paths exist and are kept apart:
//!
//! - fixed-schema records ([`SummaryRecord`], [`DetailRecord`]) use
//!   [`safe_float`] / [`safe_int`] / [`safe_string`] and fall back to a
//!   caller-supplied default (`0`, `""`);
//! - ranked-list objects use [`ranked_value`] and fall back to `null`, so
//!   consumers can tell "unknown" apart from "zero".
//!
//! None of these functions panic for any [`Cell`].
//!
//! [`SummaryRecord`]: crate::domain::entities::records::SummaryRecord
//! [`DetailRecord`]: crate::domain::entities::records::DetailRecord

use serde::{Serialize, Serializer};

use crate::domain::entities::stock_table::Cell;

/// Finite float or `default`. Numeric-looking text is parsed best-effort.
pub fn safe_float(value: Option<&Cell>, default: f64) -> f64 {
    match value {
        Some(Cell::Int(v)) => *v as f64,
        Some(Cell::Float(v)) if v.is_finite() => *v,
        Some(Cell::Text(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(default),
        _ => default,
    }
}

/// Integer or `default`. Floats truncate toward zero and saturate at the
/// `i64` bounds.
pub fn safe_int(value: Option<&Cell>, default: i64) -> i64 {
    match value {
        Some(Cell::Int(v)) => *v,
        Some(Cell::Float(v)) if v.is_finite() => *v as i64,
        Some(Cell::Text(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .map(|v| v as i64)
                })
                .unwrap_or(default)
        }
        _ => default,
    }
}

/// String rendering or `default` when the value is missing.
pub fn safe_string(value: Option<&Cell>, default: &str) -> String {
    match value {
        None | Some(Cell::Null) => default.to_string(),
        Some(Cell::Float(v)) if v.is_nan() => default.to_string(),
        Some(Cell::Int(v)) => v.to_string(),
        Some(Cell::Float(v)) => v.to_string(),
        Some(Cell::Text(s)) => s.clone(),
    }
}

/// A value inside a ranked-list object.
#[derive(Debug, Clone, PartialEq)]
pub enum RankedValue {
    Number(f64),
    Text(String),
    Null,
}

impl RankedValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RankedValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RankedValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for RankedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RankedValue::Number(v) => serializer.serialize_f64(*v),
            RankedValue::Text(s) => serializer.serialize_str(s),
            RankedValue::Null => serializer.serialize_none(),
        }
    }
}

/// Ranked-list coercion: numbers stay numbers, non-finite and missing
/// become `Null`, text passes through.
pub fn ranked_value(value: Option<&Cell>) -> RankedValue {
    match value {
        Some(Cell::Int(v)) => RankedValue::Number(*v as f64),
        Some(Cell::Float(v)) if v.is_finite() => RankedValue::Number(*v),
        Some(Cell::Text(s)) => RankedValue::Text(s.clone()),
        _ => RankedValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_float_defaults() {
        assert_eq!(safe_float(None, 0.0), 0.0);
        assert_eq!(safe_float(Some(&Cell::Null), 1.5), 1.5);
        assert_eq!(safe_float(Some(&Cell::Float(f64::NAN)), 0.0), 0.0);
        assert_eq!(safe_float(Some(&Cell::Float(f64::NEG_INFINITY)), 0.0), 0.0);
        assert_eq!(safe_float(Some(&Cell::Float(2.5)), 0.0), 2.5);
        assert_eq!(safe_float(Some(&Cell::Int(7)), 0.0), 7.0);
    }

    #[test]
    fn test_safe_float_text_is_best_effort() {
        assert_eq!(safe_float(Some(&Cell::Text(" 12.5 ".into())), 0.0), 12.5);
        assert_eq!(safe_float(Some(&Cell::Text("n/a".into())), 0.0), 0.0);
        assert_eq!(safe_float(Some(&Cell::Text("inf".into())), -1.0), -1.0);
    }

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int(Some(&Cell::Float(1_500_000.9)), 0), 1_500_000);
        assert_eq!(safe_int(Some(&Cell::Float(-2.7)), 0), -2);
        assert_eq!(safe_int(Some(&Cell::Float(f64::INFINITY)), 0), 0);
        assert_eq!(safe_int(Some(&Cell::Text("950000".into())), 0), 950_000);
        assert_eq!(safe_int(Some(&Cell::Text("9.5e5".into())), 0), 950_000);
        assert_eq!(safe_int(None, 3), 3);
    }

    #[test]
    fn test_safe_string() {
        assert_eq!(safe_string(None, "EGX"), "EGX");
        assert_eq!(safe_string(Some(&Cell::Null), ""), "");
        assert_eq!(safe_string(Some(&Cell::Float(f64::NAN)), ""), "");
        assert_eq!(safe_string(Some(&Cell::Float(45.5)), ""), "45.5");
        assert_eq!(safe_string(Some(&Cell::Int(3)), ""), "3");
        assert_eq!(safe_string(Some(&Cell::Text("COMI".into())), ""), "COMI");
    }

    #[test]
    fn test_ranked_value_uses_null_not_zero() {
        assert_eq!(ranked_value(None), RankedValue::Null);
        assert_eq!(ranked_value(Some(&Cell::Float(f64::NAN))), RankedValue::Null);
        assert_eq!(ranked_value(Some(&Cell::Int(4))), RankedValue::Number(4.0));
        assert_eq!(
            serde_json::to_string(&ranked_value(Some(&Cell::Float(f64::INFINITY)))).unwrap(),
            "null"
        );
    }
}
