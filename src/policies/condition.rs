//! Comparison conditions for risk premium rules
//!
//! A condition is an operator followed by a numeric literal, e.g. `> 500` or
//! `!=3`. It is parsed once when the rule is deserialized.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance for `=` / `!=` comparisons on floats
const EQ_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }

    /// Split a leading operator off `s`, longest match first
    fn split_prefix(s: &str) -> Option<(CompareOp, &str)> {
        const OPS: [(&str, CompareOp); 7] = [
            (">=", CompareOp::Ge),
            ("<=", CompareOp::Le),
            ("==", CompareOp::Eq),
            ("!=", CompareOp::Ne),
            (">", CompareOp::Gt),
            ("<", CompareOp::Lt),
            ("=", CompareOp::Eq),
        ];
        OPS.iter()
            .find(|(sym, _)| s.starts_with(*sym))
            .map(|(sym, op)| (*op, &s[sym.len()..]))
    }
}

/// Parsed `(operator, threshold)` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Condition {
    pub op: CompareOp,
    pub threshold: f64,
}

impl Condition {
    pub fn new(op: CompareOp, threshold: f64) -> Self {
        Self { op, threshold }
    }

    /// Evaluate the condition against an attribute value
    pub fn matches(&self, value: f64) -> bool {
        match self.op {
            CompareOp::Gt => value > self.threshold,
            CompareOp::Ge => value >= self.threshold,
            CompareOp::Lt => value < self.threshold,
            CompareOp::Le => value <= self.threshold,
            CompareOp::Eq => (value - self.threshold).abs() < EQ_TOLERANCE,
            CompareOp::Ne => (value - self.threshold).abs() >= EQ_TOLERANCE,
        }
    }
}

impl FromStr for Condition {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EngineError::InvalidCondition {
            condition: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (op, rest) = CompareOp::split_prefix(trimmed)
            .ok_or_else(|| invalid("expected one of >, >=, <, <=, =, ==, !="))?;

        let literal = rest.trim();
        if literal.is_empty() {
            return Err(invalid("missing threshold"));
        }
        let threshold: f64 = literal
            .parse()
            .map_err(|_| invalid("threshold is not a number"))?;
        if !threshold.is_finite() {
            return Err(invalid("threshold must be finite"));
        }

        Ok(Condition { op, threshold })
    }
}

impl TryFrom<String> for Condition {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.symbol(), self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_operators() {
        let cases = [
            (">500", CompareOp::Gt),
            (">= 500", CompareOp::Ge),
            ("<500", CompareOp::Lt),
            ("<=500", CompareOp::Le),
            ("=500", CompareOp::Eq),
            ("== 500", CompareOp::Eq),
            ("!=500", CompareOp::Ne),
        ];
        for (text, op) in cases {
            let c: Condition = text.parse().unwrap();
            assert_eq!(c.op, op, "operator for {text}");
            assert_eq!(c.threshold, 500.0);
        }
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_decimals() {
        let c: Condition = "  >=  6.5 ".parse().unwrap();
        assert_eq!(c, Condition::new(CompareOp::Ge, 6.5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["500", "~ 5", ">", ">= abc", "", "> inf"] {
            let err = text.parse::<Condition>();
            assert!(
                matches!(err, Err(EngineError::InvalidCondition { .. })),
                "expected rejection for {text:?}"
            );
        }
    }

    #[test]
    fn test_matches() {
        let gt: Condition = ">500".parse().unwrap();
        assert!(gt.matches(500.1));
        assert!(!gt.matches(500.0));

        let ge: Condition = ">=500".parse().unwrap();
        assert!(ge.matches(500.0));

        let eq: Condition = "=7".parse().unwrap();
        assert!(eq.matches(7.0));
        assert!(!eq.matches(7.1));

        let ne: Condition = "!=7".parse().unwrap();
        assert!(ne.matches(7.1));
        assert!(!ne.matches(7.0));
    }

    #[test]
    fn test_serde_parses_once_on_load() {
        let c: Condition = serde_json::from_str("\"<= 3\"").unwrap();
        assert_eq!(c, Condition::new(CompareOp::Le, 3.0));

        let back = serde_json::to_string(&c).unwrap();
        assert_eq!(back, "\"<= 3\"");

        let bad: Result<Condition, _> = serde_json::from_str("\"about 3\"");
        assert!(bad.is_err());
    }
}
