use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar carried by recommended-parameter defaults and modifier values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl ParameterValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, ParameterValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(n) => write!(f, "{}", n),
            ParameterValue::Unsigned(n) => write!(f, "{}", n),
            ParameterValue::Float(x) => write!(f, "{}", x),
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(n: i64) -> Self {
        ParameterValue::Integer(n)
    }
}

impl From<&str> for ParameterValue {
    fn from(s: &str) -> Self {
        ParameterValue::Text(s.to_string())
    }
}
