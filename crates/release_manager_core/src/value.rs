//! Dynamically typed values.
//!
//! Free-form fields (`metadata`, configuration values, drift expectations) carry
//! values whose type is only known at runtime. They are modelled as an explicit
//! enum rather than an opaque blob so consumers can match on the variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Free-form key/value metadata attached to environments and releases.
pub type Metadata = BTreeMap<String, DynamicValue>;

/// A value whose type is carried alongside the data.
///
/// Serializes to the plain JSON equivalent (`"a"`, `1`, `true`, `{..}`, `[..]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicValue {
    /// Null / absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value, integer or floating point
    Number(serde_json::Number),
    /// String value
    String(String),
    /// Ordered list of values
    Array(Vec<DynamicValue>),
    /// Structured object
    Object(BTreeMap<String, DynamicValue>),
}

impl DynamicValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            DynamicValue::Null => "null",
            DynamicValue::Bool(_) => "boolean",
            DynamicValue::Number(_) => "number",
            DynamicValue::String(_) => "string",
            DynamicValue::Array(_) => "array",
            DynamicValue::Object(_) => "object",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DynamicValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Compares two values by content.
    ///
    /// Numbers compare by numeric value, so `10` and `10.0` are the same.
    /// Arrays and objects compare element by element.
    pub fn same_value(&self, other: &DynamicValue) -> bool {
        match (self, other) {
            (DynamicValue::Number(_), DynamicValue::Number(_)) => self.as_f64() == other.as_f64(),
            (DynamicValue::Array(a), DynamicValue::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_value(y))
            }
            (DynamicValue::Object(a), DynamicValue::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_value(vb))
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Null => write!(f, "null"),
            DynamicValue::Bool(b) => write!(f, "{b}"),
            DynamicValue::Number(n) => write!(f, "{n}"),
            DynamicValue::String(s) => write!(f, "{s}"),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
        }
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::String(s)
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::String(s.to_string())
    }
}

impl From<i64> for DynamicValue {
    fn from(i: i64) -> Self {
        DynamicValue::Number(i.into())
    }
}

impl From<u64> for DynamicValue {
    fn from(u: u64) -> Self {
        DynamicValue::Number(u.into())
    }
}

impl From<f64> for DynamicValue {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(f: f64) -> Self {
        serde_json::Number::from_f64(f)
            .map(DynamicValue::Number)
            .unwrap_or(DynamicValue::Null)
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Bool(b)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(items: Vec<DynamicValue>) -> Self {
        DynamicValue::Array(items)
    }
}

impl From<BTreeMap<String, DynamicValue>> for DynamicValue {
    fn from(map: BTreeMap<String, DynamicValue>) -> Self {
        DynamicValue::Object(map)
    }
}

impl From<serde_json::Value> for DynamicValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DynamicValue::Null,
            serde_json::Value::Bool(b) => DynamicValue::Bool(b),
            serde_json::Value::Number(n) => DynamicValue::Number(n),
            serde_json::Value::String(s) => DynamicValue::String(s),
            serde_json::Value::Array(items) => {
                DynamicValue::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => {
                DynamicValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<DynamicValue> for serde_json::Value {
    fn from(value: DynamicValue) -> Self {
        match value {
            DynamicValue::Null => serde_json::Value::Null,
            DynamicValue::Bool(b) => serde_json::Value::Bool(b),
            DynamicValue::Number(n) => serde_json::Value::Number(n),
            DynamicValue::String(s) => serde_json::Value::String(s),
            DynamicValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            DynamicValue::Object(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
