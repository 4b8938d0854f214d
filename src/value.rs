// ABOUTME: Dynamic scalar value crossing the mapping boundary in both directions
// ABOUTME: Bound as a statement parameter going in, decoded from result rows coming out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use serde::Serialize;
use std::fmt;

/// A scalar value the mapping layer understands.
///
/// Covers the column types the field set supports: string, boolean, integer,
/// float, and text columns all surface as one of these variants. Serializes as
/// the plain JSON scalar so callers can hand row mappings straight to a
/// response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::SqlValue;

    #[test]
    fn conversions_cover_the_supported_scalar_set() {
        assert_eq!(SqlValue::from(true), SqlValue::Boolean(true));
        assert_eq!(SqlValue::from(42_i64), SqlValue::Integer(42));
        assert_eq!(SqlValue::from(1.5), SqlValue::Float(1.5));
        assert_eq!(SqlValue::from("abc"), SqlValue::Text("abc".into()));
        assert_eq!(SqlValue::from(Option::<i64>::None), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".into()));
    }

    #[test]
    fn serializes_as_plain_json_scalars() {
        assert_eq!(serde_json::to_value(SqlValue::Null).unwrap(), serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(SqlValue::Integer(7)).unwrap(),
            serde_json::json!(7)
        );
        assert_eq!(
            serde_json::to_value(SqlValue::Text("hi".into())).unwrap(),
            serde_json::json!("hi")
        );
    }
}
