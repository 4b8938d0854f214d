// ABOUTME: Per-column field descriptor: column alias, SQL type, primary-key flag, default
// ABOUTME: Defaults are a tagged literal-or-factory variant, resolved lazily at persistence time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use crate::value::SqlValue;
use std::fmt;
use std::sync::Arc;

/// Default value attached to a field.
#[derive(Clone)]
pub enum FieldDefault {
    /// A fixed value used as-is.
    Literal(SqlValue),
    /// A zero-argument factory invoked once per resolution.
    Factory(Arc<dyn Fn() -> SqlValue + Send + Sync>),
}

impl FieldDefault {
    /// Produce the effective default value.
    #[must_use]
    pub fn resolve(&self) -> SqlValue {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Metadata describing one mapped column.
///
/// Immutable after construction; one instance per declared column. The four
/// attributes are stored verbatim, no validation beyond their shape.
#[derive(Debug, Clone)]
pub struct Field {
    column_name: Option<String>,
    sql_type: String,
    primary_key: bool,
    default: Option<FieldDefault>,
}

impl Field {
    /// A field with an explicit SQL column type and nothing else set.
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            column_name: None,
            sql_type: sql_type.into(),
            primary_key: false,
            default: None,
        }
    }

    /// `varchar(100)` column.
    #[must_use]
    pub fn string() -> Self {
        Self::new("varchar(100)")
    }

    /// `boolean` column, defaults to `false`.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new("boolean").default_value(false)
    }

    /// `bigint` column, defaults to `0`.
    #[must_use]
    pub fn integer() -> Self {
        Self::new("bigint").default_value(0_i64)
    }

    /// `real` column, defaults to `0.0`.
    #[must_use]
    pub fn float() -> Self {
        Self::new("real").default_value(0.0)
    }

    /// `text` column.
    #[must_use]
    pub fn text() -> Self {
        Self::new("text")
    }

    /// Mark this field as the table's primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Set an explicit column name distinct from the declaration key.
    /// Only the UPDATE SET clause honors the alias.
    #[must_use]
    pub fn named(mut self, column: impl Into<String>) -> Self {
        self.column_name = Some(column.into());
        self
    }

    /// Attach a literal default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<SqlValue>) -> Self {
        self.default = Some(FieldDefault::Literal(value.into()));
        self
    }

    /// Attach a factory default, invoked lazily when a record is persisted
    /// without an explicit value.
    #[must_use]
    pub fn default_factory(mut self, factory: impl Fn() -> SqlValue + Send + Sync + 'static) -> Self {
        self.default = Some(FieldDefault::Factory(Arc::new(factory)));
        self
    }

    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        self.column_name.as_deref()
    }

    #[must_use]
    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    #[must_use]
    pub const fn default(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }
}

impl fmt::Display for Field {
    /// Diagnostic form: `<Field, bigint:SId>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Field, {}:{}>",
            self.sql_type,
            self.column_name.as_deref().unwrap_or("<unnamed>")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FieldDefault};
    use crate::value::SqlValue;

    #[test]
    fn typed_constructors_carry_the_expected_ddl() {
        assert_eq!(Field::string().sql_type(), "varchar(100)");
        assert_eq!(Field::boolean().sql_type(), "boolean");
        assert_eq!(Field::integer().sql_type(), "bigint");
        assert_eq!(Field::float().sql_type(), "real");
        assert_eq!(Field::text().sql_type(), "text");
        assert!(!Field::text().is_primary_key());
        assert!(Field::integer().primary_key().is_primary_key());
    }

    #[test]
    fn literal_and_factory_defaults_resolve() {
        let literal = Field::string().default_value("anon");
        assert_eq!(
            literal.default().map(FieldDefault::resolve),
            Some(SqlValue::Text("anon".into()))
        );

        let factory = Field::integer().default_factory(|| SqlValue::Integer(99));
        assert_eq!(
            factory.default().map(FieldDefault::resolve),
            Some(SqlValue::Integer(99))
        );
    }

    #[test]
    fn display_uses_the_diagnostic_form() {
        let field = Field::integer().named("SId");
        assert_eq!(field.to_string(), "<Field, bigint:SId>");
    }
}
