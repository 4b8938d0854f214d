// ABOUTME: Schema compiler: one-shot translation of a declared field list into SQL templates
// ABOUTME: Enforces the exactly-one-primary-key invariant and backtick-quotes all identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use crate::errors::{Error, Result};
use crate::field::Field;
use std::collections::HashMap;
use tracing::info;

/// Compiled, immutable mapping for one table.
///
/// Holds the field metadata plus the four canonical statement templates.
/// Compiled once at startup, before first use, and shared read-only via `Arc`
/// by every record bound to the table. Values are always bound through `?`
/// placeholders, never interpolated into the template text.
#[derive(Debug, Clone)]
pub struct TableSchema {
    table_name: String,
    primary_key: String,
    fields: Vec<String>,
    mappings: HashMap<String, Field>,
    select_sql: String,
    insert_sql: String,
    update_sql: String,
    delete_sql: String,
}

/// Backtick-quote an identifier. Column names are trusted schema metadata,
/// but quoting keeps reserved words usable as column names.
fn escape(ident: &str) -> String {
    format!("`{ident}`")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

impl TableSchema {
    /// Compile a declared field list (declaration order preserved) into a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePrimaryKey`] if more than one field carries the
    /// primary-key flag, [`Error::MissingPrimaryKey`] if none does. Both are
    /// startup-fatal: a table class that fails to compile must never serve.
    pub fn compile<S, I>(table_name: &str, declared: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Field)>,
    {
        let mut mappings = HashMap::new();
        let mut fields = Vec::new();
        let mut primary_key: Option<String> = None;

        for (key, field) in declared {
            let key = key.into();
            if field.is_primary_key() {
                if primary_key.is_some() {
                    return Err(Error::DuplicatePrimaryKey { field: key });
                }
                primary_key = Some(key.clone());
            } else {
                fields.push(key.clone());
            }
            mappings.insert(key, field);
        }

        let primary_key = primary_key.ok_or_else(|| Error::MissingPrimaryKey {
            table: table_name.to_owned(),
        })?;

        let escaped_fields: Vec<String> = fields.iter().map(|f| escape(f)).collect();

        let mut select_columns = vec![escape(&primary_key)];
        select_columns.extend(escaped_fields.iter().cloned());
        let select_sql = format!(
            "select {} from {}",
            select_columns.join(", "),
            escape(table_name)
        );

        // Non-key fields first, primary key last; the executor binds insert
        // arguments in the same order.
        let mut insert_columns = escaped_fields.clone();
        insert_columns.push(escape(&primary_key));
        let insert_sql = format!(
            "insert into {} ({}) values ({})",
            escape(table_name),
            insert_columns.join(", "),
            placeholders(insert_columns.len())
        );

        // The SET clause honors a field's column alias when one is declared.
        let set_clause = fields
            .iter()
            .map(|f| {
                let column = mappings.get(f).and_then(Field::column_name).unwrap_or(f);
                format!("{}=?", escape(column))
            })
            .collect::<Vec<_>>()
            .join(", ");
        let update_sql = format!(
            "update {} set {} where {}=?",
            escape(table_name),
            set_clause,
            escape(&primary_key)
        );

        let delete_sql = format!(
            "delete from {} where {}=?",
            escape(table_name),
            escape(&primary_key)
        );

        info!(
            "compiled table mapping: {} ({} fields, primary key {})",
            table_name,
            fields.len(),
            primary_key
        );

        Ok(Self {
            table_name: table_name.to_owned(),
            primary_key,
            fields,
            mappings,
            select_sql,
            insert_sql,
            update_sql,
            delete_sql,
        })
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Declaration key of the primary-key field.
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Non-key field declaration keys, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.mappings.get(name)
    }

    #[must_use]
    pub fn select_sql(&self) -> &str {
        &self.select_sql
    }

    #[must_use]
    pub fn insert_sql(&self) -> &str {
        &self.insert_sql
    }

    #[must_use]
    pub fn update_sql(&self) -> &str {
        &self.update_sql
    }

    #[must_use]
    pub fn delete_sql(&self) -> &str {
        &self.delete_sql
    }
}
