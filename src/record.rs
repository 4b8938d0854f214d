// ABOUTME: Record entity and table-level CRUD over compiled schemas and the executor
// ABOUTME: find/find_all/find_count/remove on the table handle, save/update on record instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use crate::errors::Result;
use crate::executor::{self, RowMap};
use crate::field::FieldDefault;
use crate::pool::Database;
use crate::schema::TableSchema;
use crate::value::SqlValue;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Class-side handle for one mapped table.
///
/// Cheap to clone; all instances share the same compiled [`TableSchema`].
#[derive(Debug, Clone)]
pub struct Table {
    schema: Arc<TableSchema>,
}

impl Table {
    #[must_use]
    pub fn new(schema: Arc<TableSchema>) -> Self {
        Self { schema }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    /// An empty record bound to this table.
    #[must_use]
    pub fn record(&self) -> Record {
        Record {
            schema: Arc::clone(&self.schema),
            values: HashMap::new(),
        }
    }

    /// A record pre-populated from `(field, value)` pairs.
    pub fn record_from<S, V, I>(&self, values: I) -> Record
    where
        S: Into<String>,
        V: Into<SqlValue>,
        I: IntoIterator<Item = (S, V)>,
    {
        let mut record = self.record();
        for (field, value) in values {
            record.set(field, value);
        }
        record
    }

    fn from_row(&self, row: RowMap) -> Record {
        Record {
            schema: Arc::clone(&self.schema),
            values: row,
        }
    }

    /// Look up one row by primary key. `None` when no row matches.
    ///
    /// # Errors
    ///
    /// Engine failures propagate as [`crate::Error::Database`].
    pub async fn find(&self, db: &Database, pk: impl Into<SqlValue>) -> Result<Option<Record>> {
        let sql = format!(
            "{} where `{}` = ?",
            self.schema.select_sql(),
            self.schema.primary_key()
        );
        let rows = executor::fetch(db, &sql, &[pk.into()], Some(1)).await?;
        Ok(rows.into_iter().next().map(|row| self.from_row(row)))
    }

    /// Fetch all rows, optionally filtered and capped.
    ///
    /// `where_clause` is appended verbatim after `where ` — it is a
    /// caller-supplied trusted fragment, not sanitized by this layer. Returns
    /// `None` when zero rows match.
    ///
    /// # Errors
    ///
    /// Engine failures propagate as [`crate::Error::Database`].
    pub async fn find_all(
        &self,
        db: &Database,
        where_clause: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Option<Vec<Record>>> {
        let sql = match where_clause {
            Some(clause) => format!("{} where {}", self.schema.select_sql(), clause),
            None => self.schema.select_sql().to_owned(),
        };
        let rows = executor::fetch(db, &sql, &[], limit).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.into_iter().map(|row| self.from_row(row)).collect()))
    }

    /// Number of rows matching the clause; zero matches count as 0.
    ///
    /// Materializes the matching rows rather than issuing a COUNT query.
    ///
    /// # Errors
    ///
    /// Engine failures propagate as [`crate::Error::Database`].
    pub async fn find_count(
        &self,
        db: &Database,
        where_clause: Option<&str>,
        limit: Option<usize>,
    ) -> Result<usize> {
        Ok(self
            .find_all(db, where_clause, limit)
            .await?
            .map_or(0, |records| records.len()))
    }

    /// Delete the row with the given primary key. An affected-row count other
    /// than 1 (no such row, or several matched) is logged, not an error.
    ///
    /// # Errors
    ///
    /// Engine failures propagate as [`crate::Error::Database`].
    pub async fn remove(&self, db: &Database, pk: impl Into<SqlValue>) -> Result<()> {
        let affected = executor::execute(db, self.schema.delete_sql(), &[pk.into()]).await?;
        if affected != 1 {
            warn!(
                "failed to remove record from {}: affected rows {affected}",
                self.schema.table_name()
            );
        }
        Ok(())
    }
}

/// One mapped row: a mutable field-name to value bag bound to its schema.
///
/// Constructed by the caller for inserts or by row deserialization for reads.
/// Repeated reads of the same primary key produce independent instances;
/// there is no identity map.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<TableSchema>,
    values: HashMap<String, SqlValue>,
}

impl Record {
    #[must_use]
    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// The full column-name to value mapping, ready for serialization.
    #[must_use]
    pub fn values(&self) -> &HashMap<String, SqlValue> {
        &self.values
    }

    /// Effective value of a field: the explicitly set value if present and
    /// non-null, else the field's default (factory invoked lazily). A
    /// resolved default is cached back onto the record.
    fn value_or_default(&mut self, field_name: &str) -> SqlValue {
        if let Some(value) = self.values.get(field_name) {
            if !value.is_null() {
                return value.clone();
            }
        }
        let resolved = self
            .schema
            .field(field_name)
            .and_then(|field| field.default())
            .map_or(SqlValue::Null, FieldDefault::resolve);
        if !resolved.is_null() {
            debug!("using default value for {field_name}: {resolved}");
            self.values.insert(field_name.to_owned(), resolved.clone());
        }
        resolved
    }

    /// Statement arguments in template order: non-key fields first, primary
    /// key last. Mirrors the INSERT and UPDATE column order.
    fn statement_args(&mut self) -> Vec<SqlValue> {
        let schema = Arc::clone(&self.schema);
        let mut args: Vec<SqlValue> = schema
            .fields()
            .iter()
            .map(|field| self.value_or_default(field))
            .collect();
        args.push(self.value_or_default(schema.primary_key()));
        args
    }

    /// Insert this record.
    ///
    /// Engine failures are logged and swallowed; save never signals failure
    /// to its caller. An affected-row count other than 1 is logged as a
    /// warning.
    pub async fn save(&mut self, db: &Database) {
        let args = self.statement_args();
        match executor::execute(db, self.schema.insert_sql(), &args).await {
            Ok(1) => {}
            Ok(affected) => warn!(
                "failed to insert record into {}: affected rows {affected}",
                self.schema.table_name()
            ),
            Err(err) => error!("save failed for {}: {err}", self.schema.table_name()),
        }
    }

    /// Update the row matching this record's primary key. An affected-row
    /// count other than 1 warns but does not fail.
    ///
    /// # Errors
    ///
    /// Engine failures propagate as [`crate::Error::Database`].
    pub async fn update(&mut self, db: &Database) -> Result<()> {
        let args = self.statement_args();
        let affected = executor::execute(db, self.schema.update_sql(), &args).await?;
        if affected != 1 {
            warn!(
                "failed to update record in {}: affected rows {affected}",
                self.schema.table_name()
            );
        }
        Ok(())
    }
}
