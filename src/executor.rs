// ABOUTME: Parameterized statement execution over the pooled backends
// ABOUTME: Binds positional SqlValue arguments, decodes rows dynamically, reports affected counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use crate::errors::{Error, Result};
use crate::pool::Database;
use crate::value::SqlValue;
use std::collections::HashMap;
use tracing::debug;

/// A result row as a column-name to value mapping.
pub type RowMap = HashMap<String, SqlValue>;

/// Positional placeholders must match the argument count exactly. A mismatch
/// is a caller programming error, surfaced before any connection is touched.
fn check_arity(sql: &str, provided: usize) -> Result<()> {
    let expected = sql.matches('?').count();
    if expected == provided {
        Ok(())
    } else {
        Err(Error::PlaceholderMismatch { expected, provided })
    }
}

/// Run a query and return its rows.
///
/// With `limit` set, at most that many rows are pulled from the result
/// stream; otherwise all rows are fetched. The connection is checked out for
/// the duration of the call and returned to the pool on every exit path,
/// including row-decode failures.
///
/// # Errors
///
/// [`Error::PlaceholderMismatch`] on argument arity mismatch,
/// [`Error::Database`] for any engine-reported failure.
pub async fn fetch(
    db: &Database,
    sql: &str,
    args: &[SqlValue],
    limit: Option<usize>,
) -> Result<Vec<RowMap>> {
    check_arity(sql, args.len())?;
    debug!("executing query: {sql} args={args:?}");
    let rows = match db {
        #[cfg(feature = "sqlite")]
        Database::Sqlite(pool) => sqlite::fetch(pool, sql, args, limit).await?,
        #[cfg(feature = "mysql")]
        Database::MySql(pool) => mysql::fetch(pool, sql, args, limit).await?,
    };
    debug!("rows returned: {}", rows.len());
    Ok(rows)
}

/// Run a mutating statement and return the engine-reported affected-row count.
///
/// # Errors
///
/// [`Error::PlaceholderMismatch`] on argument arity mismatch,
/// [`Error::Database`] for any engine-reported failure. No retry is attempted.
pub async fn execute(db: &Database, sql: &str, args: &[SqlValue]) -> Result<u64> {
    check_arity(sql, args.len())?;
    debug!("executing statement: {sql} args={args:?}");
    let affected = match db {
        #[cfg(feature = "sqlite")]
        Database::Sqlite(pool) => sqlite::execute(pool, sql, args).await?,
        #[cfg(feature = "mysql")]
        Database::MySql(pool) => mysql::execute(pool, sql, args).await?,
    };
    debug!("rows affected: {affected}");
    Ok(affected)
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::{RowMap, SqlValue};
    use crate::errors::Result;
    use futures_util::TryStreamExt;
    use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
    use sqlx::{Column, Row, TypeInfo};

    fn bind<'q>(
        sql: &'q str,
        args: &'q [SqlValue],
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
        let mut query = sqlx::query(sql);
        for arg in args {
            query = match arg {
                SqlValue::Null => query.bind(Option::<String>::None),
                SqlValue::Boolean(v) => query.bind(*v),
                SqlValue::Integer(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.as_str()),
            };
        }
        query
    }

    pub(super) async fn fetch(
        pool: &SqlitePool,
        sql: &str,
        args: &[SqlValue],
        limit: Option<usize>,
    ) -> Result<Vec<RowMap>> {
        let query = bind(sql, args);
        let rows = if let Some(limit) = limit {
            let mut stream = query.fetch(pool);
            let mut rows = Vec::with_capacity(limit);
            while rows.len() < limit {
                match stream.try_next().await? {
                    Some(row) => rows.push(row),
                    None => break,
                }
            }
            rows
        } else {
            query.fetch_all(pool).await?
        };
        rows.iter().map(decode_row).collect()
    }

    pub(super) async fn execute(pool: &SqlitePool, sql: &str, args: &[SqlValue]) -> Result<u64> {
        let result = bind(sql, args).execute(pool).await?;
        Ok(result.rows_affected())
    }

    fn decode_row(row: &SqliteRow) -> Result<RowMap> {
        let mut map = RowMap::with_capacity(row.len());
        for (index, column) in row.columns().iter().enumerate() {
            let value = match column.type_info().name() {
                "INTEGER" | "BIGINT" | "INT" | "INT4" | "INT8" => row
                    .try_get::<Option<i64>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Integer),
                "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
                    .try_get::<Option<f64>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Float),
                "BOOLEAN" => row
                    .try_get::<Option<bool>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Boolean),
                _ => row
                    .try_get::<Option<String>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Text),
            };
            map.insert(column.name().to_owned(), value);
        }
        Ok(map)
    }
}

#[cfg(feature = "mysql")]
mod mysql {
    use super::{RowMap, SqlValue};
    use crate::errors::Result;
    use futures_util::TryStreamExt;
    use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlRow};
    use sqlx::{Column, Row, TypeInfo};

    fn bind<'q>(
        sql: &'q str,
        args: &'q [SqlValue],
    ) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
        let mut query = sqlx::query(sql);
        for arg in args {
            query = match arg {
                SqlValue::Null => query.bind(Option::<String>::None),
                SqlValue::Boolean(v) => query.bind(*v),
                SqlValue::Integer(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.as_str()),
            };
        }
        query
    }

    pub(super) async fn fetch(
        pool: &MySqlPool,
        sql: &str,
        args: &[SqlValue],
        limit: Option<usize>,
    ) -> Result<Vec<RowMap>> {
        let query = bind(sql, args);
        let rows = if let Some(limit) = limit {
            let mut stream = query.fetch(pool);
            let mut rows = Vec::with_capacity(limit);
            while rows.len() < limit {
                match stream.try_next().await? {
                    Some(row) => rows.push(row),
                    None => break,
                }
            }
            rows
        } else {
            query.fetch_all(pool).await?
        };
        rows.iter().map(decode_row).collect()
    }

    pub(super) async fn execute(pool: &MySqlPool, sql: &str, args: &[SqlValue]) -> Result<u64> {
        let result = bind(sql, args).execute(pool).await?;
        Ok(result.rows_affected())
    }

    fn decode_row(row: &MySqlRow) -> Result<RowMap> {
        let mut map = RowMap::with_capacity(row.len());
        for (index, column) in row.columns().iter().enumerate() {
            let value = match column.type_info().name() {
                "BOOLEAN" => row
                    .try_get::<Option<bool>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Boolean),
                "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
                    .try_get::<Option<i64>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Integer),
                "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
                | "BIGINT UNSIGNED" => row.try_get::<Option<u64>, _>(index)?.map_or(
                    SqlValue::Null,
                    |v| i64::try_from(v).map_or_else(|_| SqlValue::Text(v.to_string()), SqlValue::Integer),
                ),
                "FLOAT" => row
                    .try_get::<Option<f32>, _>(index)?
                    .map_or(SqlValue::Null, |v| SqlValue::Float(f64::from(v))),
                "DOUBLE" => row
                    .try_get::<Option<f64>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Float),
                _ => row
                    .try_get::<Option<String>, _>(index)?
                    .map_or(SqlValue::Null, SqlValue::Text),
            };
            map.insert(column.name().to_owned(), value);
        }
        Ok(map)
    }
}
