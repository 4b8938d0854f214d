// ABOUTME: Library entry point for tablemap, a minimal declarative table mapping layer
// ABOUTME: Compiled SQL templates plus pooled async execution for single-statement CRUD
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

#![deny(unsafe_code)]

//! # tablemap
//!
//! A minimal object-relational mapping layer: describe a table as a set of
//! typed fields, compile that description once into the four canonical
//! SELECT/INSERT/UPDATE/DELETE templates, and run them through a shared
//! connection pool. Values are always bound through positional placeholders,
//! never interpolated into SQL text.
//!
//! Deliberately out of scope: query building beyond a raw WHERE fragment,
//! migrations, multi-statement transactions, relationship mapping, caching.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tablemap::{Database, Field, Table, TableSchema};
//!
//! #[tokio::main]
//! async fn main() -> tablemap::Result<()> {
//!     tablemap::logging::init_logging();
//!
//!     // Compile once at startup, before first use.
//!     let schema = TableSchema::compile(
//!         "Student",
//!         vec![
//!             ("SId", Field::integer().primary_key()),
//!             ("Sname", Field::string()),
//!             ("Sage", Field::string()),
//!             ("Ssex", Field::string()),
//!         ],
//!     )?;
//!     let student = Table::new(Arc::new(schema));
//!
//!     let db = Database::connect("sqlite:education.db?mode=rwc", 1, 10).await?;
//!
//!     let mut record = student.record();
//!     record.set("SId", 8_i64);
//!     record.set("Sname", "Wang Ju");
//!     record.save(&db).await;
//!
//!     if let Some(found) = student.find(&db, 8_i64).await? {
//!         println!("{:?}", found.values());
//!     }
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod executor;
pub mod field;
pub mod logging;
pub mod pool;
pub mod record;
pub mod schema;
pub mod value;

pub use config::PoolConfig;
pub use errors::{Error, Result};
pub use executor::RowMap;
pub use field::{Field, FieldDefault};
pub use pool::{detect_database_type, Database, DatabaseType};
pub use record::{Record, Table};
pub use schema::TableSchema;
pub use value::SqlValue;
