// ABOUTME: Connection pool manager with URL-based backend selection
// ABOUTME: Wraps sqlx pools for the embedded (sqlite) and client-server (mysql) backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use crate::config::PoolConfig;
use crate::errors::{Error, Result};
use tracing::{debug, info};

#[cfg(feature = "mysql")]
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
#[cfg(feature = "sqlite")]
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
#[cfg(feature = "mysql")]
use tracing::warn;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    Sqlite,
    MySql,
}

/// Detect the backend from a connection URL.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDatabaseUrl`] when the URL matches neither
/// `sqlite:` nor `mysql://`.
pub fn detect_database_type(database_url: &str) -> Result<DatabaseType> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::Sqlite)
    } else if database_url.starts_with("mysql://") {
        Ok(DatabaseType::MySql)
    } else {
        Err(Error::UnsupportedDatabaseUrl(database_url.to_owned()))
    }
}

/// Shared handle over the process-wide connection pool.
///
/// Constructed once at startup and passed by reference to every component
/// that touches the database; there is no implicit global. Per-statement
/// checkout and release happen inside the executor. The handle is `Clone`
/// (cheap, reference-counted) and [`Database::close`] drains the pool at
/// shutdown.
#[derive(Debug, Clone)]
pub enum Database {
    #[cfg(feature = "sqlite")]
    Sqlite(SqlitePool),
    #[cfg(feature = "mysql")]
    MySql(MySqlPool),
}

impl Database {
    /// Open a pool for the backend named by the URL.
    ///
    /// `min_size` connections are established at startup; checkouts grow the
    /// pool on demand up to `max_size`, beyond which callers block until a
    /// connection is released. No two operations ever share a checked-out
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PoolInit`] if the backend cannot be reached or
    /// refuses the credentials — fatal, the process must not serve without a
    /// working pool. Returns [`Error::BackendDisabled`] when the URL names a
    /// backend this build does not include.
    pub async fn connect(database_url: &str, min_size: u32, max_size: u32) -> Result<Self> {
        debug!("detecting backend from URL: {database_url}");
        match detect_database_type(database_url)? {
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => {
                info!("creating sqlite connection pool (min={min_size}, max={max_size})");
                let pool = SqlitePoolOptions::new()
                    .min_connections(min_size)
                    .max_connections(max_size)
                    .connect(database_url)
                    .await
                    .map_err(Error::PoolInit)?;
                Ok(Self::Sqlite(pool))
            }
            #[cfg(not(feature = "sqlite"))]
            DatabaseType::Sqlite => Err(Error::BackendDisabled { backend: "sqlite" }),
            #[cfg(feature = "mysql")]
            DatabaseType::MySql => {
                info!("creating mysql connection pool (min={min_size}, max={max_size})");
                let pool = MySqlPoolOptions::new()
                    .min_connections(min_size)
                    .max_connections(max_size)
                    .connect(database_url)
                    .await
                    .map_err(Error::PoolInit)?;
                Ok(Self::MySql(pool))
            }
            #[cfg(not(feature = "mysql"))]
            DatabaseType::MySql => Err(Error::BackendDisabled { backend: "mysql" }),
        }
    }

    /// Open a MySQL pool from a [`PoolConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::PoolInit`] on connect failure, or
    /// [`Error::BackendDisabled`] when built without the `mysql` feature.
    #[cfg(feature = "mysql")]
    pub async fn from_config(config: &PoolConfig) -> Result<Self> {
        if !config.autocommit {
            warn!("autocommit=false is not supported; statements run autocommitted");
        }
        info!(
            "creating database connection pool: {}@{}:{}/{} (min={}, max={})",
            config.user, config.host, config.port, config.database, config.min_size, config.max_size
        );
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .charset(&config.charset);
        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_size)
            .max_connections(config.max_size)
            .connect_with(options)
            .await
            .map_err(Error::PoolInit)?;
        Ok(Self::MySql(pool))
    }

    /// See the `mysql`-enabled variant; without the feature this always fails.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::BackendDisabled`].
    #[cfg(not(feature = "mysql"))]
    pub async fn from_config(_config: &PoolConfig) -> Result<Self> {
        Err(Error::BackendDisabled { backend: "mysql" })
    }

    /// Backend currently in use.
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => DatabaseType::Sqlite,
            #[cfg(feature = "mysql")]
            Self::MySql(_) => DatabaseType::MySql,
        }
    }

    /// Descriptive string for logs and diagnostics.
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "SQLite (embedded)",
            #[cfg(feature = "mysql")]
            Self::MySql(_) => "MySQL (client-server)",
        }
    }

    /// Close every pooled connection and reject further checkouts.
    /// Explicit shutdown counterpart of [`Database::connect`].
    pub async fn close(&self) {
        info!("closing database connection pool");
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(pool) => pool.close().await,
            #[cfg(feature = "mysql")]
            Self::MySql(pool) => pool.close().await,
        }
    }
}
