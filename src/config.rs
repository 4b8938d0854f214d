// ABOUTME: Pool configuration with sensible defaults and DB_* environment loading
// ABOUTME: Plain data consumed by the pool manager; performs no I/O itself
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use serde::{Deserialize, Serialize};
use std::env;

/// Connection-pool configuration for the client-server backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub charset: String,
    /// Each statement commits independently; `false` is not supported by the
    /// execution model and is ignored with a warning when the pool is created.
    pub autocommit: bool,
    /// Connections opened at startup.
    pub min_size: u32,
    /// Hard cap; checkouts beyond it block until a connection is released.
    pub max_size: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3306,
            user: "root".into(),
            password: String::new(),
            database: String::new(),
            charset: "utf8".into(),
            autocommit: true,
            min_size: 1,
            max_size: 10,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

impl PoolConfig {
    /// Load configuration from `DB_*` environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("DB_HOST").unwrap_or(defaults.host),
            port: env_or("DB_PORT", defaults.port),
            user: env::var("DB_USER").unwrap_or(defaults.user),
            password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
            database: env::var("DB_NAME").unwrap_or(defaults.database),
            charset: env::var("DB_CHARSET").unwrap_or(defaults.charset),
            autocommit: env::var("DB_AUTOCOMMIT")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.autocommit),
            min_size: env_or("DB_MIN_CONNECTIONS", defaults.min_size),
            max_size: env_or("DB_MAX_CONNECTIONS", defaults.max_size),
        }
    }

    /// Connection URL form for URL-based entry points. Charset and pool
    /// sizing are applied by the pool manager, not carried in the URL.
    #[must_use]
    pub fn connection_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}
