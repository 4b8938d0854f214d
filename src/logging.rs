// ABOUTME: Tracing subscriber setup for the mapping layer
// ABOUTME: EnvFilter-driven level control with a compact fmt layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tablemap Contributors

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Level control comes from `RUST_LOG`, defaulting to `info`. Safe to call
/// more than once per process; later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
