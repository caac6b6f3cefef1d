// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for computable
//!
//! Deterministic participant lists and a logging hook shared by the
//! integration tests.

#![allow(dead_code)]

use computable::Value;
use serde_json::json;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary
///
/// Set `RUST_LOG=computable=debug` to watch invalidation and recomputation.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Four participants with distinct ids
pub fn participants() -> Value {
    Value::from(json!([
        { "name": "Alice", "id": 1492 },
        { "name": "Bob", "id": 1493 },
        { "name": "Eve", "id": 1494 },
        { "name": "Dave", "id": 1495 }
    ]))
}

/// Five participants; the name "Eve" appears twice
pub fn participants_with_duplicate_eve() -> Value {
    Value::from(json!([
        { "name": "Alice", "id": 1492 },
        { "name": "Bob", "id": 1493 },
        { "name": "Eve", "id": 1494 },
        { "name": "Dave", "id": 1495 },
        { "name": "Eve", "id": 1496 }
    ]))
}

/// Four participants; the name "Bob" appears twice
pub fn participants_with_duplicate_bob() -> Value {
    Value::from(json!([
        { "name": "Alice", "id": 1492 },
        { "name": "Bob", "id": 1493 },
        { "name": "Eve", "id": 1494 },
        { "name": "Bob", "id": 1495 }
    ]))
}
