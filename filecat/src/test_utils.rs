//! Test utilities for HTTP-level tests.

use crate::catalog::models::{File, FileRecord};
use crate::config::{Config, DatabaseConfig, PoolSettings, SearchConfig};
use crate::store::{FileStore, InMemoryFileStore};
use axum_test::TestServer;
use std::sync::Arc;

/// Build the full router over a fresh in-memory store. The store handle is
/// returned so tests can seed and inspect records directly.
pub fn create_test_app() -> (TestServer, InMemoryFileStore) {
    let store = InMemoryFileStore::new();
    let app = crate::Application::with_store(create_test_config(), Arc::new(store.clone()))
        .expect("Failed to create application");
    (app.into_test_server(), store)
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        database: DatabaseConfig::External {
            // Will get overriden by env var
            url: "Something".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 0,
                ..Default::default()
            },
        },
        search: SearchConfig::default(),
        // The Prometheus recorder is process-global and can only be installed once
        enable_metrics: false,
        enable_otel_export: false,
    }
}

/// Insert a record with a fixed id and zero size, bypassing validation and
/// tag inference.
pub async fn seed_file(store: &InMemoryFileStore, id: &str, name: &str, tags: &[&str]) -> File {
    store
        .save(FileRecord {
            id: Some(id.to_string()),
            name: name.to_string(),
            size: 0,
            tags: tags.iter().map(|s| s.to_string()).collect(),
        })
        .await
        .expect("Failed to seed file")
}
