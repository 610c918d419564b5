//! # filecat: a metadata catalog for uploaded files
//!
//! `filecat` stores metadata about files (name, size and a set of tags) and lets
//! clients find them again by tag and by name fragment. File content lives
//! elsewhere; only the description is catalogued here.
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Requests are
//! handled by [`api::handlers`], which call the [`catalog::FileService`]. The service
//! composes the pure catalog components (validation, tag editing, query building and
//! page assembly) against a [`store::FileStore`] backend:
//!
//! - [`store::PostgresFileStore`] for production, over the repositories in [`db`]
//! - [`store::InMemoryFileStore`] for tests and local experiments
//!
//! The backend is created once at startup and shared by reference; the service holds
//! no other state between requests.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use filecat::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = filecat::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     filecat::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations run automatically on startup. They can also be run by hand:
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! let pool = sqlx::PgPool::connect("postgresql://localhost/filecat").await?;
//! filecat::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod store;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::catalog::FileService;
use crate::config::PoolSettings;
use crate::openapi::ApiDoc;
use crate::store::{FileStore, PostgresFileStore};

pub use config::Config;
pub use errors::{Error, Result};
pub use types::FileId;

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .files(FileService::new(store))
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub files: FileService,
}

/// Get the filecat database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    let seconds = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(seconds(settings.idle_timeout_secs))
        .max_lifetime(seconds(settings.max_lifetime_secs))
}

/// Connect to the configured database (starting the embedded one if asked to)
/// and run migrations.
async fn setup_database(config: &Config) -> anyhow::Result<(Option<db::embedded::EmbeddedDatabase>, PgPool)> {
    let (embedded_db, database_url) = match config.database_url() {
        Some(url) => {
            info!("Using external database");
            (None, url.to_string())
        }
        None => {
            let persistent = config.database.embedded_persistent();
            info!("Starting with embedded database (persistent: {})", persistent);
            if !persistent {
                info!("persistent=false: database will be ephemeral and data will be lost on shutdown");
            }
            let embedded_db = db::embedded::EmbeddedDatabase::start(config.database.embedded_data_dir(), persistent).await?;
            let url = embedded_db.connection_string().to_string();
            (Some(embedded_db), url)
        }
    };

    let pool = pool_options(config.database.pool_settings()).connect(&database_url).await?;
    migrator().run(&pool).await?;

    Ok((embedded_db, pool))
}

/// Build the application router.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let file_routes = Router::new()
        .route(
            "/file",
            post(api::handlers::files::upload_file).get(api::handlers::files::search_files),
        )
        .route("/file/{id}", axum::routing::delete(api::handlers::files::delete_file))
        .route(
            "/file/{id}/tags",
            post(api::handlers::files::add_tags).delete(api::handlers::files::remove_tags),
        )
        .with_state(state.clone());

    let mut router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/openapi.json", get(|| async { axum::Json(ApiDoc::openapi()) }))
        .merge(file_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Add Prometheus metrics if enabled
    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to the database, runs migrations and
///    wires the Postgres store into the file service
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown signal is received, closes the pool, flushes
///    telemetry and stops the embedded database
pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
    _embedded_db: Option<db::embedded::EmbeddedDatabase>,
}

impl Application {
    /// Create a new application instance backed by PostgreSQL
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting file catalog with configuration: {:#?}", config);

        let (embedded_db, pool) = setup_database(&config).await?;
        let mut app = Self::with_store(config, Arc::new(PostgresFileStore::new(pool.clone())))?;
        app.pool = Some(pool);
        app._embedded_db = embedded_db;
        Ok(app)
    }

    /// Create an application over an existing pool, running migrations first
    pub async fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        migrator().run(&pool).await?;
        let mut app = Self::with_store(config, Arc::new(PostgresFileStore::new(pool.clone())))?;
        app.pool = Some(pool);
        Ok(app)
    }

    /// Create an application over any backend. No database is opened.
    pub fn with_store(config: Config, store: Arc<dyn FileStore>) -> anyhow::Result<Self> {
        let state = AppState::builder().config(config.clone()).files(FileService::new(store)).build();
        let router = build_router(state)?;

        Ok(Self {
            router,
            config,
            pool: None,
            _embedded_db: None,
        })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "File catalog listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        // Clean up embedded database if it exists
        if let Some(embedded_db) = self._embedded_db {
            info!("Shutting down embedded database...");
            embedded_db.stop().await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::InMemoryFileStore;
    use crate::test_utils::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn test_healthz() {
        let (server, _store) = create_test_app();
        let response = server.get("/healthz").await;
        assert_eq!(response.status_code().as_u16(), 200);
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_docs_served() {
        let (server, _store) = create_test_app();

        let doc = server.get("/openapi.json").await;
        doc.assert_status_ok();
        assert!(doc.text().contains("/file/{id}/tags"));

        server.get("/docs").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_metrics_route_absent_when_disabled() {
        let (server, _store) = create_test_app();
        let response = server.get("/internal/metrics").await;
        assert_eq!(response.status_code().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_upload_then_search_round_trip() {
        let app = Application::with_store(create_test_config(), Arc::new(InMemoryFileStore::new())).unwrap();
        let server = app.into_test_server();

        server
            .post("/file")
            .json(&serde_json::json!({"name": "holiday.JPG", "size": 2048, "tags": ["2024"]}))
            .await
            .assert_status_ok();

        let response = server.get("/file?tags=image").await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["total"], 1);
        assert_eq!(body["page"][0]["name"], "holiday.JPG");
        assert_eq!(body["page"][0]["tags"], serde_json::json!(["2024", "image"]));
    }

    #[test]
    fn test_pool_options_zero_means_no_limit() {
        let options = pool_options(&PoolSettings {
            max_connections: 3,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 0,
            max_lifetime_secs: 60,
        });
        assert_eq!(options.get_max_connections(), 3);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(60)));
    }

    #[sqlx::test]
    async fn test_postgres_backed_application(pool: PgPool) {
        let app = Application::new_with_pool(create_test_config(), pool).await.unwrap();
        let server = app.into_test_server();

        let response = server
            .post("/file")
            .json(&serde_json::json!({"name": "report.pdf", "size": 10, "tags": ["work"]}))
            .await;
        response.assert_status_ok();
        let id = response.json::<serde_json::Value>()["ID"].as_str().unwrap().to_string();

        server
            .delete(&format!("/file/{id}/tags"))
            .json(&serde_json::json!(["work"]))
            .await
            .assert_status_ok();

        let body: serde_json::Value = server.get("/file?tags=document").await.json();
        assert_eq!(body["total"], 1);
        assert_eq!(body["page"][0]["tags"], serde_json::json!(["document"]));
    }
}
