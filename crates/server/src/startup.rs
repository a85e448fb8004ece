use std::{env, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use service::{records::RecordStore, runtime, storage::FsStorage, validate::SchemaValidator};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Resolve dataset and schema paths from configs or env vars.
fn load_store_paths() -> (String, String) {
    match configs::load_default() {
        Ok(cfg) => {
            let mut store = cfg.store;
            store.normalize_from_env();
            (store.data_path, store.schema_path)
        }
        Err(_) => (
            env::var("DATA_PATH").unwrap_or_else(|_| "data/files-data.json".to_string()),
            env::var("SCHEMA_PATH").unwrap_or_else(|_| "data/file-schema.json".to_string()),
        ),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let (data_path, schema_path) = load_store_paths();
    let data_dir = Path::new(&data_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());
    runtime::ensure_env(&data_dir, &schema_path).await?;

    // Record store over file storage and the compiled schema
    let storage = Arc::new(FsStorage::new(&data_path));
    let validator = Arc::new(SchemaValidator::from_file(&schema_path).await?);
    let store = RecordStore::new(storage, validator);

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(Arc::clone(&store), cors);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, %data_path, %schema_path, "starting record store server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
