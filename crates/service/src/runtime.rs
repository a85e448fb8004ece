//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates reach
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the data directory exists; warn when the schema file is absent.
pub async fn ensure_env(data_dir: &str, schema_path: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir, schema_path).await
}
