//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected files and directories exist at startup.

use tracing::warn;

/// Ensure the data directory exists; warn when the schema document is absent.
pub async fn ensure_env(data_dir: &str, schema_path: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(schema_path).await.is_err() {
        warn!(%schema_path, "schema file not found; startup will fail when compiling the validator");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
