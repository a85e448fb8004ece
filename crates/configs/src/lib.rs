use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8081, worker_threads: Some(4) }
    }
}

/// Paths to the persisted dataset document and the record schema.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_schema_path")]
    pub schema_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_path: default_data_path(), schema_path: default_schema_path() }
    }
}

fn default_data_path() -> String { "data/files-data.json".into() }
fn default_schema_path() -> String { "data/file-schema.json".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.store.normalize_from_env();
        self.store.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StoreConfig {
    /// Environment variables override the TOML paths when set.
    pub fn normalize_from_env(&mut self) {
        if let Ok(p) = std::env::var("DATA_PATH") {
            if !p.trim().is_empty() { self.data_path = p; }
        }
        if let Ok(p) = std::env::var("SCHEMA_PATH") {
            if !p.trim().is_empty() { self.schema_path = p; }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_path.trim().is_empty() {
            return Err(anyhow!("store.data_path is empty; set it in config.toml or DATA_PATH"));
        }
        if self.schema_path.trim().is_empty() {
            return Err(anyhow!("store.schema_path is empty; set it in config.toml or SCHEMA_PATH"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.store.data_path, "data/files-data.json");
        assert_eq!(cfg.store.schema_path, "data/file-schema.json");
    }

    #[test]
    fn loads_partial_toml_with_store_section() {
        let path = std::env::temp_dir().join(format!("configs_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[store]\ndata_path = \"/tmp/files.json\"\n",
        )
        .expect("write config");
        let cfg = load_from_file(path.to_str().expect("utf-8 path")).expect("parse config");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.store.data_path, "/tmp/files.json");
        // unset keys fall back to defaults
        assert_eq!(cfg.store.schema_path, "data/file-schema.json");
        let _ = std::fs::remove_file(&path);
    }
}
