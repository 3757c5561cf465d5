use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::tables::CatalogConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";

// ---------------------------------------------------------------------------
// PageConfig – title and footer of the rendered page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Credit {
    pub role: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub credits: Vec<Credit>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Deep Learning-Based Multi-Channel Speech Enhancement for Low \
                    Signal-to-Noise Ratio Scenario"
                .to_string(),
            credits: vec![
                Credit {
                    role: "Author".into(),
                    name: "Yifei Wei".into(),
                    email: "yifei.wei@student.uq.edu.au".into(),
                },
                Credit {
                    role: "Supervisor".into(),
                    name: "Jihui (Aimee) Zhang".into(),
                    email: "jihuiaimee.zhang@uq.edu.au".into(),
                },
            ],
        }
    }
}

/// Shape of the optional `DEMO_CATALOG` JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    catalog: CatalogConfig,
    page: PageConfig,
}

// ---------------------------------------------------------------------------
// ServerConfig – everything the process needs at startup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Directory holding the example folders.
    pub base_dir: PathBuf,
    pub catalog: CatalogConfig,
    pub page: PageConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// * `PORT`          – listening port (default 5000)
    /// * `HOST`          – bind address (default 0.0.0.0)
    /// * `DEMO_BASE_DIR` – example root (default: current directory)
    /// * `DEMO_CATALOG`  – optional JSON file with `catalog` / `page` overrides
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let host_raw = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host_raw
            .trim()
            .parse()
            .with_context(|| format!("HOST is not an IP address: {host_raw:?}"))?;

        let base_dir = match lookup("DEMO_BASE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().context("resolving current directory")?,
        };

        let file = match lookup("DEMO_CATALOG") {
            Some(path) => load_catalog_file(Path::new(&path))?,
            None => CatalogFile::default(),
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            base_dir,
            catalog: file.catalog.normalized(),
            page: file.page,
        })
    }
}

fn load_catalog_file(path: &Path) -> Result<CatalogFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog file {}", path.display()))?;
    let file: CatalogFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing catalog file {}", path.display()))?;
    log::info!("Loaded catalog overrides from {}", path.display());
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ServerConfig::from_vars(lookup(&[("DEMO_BASE_DIR", "/srv/demo")])).unwrap();
        assert_eq!(cfg.listen_addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(cfg.base_dir, PathBuf::from("/srv/demo"));
        assert_eq!(cfg.catalog.example_names(), vec!["Example_01", "Example_02", "Example_03"]);
        assert_eq!(cfg.page.credits.len(), 2);
    }

    #[test]
    fn port_and_host_are_read() {
        let cfg = ServerConfig::from_vars(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("DEMO_BASE_DIR", "."),
        ]))
        .unwrap();
        assert_eq!(cfg.listen_addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = ServerConfig::from_vars(lookup(&[("PORT", "http"), ("DEMO_BASE_DIR", ".")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn catalog_file_overrides_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "catalog": { "examples": [{ "name": "Lab", "snr": "0 dB" }] },
                "page": { "title": "Lab demo" }
            }"#,
        )
        .unwrap();

        let cfg = ServerConfig::from_vars(lookup(&[
            ("DEMO_BASE_DIR", "."),
            ("DEMO_CATALOG", path.to_str().unwrap()),
        ]))
        .unwrap();
        assert_eq!(cfg.catalog.example_names(), vec!["Lab"]);
        assert_eq!(cfg.page.title, "Lab demo");
        // credits omitted, so the defaults stay
        assert_eq!(cfg.page.credits.len(), 2);
    }

    #[test]
    fn malformed_catalog_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = ServerConfig::from_vars(lookup(&[
            ("DEMO_BASE_DIR", "."),
            ("DEMO_CATALOG", path.to_str().unwrap()),
        ]));
        assert!(result.is_err());
    }
}
