use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::agronomy::soil::RegionProfile;
use crate::funding::FundingCatalog;
use crate::reference::loader::load_reference_data;
use crate::reference::ReferenceData;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub region: RegionProfile,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_crops_csv")]
    pub crops_csv: String,
    #[serde(default = "default_reference_prices_csv")]
    pub reference_prices_csv: String,
    #[serde(default = "default_funding_catalog")]
    pub funding_catalog: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub crops_csv: Option<String>,
    pub reference_prices_csv: Option<String>,
    pub funding_catalog: Option<String>,
}

const CONFIG_RELATIVE_PATH: &str = ".config/crop-advisor/config.toml";

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_RELATIVE_PATH)
    }

    /// A missing file means "run on the bundled datasets".
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("cannot read advisor settings at {}", path.display())
                })
            }
        };
        toml::from_str(&raw)
            .with_context(|| format!("invalid advisor settings in {}", path.display()))
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let data = &mut self.data;
        for (slot, value) in [
            (&mut data.crops_csv, overrides.crops_csv),
            (&mut data.reference_prices_csv, overrides.reference_prices_csv),
            (&mut data.funding_catalog, overrides.funding_catalog),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create settings directory {}", dir.display()))?;
        }
        let template = toml::to_string_pretty(&Self::default())
            .context("cannot render default advisor settings")?;
        fs::write(path, template)
            .with_context(|| format!("cannot write advisor settings to {}", path.display()))
    }

    pub fn load_reference_data(&self) -> Result<ReferenceData> {
        load_reference_data(
            &dataset_path(&self.data.crops_csv),
            &dataset_path(&self.data.reference_prices_csv),
        )
    }

    pub fn load_funding_catalog(&self) -> Result<FundingCatalog> {
        FundingCatalog::load(&dataset_path(&self.data.funding_catalog))
    }
}

/// Dataset paths may start with `~/`.
fn dataset_path(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            crops_csv: default_crops_csv(),
            reference_prices_csv: default_reference_prices_csv(),
            funding_catalog: default_funding_catalog(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_crops_csv() -> String {
    "data/crops.csv".into()
}

fn default_reference_prices_csv() -> String {
    "data/reference_prices.csv".into()
}

fn default_funding_catalog() -> String {
    "data/funding_catalog.json".into()
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_template_loads_back_as_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/config.toml");
        Config::write_template(&path).expect("template written");
        let parsed = Config::load(Some(&path)).expect("template parses");
        let defaults = Config::default();
        assert_eq!(parsed.data.crops_csv, defaults.data.crops_csv);
        assert_eq!(parsed.region, defaults.region);
        assert_eq!(parsed.server.port, defaults.server.port);
    }

    #[test]
    fn dataset_paths_expand_home() {
        assert_eq!(dataset_path("data/crops.csv"), PathBuf::from("data/crops.csv"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(dataset_path("~/crops.csv"), home.join("crops.csv"));
        }
    }

    #[test]
    fn malformed_settings_name_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = \"not a port\"\n").expect("write");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid advisor settings"));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn partial_file_keeps_defaults_and_overrides_win() {
        let mut config: Config = toml::from_str("[region]\nname = \"Porto Santo\"\n").expect("parses");
        assert_eq!(config.region.name, "Porto Santo");
        assert_eq!(config.region.soil_ph_max, 7.5);
        config.apply_overrides(ConfigOverrides {
            crops_csv: Some("/tmp/crops.csv".to_string()),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.data.crops_csv, "/tmp/crops.csv");
        assert_eq!(config.data.funding_catalog, "data/funding_catalog.json");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(Some(&dir.path().join("absent.toml"))).expect("defaults");
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
