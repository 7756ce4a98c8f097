use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://zbgis.skgeodesy.sk/mapka/sk/kataster";
pub const DEFAULT_ZOOM: u8 = 15;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub reference: ReferenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub zoom: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Where the two reference tables live and which columns to read.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Comma-delimited table: district name, administrative code
    pub codes: PathBuf,
    /// Semicolon-delimited table with BOM: district name, X, Y
    pub coordinates: PathBuf,
    pub code_name_column: String,
    pub code_column: String,
    pub coord_name_column: String,
    pub x_column: String,
    pub y_column: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            codes: PathBuf::from("data/katastralne_uzemia.csv"),
            coordinates: PathBuf::from("data/ku_suradnice.csv"),
            code_name_column: "NAZOV_KU".to_string(),
            code_column: "KOD_KU".to_string(),
            coord_name_column: "NAZOV".to_string(),
            x_column: "X".to_string(),
            y_column: "Y".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
