use crate::error::{CatalogError, Result};
use mineral_catalog_common::layout::DEFAULT_IMAGE_ROOT;
use mineral_catalog_common::DATASET_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 台帳ファイル名（コレクション管理者が編集するExcel）
pub const WORKBOOK_FILE: &str = "Coleccion de minerales.xlsx";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: PathBuf,
    pub workbook: PathBuf,
    pub image_root: PathBuf,
    pub icons_dir: PathBuf,
    pub top_countries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DATASET_FILE),
            workbook: PathBuf::from(WORKBOOK_FILE),
            image_root: PathBuf::from(DEFAULT_IMAGE_ROOT),
            icons_dir: PathBuf::from("icons"),
            top_countries: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CatalogError::Config("no se encuentra el directorio personal".into()))?;
        Ok(home.join(".config").join("mineral-catalog").join("config.json"))
    }
}
