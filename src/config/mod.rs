use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::currency::{CurrencyCode, MoneyFormat};
use crate::errors::{FinanceError, Result};
use crate::storage::{JsonStorage, MemoryStorage, StorageBackend};
use crate::utils::{app_data_dir, ensure_dir, write_atomic};

const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "finflow.json";

/// Which backend the application persists to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    #[default]
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub storage: StorageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            storage: StorageKind::default(),
            data_file: None,
        }
    }
}

impl Config {
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::for_locale(&self.locale, CurrencyCode::new(self.currency.as_str()))
    }

    /// Relative data files resolve against `base`.
    pub fn data_path(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.join(DEFAULT_DATA_FILE),
        }
    }

    /// Builds the configured backend. The choice is made once, here, and handed
    /// to the tracker rather than consulted on every call.
    pub fn open_storage(&self, base: &Path) -> Result<Box<dyn StorageBackend>> {
        match self.storage {
            StorageKind::Memory => Ok(Box::new(MemoryStorage::new())),
            StorageKind::Json => Ok(Box::new(JsonStorage::new(self.data_path(base))?)),
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_lowercase().as_str() {
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_uppercase(),
            "storage" => {
                self.storage = match value.to_lowercase().as_str() {
                    "memory" => StorageKind::Memory,
                    "json" => StorageKind::Json,
                    other => {
                        return Err(FinanceError::Config(format!(
                            "unknown storage `{}` (expected memory or json)",
                            other
                        )))
                    }
                }
            }
            "data_file" => {
                if value.eq_ignore_ascii_case("none") || value.is_empty() {
                    self.data_file = None;
                } else {
                    self.data_file = Some(PathBuf::from(value));
                }
            }
            other => {
                return Err(FinanceError::Config(format!(
                    "unknown config key `{}`",
                    other
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| FinanceError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
