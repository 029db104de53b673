//! JSON file store for the pricing configuration.
//!
//! The admin tooling edits the same file this store reads. Loading a missing
//! file seeds it with the default configuration; saves go through a temp
//! file and a rename so a reader never sees a half-written config.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::config::PricingConfig;
use super::errors::PricingError;

/// File-backed pricing configuration store
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

fn io_error(operation: &str, path: &Path, err: std::io::Error) -> PricingError {
    PricingError::configuration(
        format!("Failed to {} pricing config at {}", operation, path.display()),
        vec![err.to_string()],
    )
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the configuration, seeding defaults if the file is absent.
    pub fn load(&self) -> Result<PricingConfig, PricingError> {
        if !self.path.exists() {
            let config = PricingConfig::default();
            self.save(&config)?;
            tracing::info!("Wrote default pricing config to {}", self.path.display());
            return Ok(config);
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| io_error("read", &self.path, e))?;
        let config: PricingConfig = serde_json::from_str(&contents).map_err(|e| {
            PricingError::configuration(
                format!("Invalid JSON in {}", self.path.display()),
                vec![e.to_string()],
            )
        })?;
        config.validate()?;

        tracing::info!("Loaded pricing config from {}", self.path.display());
        Ok(config)
    }

    /// Validate and atomically write the configuration.
    pub fn save(&self, config: &PricingConfig) -> Result<(), PricingError> {
        config.validate()?;

        let json = serde_json::to_string_pretty(config).map_err(|e| {
            PricingError::configuration("Failed to serialize pricing config", vec![e.to_string()])
        })?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| io_error("create directory for", &self.path, e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp_file =
            File::create(&tmp_path).map_err(|e| io_error("create temp file for", &tmp_path, e))?;
        tmp_file
            .write_all(json.as_bytes())
            .map_err(|e| io_error("write", &tmp_path, e))?;
        tmp_file.sync_all().map_err(|e| io_error("sync", &tmp_path, e))?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            io_error("replace", &self.path, e)
        })?;

        Ok(())
    }
}
