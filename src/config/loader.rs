//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    EngineFile, EngineMetadata, PayrollConfig, PayrollSettings, StatutoryRateSnapshot,
    TaxSlabTable,
};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml            # Metadata, overtime settings, PT bands
/// ├── tax_slabs.yaml         # Slab table for all regimes
/// └── statutory_rates/
///     └── 2025-04-01.yaml    # Snapshot in force from this date
/// ```
///
/// Every file is validated at load time, so a loader that exists never hands
/// out a malformed snapshot or slab table.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let rates = loader.statutory_rates_for(date).unwrap();
/// println!("PF wage limit: {}", rates.pf_wage_limit);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - Any snapshot, the slab table, or the settings are malformed
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineFile>(&path.join("engine.yaml"))?;
        let slabs = Self::load_yaml::<TaxSlabTable>(&path.join("tax_slabs.yaml"))?;
        let rates = Self::load_rates(&path.join("statutory_rates"))?;

        let config = PayrollConfig::new(engine.engine, engine.settings, rates, slabs);
        config.validate()?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all snapshot files from the statutory rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<StatutoryRateSnapshot>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<StatutoryRateSnapshot>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &PayrollSettings {
        self.config.settings()
    }

    /// Returns the tax slab table.
    pub fn tax_slabs(&self) -> &TaxSlabTable {
        self.config.slabs()
    }

    /// Gets the most recent snapshot effective on or before `date`.
    pub fn statutory_rates_for(&self, date: NaiveDate) -> EngineResult<&StatutoryRateSnapshot> {
        self.config
            .rates()
            .iter()
            .rfind(|snapshot| snapshot.effective_date <= date)
            .ok_or(EngineError::RatesNotFound { date })
    }
}
