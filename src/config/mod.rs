//! Configuration loading and management for the payroll engine.
//!
//! This module provides the statutory rate snapshot, tax slab table and
//! engine settings types, and a loader that reads them from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded rates for: {}", config.metadata().jurisdiction);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineMetadata, OvertimeSettings, PayrollConfig, PayrollSettings, ProfessionalTaxBand,
    ProfessionalTaxSchedule, StatutoryRateSnapshot, TaxSlab, TaxSlabTable,
};
