//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, or supplied directly by a
//! caller that sources rates from elsewhere. Each type knows how to check
//! itself; a malformed value is a contract violation, never silently repaired.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::TaxRegime;

/// Metadata describing the loaded configuration set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the configuration set.
    pub name: String,
    /// The jurisdiction whose statutes these rates implement.
    pub jurisdiction: String,
    /// The version or effective date of the configuration set.
    pub version: String,
}

/// The statutory rates in force for a payroll period.
///
/// All rates are percentages (`12` means 12%). Wage limits and the
/// professional tax cap are monthly currency amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRateSnapshot {
    /// The date from which this snapshot is in force.
    pub effective_date: NaiveDate,
    /// Employee provident fund contribution rate.
    pub pf_employee_rate: Decimal,
    /// Headline employer provident fund rate; must equal `epf_rate + eps_rate`.
    pub pf_employer_rate: Decimal,
    /// Monthly wage ceiling for every provident fund percentage.
    pub pf_wage_limit: Decimal,
    /// Employer retirement-fund (EPF) sub-rate.
    pub epf_rate: Decimal,
    /// Employer pension-fund (EPS) sub-rate.
    pub eps_rate: Decimal,
    /// Employer insurance-fund (EDLI) sub-rate.
    pub edli_rate: Decimal,
    /// Employer administration charge sub-rate.
    pub pf_admin_rate: Decimal,
    /// Employee health-insurance (ESI) contribution rate.
    pub esi_employee_rate: Decimal,
    /// Employer health-insurance (ESI) contribution rate.
    pub esi_employer_rate: Decimal,
    /// Gross earnings above which ESI does not apply at all.
    pub esi_wage_limit: Decimal,
    /// Maximum professional tax chargeable in a month.
    pub pt_monthly_cap: Decimal,
}

impl StatutoryRateSnapshot {
    /// Checks that every rate is a percentage, that the EPF and EPS sub-rates
    /// add up to the employer PF rate, and that every cap is usable.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::StatutoryRateSnapshot;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut rates = StatutoryRateSnapshot {
    ///     effective_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    ///     pf_employee_rate: Decimal::from(12),
    ///     pf_employer_rate: Decimal::from(12),
    ///     pf_wage_limit: Decimal::from(15000),
    ///     epf_rate: Decimal::new(367, 2),
    ///     eps_rate: Decimal::new(833, 2),
    ///     edli_rate: Decimal::new(50, 2),
    ///     pf_admin_rate: Decimal::new(50, 2),
    ///     esi_employee_rate: Decimal::new(75, 2),
    ///     esi_employer_rate: Decimal::new(325, 2),
    ///     esi_wage_limit: Decimal::from(25000),
    ///     pt_monthly_cap: Decimal::from(300),
    /// };
    /// assert!(rates.validate().is_ok());
    ///
    /// rates.esi_wage_limit = Decimal::ZERO;
    /// assert!(rates.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let percentages = [
            ("pf_employee_rate", self.pf_employee_rate),
            ("pf_employer_rate", self.pf_employer_rate),
            ("epf_rate", self.epf_rate),
            ("eps_rate", self.eps_rate),
            ("edli_rate", self.edli_rate),
            ("pf_admin_rate", self.pf_admin_rate),
            ("esi_employee_rate", self.esi_employee_rate),
            ("esi_employer_rate", self.esi_employer_rate),
        ];
        for (field, rate) in percentages {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(EngineError::InvalidRates {
                    field: field.to_string(),
                    message: format!("{} is not a percentage between 0 and 100", rate),
                });
            }
        }

        if self.epf_rate + self.eps_rate != self.pf_employer_rate {
            return Err(EngineError::InvalidRates {
                field: "pf_employer_rate".to_string(),
                message: format!(
                    "{} does not equal epf_rate {} plus eps_rate {}",
                    self.pf_employer_rate, self.epf_rate, self.eps_rate
                ),
            });
        }

        for (field, limit) in [
            ("pf_wage_limit", self.pf_wage_limit),
            ("esi_wage_limit", self.esi_wage_limit),
        ] {
            if limit <= Decimal::ZERO {
                return Err(EngineError::InvalidRates {
                    field: field.to_string(),
                    message: format!("wage limit must be positive, got {}", limit),
                });
            }
        }

        if self.pt_monthly_cap < Decimal::ZERO {
            return Err(EngineError::InvalidRates {
                field: "pt_monthly_cap".to_string(),
                message: format!("cap cannot be negative, got {}", self.pt_monthly_cap),
            });
        }

        Ok(())
    }
}

fn default_true() -> bool {
    true
}

/// One marginal bracket of a progressive income-tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// The regime this slab belongs to.
    pub regime: TaxRegime,
    /// Inclusive lower bound of annual income.
    pub slab_from: Decimal,
    /// Exclusive upper bound, `None` for the open-ended top slab.
    #[serde(default)]
    pub slab_to: Option<Decimal>,
    /// Marginal tax rate (percentage).
    pub rate: Decimal,
    /// Surcharge on this slab's tax (percentage).
    #[serde(default)]
    pub surcharge: Decimal,
    /// Cess on this slab's tax after surcharge (percentage).
    #[serde(default)]
    pub cess: Decimal,
    /// Inactive slabs are ignored entirely.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// The progressive tax brackets for every regime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlabTable {
    /// All slab rows, in any order.
    #[serde(default)]
    pub slabs: Vec<TaxSlab>,
}

impl TaxSlabTable {
    /// Creates a table from slab rows.
    pub fn new(slabs: Vec<TaxSlab>) -> Self {
        Self { slabs }
    }

    /// Returns the active slabs for a regime, sorted ascending by `slab_from`.
    pub fn active_for(&self, regime: TaxRegime) -> Vec<&TaxSlab> {
        let mut slabs: Vec<&TaxSlab> = self
            .slabs
            .iter()
            .filter(|s| s.is_active && s.regime == regime)
            .collect();
        slabs.sort_by(|a, b| a.slab_from.cmp(&b.slab_from));
        slabs
    }

    /// Checks that the active slabs of a regime are contiguous and
    /// non-overlapping. An empty regime is valid.
    pub fn validate_regime(&self, regime: TaxRegime) -> EngineResult<()> {
        let slabs = self.active_for(regime);
        let invalid = |message: String| EngineError::InvalidTaxSlabs {
            regime: regime.to_string(),
            message,
        };

        let mut expected_from: Option<Decimal> = None;
        for (index, slab) in slabs.iter().enumerate() {
            if slab.slab_from < Decimal::ZERO {
                return Err(invalid(format!("slab_from {} is negative", slab.slab_from)));
            }
            for (name, pct) in [
                ("rate", slab.rate),
                ("surcharge", slab.surcharge),
                ("cess", slab.cess),
            ] {
                if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                    return Err(invalid(format!(
                        "{} {} on slab from {} is not a percentage",
                        name, pct, slab.slab_from
                    )));
                }
            }
            match expected_from {
                Some(expected) if slab.slab_from != expected => {
                    return Err(invalid(format!(
                        "slab starting at {} does not continue from {}",
                        slab.slab_from, expected
                    )));
                }
                _ => {}
            }
            match slab.slab_to {
                Some(to) if to <= slab.slab_from => {
                    return Err(invalid(format!(
                        "slab_to {} is not above slab_from {}",
                        to, slab.slab_from
                    )));
                }
                Some(to) => expected_from = Some(to),
                None if index + 1 < slabs.len() => {
                    return Err(invalid(format!(
                        "open-ended slab from {} is followed by further slabs",
                        slab.slab_from
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }

    /// Validates every regime in the table.
    pub fn validate(&self) -> EngineResult<()> {
        for regime in [TaxRegime::Old, TaxRegime::New] {
            self.validate_regime(regime)?;
        }
        Ok(())
    }
}

/// One band of the professional tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxBand {
    /// Inclusive upper bound of monthly gross, `None` for the top band.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Monthly levy for gross earnings in this band.
    pub amount: Decimal,
}

/// The banded professional tax schedule of a jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxSchedule {
    /// Bands in ascending order of `up_to`, ending with an open band.
    pub bands: Vec<ProfessionalTaxBand>,
}

impl Default for ProfessionalTaxSchedule {
    fn default() -> Self {
        let band = |up_to: Option<i64>, amount: i64| ProfessionalTaxBand {
            up_to: up_to.map(Decimal::from),
            amount: Decimal::from(amount),
        };
        Self {
            bands: vec![
                band(Some(15_000), 0),
                band(Some(25_000), 150),
                band(Some(40_000), 200),
                band(None, 300),
            ],
        }
    }
}

impl ProfessionalTaxSchedule {
    /// Checks that bands ascend and the schedule ends with an open band.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidTaxBands { message };

        let Some(last) = self.bands.last() else {
            return Err(invalid("schedule has no bands".to_string()));
        };
        if last.up_to.is_some() {
            return Err(invalid("last band must be open-ended".to_string()));
        }

        let mut previous: Option<Decimal> = None;
        for band in &self.bands[..self.bands.len() - 1] {
            let Some(up_to) = band.up_to else {
                return Err(invalid("only the last band may be open-ended".to_string()));
            };
            if previous.is_some_and(|p| up_to <= p) {
                return Err(invalid(format!("band bound {} is not ascending", up_to)));
            }
            previous = Some(up_to);
        }

        if let Some(band) = self.bands.iter().find(|b| b.amount < Decimal::ZERO) {
            return Err(invalid(format!("band amount {} is negative", band.amount)));
        }

        Ok(())
    }
}

/// Parameters that turn surplus hours into overtime pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSettings {
    /// Multiplier applied to the hourly rate.
    pub multiplier: Decimal,
    /// Working days assumed in a month when deriving the hourly rate.
    pub working_days_per_month: Decimal,
    /// Hours in a working day.
    pub hours_per_day: Decimal,
}

impl Default for OvertimeSettings {
    fn default() -> Self {
        Self {
            multiplier: Decimal::new(15, 1),
            working_days_per_month: Decimal::from(26),
            hours_per_day: Decimal::from(8),
        }
    }
}

impl OvertimeSettings {
    /// Checks that the settings can produce a finite hourly rate.
    pub fn validate(&self) -> EngineResult<()> {
        if self.multiplier < Decimal::ZERO {
            return Err(EngineError::InvalidOvertimeSettings {
                field: "multiplier".to_string(),
                message: format!("cannot be negative, got {}", self.multiplier),
            });
        }
        for (field, value) in [
            ("working_days_per_month", self.working_days_per_month),
            ("hours_per_day", self.hours_per_day),
        ] {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidOvertimeSettings {
                    field: field.to_string(),
                    message: format!("must be greater than zero, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Engine-level settings that are not statutory rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Overtime conversion parameters.
    #[serde(default)]
    pub overtime: OvertimeSettings,
    /// Professional tax bands.
    #[serde(default)]
    pub professional_tax: ProfessionalTaxSchedule,
    /// When set, a regime without active slabs is a configuration error
    /// instead of meaning "no tax owed".
    #[serde(default)]
    pub tds_mandatory: bool,
}

impl PayrollSettings {
    /// Validates overtime settings and the professional tax schedule.
    pub fn validate(&self) -> EngineResult<()> {
        self.overtime.validate()?;
        self.professional_tax.validate()
    }
}

/// Structure of `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Configuration set metadata.
    pub engine: EngineMetadata,
    /// Engine settings.
    #[serde(default)]
    pub settings: PayrollSettings,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: EngineMetadata,
    settings: PayrollSettings,
    /// Rate snapshots sorted oldest first.
    rates: Vec<StatutoryRateSnapshot>,
    slabs: TaxSlabTable,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        settings: PayrollSettings,
        rates: Vec<StatutoryRateSnapshot>,
        slabs: TaxSlabTable,
    ) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            settings,
            rates: sorted_rates,
            slabs,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns all rate snapshots, oldest first.
    pub fn rates(&self) -> &[StatutoryRateSnapshot] {
        &self.rates
    }

    /// Returns the tax slab table.
    pub fn slabs(&self) -> &TaxSlabTable {
        &self.slabs
    }

    /// Validates every component.
    pub fn validate(&self) -> EngineResult<()> {
        self.settings.validate()?;
        self.slabs.validate()?;
        for snapshot in &self.rates {
            snapshot.validate()?;
        }
        Ok(())
    }
}
