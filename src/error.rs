//! Error types for the payroll engine.
//!
//! Business-rule findings about a finished record are reported as data by the
//! validator. Everything in this module is a contract violation: bad input,
//! malformed statutory configuration, or a configuration file that cannot be
//! read. These are returned through [`EngineResult`] and never defaulted away.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidAttendance {
///     field: "working_days".to_string(),
///     message: "must be greater than zero".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid attendance field 'working_days': must be greater than zero"
/// );
/// assert!(error.is_configuration_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No statutory rate snapshot is in force on the given date.
    #[error("No statutory rates in force on {date}")]
    RatesNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// The statutory rate snapshot is malformed.
    #[error("Invalid statutory rate '{field}': {message}")]
    InvalidRates {
        /// The offending snapshot field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The tax slab table for a regime is malformed.
    #[error("Invalid tax slabs for regime '{regime}': {message}")]
    InvalidTaxSlabs {
        /// The regime whose slabs are malformed.
        regime: String,
        /// A description of the problem.
        message: String,
    },

    /// Tax is mandatory but no active slabs exist for the declared regime.
    #[error("No active tax slabs for regime '{regime}'")]
    MissingTaxSlabs {
        /// The declared regime.
        regime: String,
    },

    /// The professional tax band schedule is malformed.
    #[error("Invalid professional tax bands: {message}")]
    InvalidTaxBands {
        /// A description of the problem.
        message: String,
    },

    /// Overtime settings cannot produce an hourly rate.
    #[error("Invalid overtime setting '{field}': {message}")]
    InvalidOvertimeSettings {
        /// The offending setting.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// An attendance summary was invalid.
    #[error("Invalid attendance field '{field}': {message}")]
    InvalidAttendance {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A salary structure was invalid.
    #[error("Invalid salary structure field '{field}': {message}")]
    InvalidSalaryStructure {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Adjustments or the advance recovery amount were invalid.
    #[error("Invalid adjustment '{field}': {message}")]
    InvalidAdjustment {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Salary structure and attendance summary belong to different employees.
    #[error("Salary structure is for '{salary_employee}' but attendance is for '{attendance_employee}'")]
    EmployeeMismatch {
        /// Employee on the salary structure.
        salary_employee: String,
        /// Employee on the attendance summary.
        attendance_employee: String,
    },
}

impl EngineError {
    /// Returns true for contract and configuration violations, as opposed to
    /// failures reading configuration files or finding rates for a date.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::RatesNotFound { .. }
        )
    }

    /// Returns a stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            EngineError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            EngineError::RatesNotFound { .. } => "RATES_NOT_FOUND",
            EngineError::InvalidRates { .. } => "INVALID_RATES",
            EngineError::InvalidTaxSlabs { .. } => "INVALID_TAX_SLABS",
            EngineError::MissingTaxSlabs { .. } => "MISSING_TAX_SLABS",
            EngineError::InvalidTaxBands { .. } => "INVALID_TAX_BANDS",
            EngineError::InvalidOvertimeSettings { .. } => "INVALID_OVERTIME_SETTINGS",
            EngineError::InvalidAttendance { .. } => "INVALID_ATTENDANCE",
            EngineError::InvalidSalaryStructure { .. } => "INVALID_SALARY_STRUCTURE",
            EngineError::InvalidAdjustment { .. } => "INVALID_ADJUSTMENT",
            EngineError::EmployeeMismatch { .. } => "EMPLOYEE_MISMATCH",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
