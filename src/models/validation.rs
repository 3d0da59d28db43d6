//! Validation result models.

use serde::{Deserialize, Serialize};

/// A single finding about a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// A stable code identifying the rule (e.g., "GROSS_MISMATCH").
    pub code: String,
    /// The record field the finding concerns.
    pub field: String,
    /// A human-readable description.
    pub message: String,
}

impl ValidationIssue {
    /// Creates a new issue.
    pub fn new(
        code: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The outcome of validating a payroll record.
///
/// Errors block finalization; warnings are surfaced but do not block.
/// Derived on demand and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when there are no errors.
    pub is_valid: bool,
    /// Blocking findings.
    pub errors: Vec<ValidationIssue>,
    /// Non-blocking findings.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Builds a result, deriving `is_valid` from the error list.
    pub fn from_issues(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Returns true if an error with the given code was reported.
    pub fn has_error(&self, code: &str) -> bool {
        self.errors.iter().any(|issue| issue.code == code)
    }

    /// Returns true if a warning with the given code was reported.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|issue| issue.code == code)
    }
}
