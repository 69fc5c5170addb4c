//! # Error Types
//!
//! Structured error types for spar_core. Every failure of a single
//! metal/composite evaluation is a `CalcError`, so a batch driver can log it,
//! skip the pairing and carry on with the rest of the sweep.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_mm: f64) -> CalcResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "flange_width_mm".to_string(),
//!             value: width_mm.to_string(),
//!             reason: "Flange width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for spar_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for strength analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, malformed, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Grade absent from the queried catalog partition
    #[error("Material not found: grade '{grade}' is not in the {catalog} catalog")]
    MaterialNotFound { grade: String, catalog: String },

    /// Role tag is neither Shelf nor Panel
    #[error("Unsupported element kind: '{kind}' (expected Shelf or Panel)")]
    UnsupportedElementKind { kind: String },

    /// The metal and composite elements do not form one Shelf and one Panel
    #[error("Incompatible element pairing: metal element is {metal_role}, composite element is {composite_role}; one must be Shelf and the other Panel")]
    IncompatibleElementPairing {
        metal_role: String,
        composite_role: String,
    },

    /// A formula denominator evaluated to zero
    #[error("Division by zero while computing {quantity}")]
    DivisionByZero { quantity: String },

    /// Calculation produced an unusable value (NaN, infinity)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Task variant or group assignment missing from the study
    #[error("Task not found: {task}")]
    TaskNotFound { task: String },

    /// Load case id missing from the study's load table
    #[error("Load case not found: {load_case}")]
    LoadCaseNotFound { load_case: u32 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(grade: impl Into<String>, catalog: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            grade: grade.into(),
            catalog: catalog.into(),
        }
    }

    /// Create an UnsupportedElementKind error
    pub fn unsupported_element_kind(kind: impl Into<String>) -> Self {
        CalcError::UnsupportedElementKind { kind: kind.into() }
    }

    /// Create an IncompatibleElementPairing error
    pub fn incompatible_pairing(metal_role: impl Into<String>, composite_role: impl Into<String>) -> Self {
        CalcError::IncompatibleElementPairing {
            metal_role: metal_role.into(),
            composite_role: composite_role.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(quantity: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            quantity: quantity.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error should stop a whole comparison sweep rather than
    /// only the pairing that raised it.
    ///
    /// An unsupported role tag is a configuration error that every other
    /// pairing would hit as well.
    pub fn aborts_run(&self) -> bool {
        matches!(self, CalcError::UnsupportedElementKind { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::UnsupportedElementKind { .. } => "UNSUPPORTED_ELEMENT_KIND",
            CalcError::IncompatibleElementPairing { .. } => "INCOMPATIBLE_ELEMENT_PAIRING",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::TaskNotFound { .. } => "TASK_NOT_FOUND",
            CalcError::LoadCaseNotFound { .. } => "LOAD_CASE_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::division_by_zero("strength");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"DivisionByZero\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::material_not_found("D16T", "metal").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(CalcError::division_by_zero("h_sum").error_code(), "DIVISION_BY_ZERO");
        assert_eq!(
            CalcError::incompatible_pairing("Shelf", "Shelf").error_code(),
            "INCOMPATIBLE_ELEMENT_PAIRING"
        );
    }

    #[test]
    fn test_pairing_message_names_both_roles() {
        let msg = CalcError::incompatible_pairing("Panel", "Panel").to_string();
        assert!(msg.contains("metal element is Panel"));
        assert!(msg.contains("composite element is Panel"));
    }

    #[test]
    fn test_only_unsupported_kind_aborts_run() {
        assert!(CalcError::unsupported_element_kind("rib").aborts_run());
        assert!(!CalcError::material_not_found("9", "composite").aborts_run());
        assert!(!CalcError::division_by_zero("E_x").aborts_run());
    }
}
