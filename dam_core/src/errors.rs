//! # Error Types
//!
//! Structured error types for dam_core. Only malformed input is an error:
//! a design that fails a stability criterion is a normal analysis outcome
//! and is reported through [`crate::calculations::CriterionCheck`], never here.
//!
//! ## Example
//!
//! ```rust
//! use dam_core::errors::{DamError, DamResult};
//!
//! fn validate_height(height_m: f64) -> DamResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(DamError::invalid_geometry(
//!             "height_m",
//!             height_m.to_string(),
//!             "Height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dam_core operations
pub type DamResult<T> = Result<T, DamError>;

/// Validation failure raised before any force computation begins.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DamError {
    /// Malformed or degenerate cross-section
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// Physically impossible hydraulic or material value
    #[error("Invalid hydraulic parameter '{field}': {value} - {reason}")]
    InvalidHydraulicParams {
        field: String,
        value: String,
        reason: String,
    },
}

impl DamError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DamError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidHydraulicParams error
    pub fn invalid_hydraulics(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DamError::InvalidHydraulicParams {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &str {
        match self {
            DamError::InvalidGeometry { field, .. } => field,
            DamError::InvalidHydraulicParams { field, .. } => field,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DamError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            DamError::InvalidHydraulicParams { .. } => "INVALID_HYDRAULIC_PARAMS",
        }
    }
}
