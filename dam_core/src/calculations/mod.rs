//! # Stability Calculations
//!
//! Each calculation follows the pattern used throughout the crate:
//!
//! - Inputs are plain JSON-serializable values ([`GeometrySpec`],
//!   [`HydraulicParams`], [`DesignCriteria`])
//! - Results are JSON-serializable value objects ([`StabilityResult`],
//!   [`AnalysisReport`])
//! - `analyze(...) -> Result<AnalysisReport, DamError>` is a pure function
//!
//! ## Available Calculations
//!
//! - [`stability`] - Reduce one load case to factors of safety and base stresses
//! - [`analysis`] - Full and empty reservoir checks for a section
//!
//! [`GeometrySpec`]: crate::geometry::GeometrySpec
//! [`HydraulicParams`]: crate::hydraulics::HydraulicParams

pub mod analysis;
pub mod stability;

pub use analysis::{analyze, AnalysisReport};
pub use stability::{evaluate, Criterion, CriterionCheck, DesignCriteria, StabilityResult};
