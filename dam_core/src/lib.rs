//! # dam_core - Gravity Dam Stability Engine
//!
//! `dam_core` checks a two-dimensional concrete gravity dam section with the
//! single-step method: forces and moments are resolved once for the reservoir
//! full and reservoir empty conditions and compared against sliding,
//! overturning, no-tension and allowable stress criteria.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **No I/O**: Prompting, files and reports belong to the caller
//!
//! ## Quick Start
//!
//! ```rust
//! use dam_core::{analyze, DesignCriteria, GeometrySpec, HydraulicParams, WaveCoefficients};
//!
//! let section = GeometrySpec::new(20.0, 20.0, 0.0, 0.85, 3.0).unwrap();
//! let water = HydraulicParams {
//!     upstream_depth_m: 18.0,
//!     tailwater_depth_m: 0.0,
//!     unit_weight_water_kn_m3: 9.81,
//!     unit_weight_concrete_kn_m3: 24.0,
//!     uplift_factor: 0.5,
//!     friction_coefficient: 0.75,
//!     wave_height_m: 0.5,
//!     wave_coefficients: WaveCoefficients::molitor(),
//! };
//!
//! let report = analyze(&section, &water, &DesignCriteria::default()).unwrap();
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Cross-section description and decomposition
//! - [`hydraulics`] - Water levels, material weights, wave relations
//! - [`loads`] - Force contributions and load cases
//! - [`calculations`] - Stability evaluation and the `analyze` entry point
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod geometry;
pub mod hydraulics;
pub mod loads;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, AnalysisReport, Criterion, CriterionCheck, DesignCriteria, StabilityResult};
pub use errors::{DamError, DamResult};
pub use geometry::{GeometrySpec, Shape, ShapeKind};
pub use hydraulics::{HydraulicParams, WaveCoefficients};
pub use loads::{ForceContribution, ForceKind, LoadCase, LoadCaseName};
