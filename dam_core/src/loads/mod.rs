//! Forces and loading conditions for gravity dam stability
//!
//! # Overview
//!
//! - [`ForceKind`] - The five force contributions of the single-step method
//! - [`ForceContribution`] - One signed force with its lever arm and moment
//! - [`forces`] - Pure functions computing each contribution
//! - [`LoadCase`] - The forces present in one loading condition
//! - [`build_full`] / [`build_empty`] - Reservoir full and empty conditions
//!
//! # Example
//!
//! ```
//! use dam_core::geometry::GeometrySpec;
//! use dam_core::hydraulics::{HydraulicParams, WaveCoefficients};
//! use dam_core::loads::{build_empty, build_full, ForceKind};
//!
//! let section = GeometrySpec::new(15.0, 20.0, 0.0, 0.6, 3.0).unwrap();
//! let water = HydraulicParams {
//!     upstream_depth_m: 18.0,
//!     tailwater_depth_m: 0.0,
//!     unit_weight_water_kn_m3: 9.81,
//!     unit_weight_concrete_kn_m3: 24.0,
//!     uplift_factor: 1.0,
//!     friction_coefficient: 0.65,
//!     wave_height_m: 0.0,
//!     wave_coefficients: WaveCoefficients::molitor(),
//! };
//!
//! let full = build_full(&section, &water).unwrap();
//! let empty = build_empty(&section, &water).unwrap();
//! assert!(full.contains(ForceKind::Uplift));
//! assert!(!empty.contains(ForceKind::Uplift));
//! ```

pub mod force_types;
pub mod forces;
pub mod load_cases;

pub use force_types::{ForceCategory, ForceKind};
pub use forces::ForceContribution;
pub use load_cases::{build_empty, build_full, LoadCase, LoadCaseName};
