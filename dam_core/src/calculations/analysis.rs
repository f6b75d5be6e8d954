//! # Dam Analysis
//!
//! Runs the single-step method end to end: validates the inputs, builds the
//! reservoir full and empty load cases, evaluates both and reports whether the
//! design is accepted.
//!
//! ## Example
//!
//! ```rust
//! use dam_core::calculations::{analyze, DesignCriteria};
//! use dam_core::geometry::GeometrySpec;
//! use dam_core::hydraulics::{HydraulicParams, WaveCoefficients};
//!
//! let section = GeometrySpec::new(15.0, 20.0, 0.0, 0.6, 3.0).unwrap();
//! let water = HydraulicParams {
//!     upstream_depth_m: 18.0,
//!     tailwater_depth_m: 0.0,
//!     unit_weight_water_kn_m3: 9.81,
//!     unit_weight_concrete_kn_m3: 24.0,
//!     uplift_factor: 0.5,
//!     friction_coefficient: 0.75,
//!     wave_height_m: 0.0,
//!     wave_coefficients: WaveCoefficients::molitor(),
//! };
//!
//! let report = analyze(&section, &water, &DesignCriteria::default()).unwrap();
//! assert!(report.empty.passes());
//! println!("Accepted: {}", report.overall_pass);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::stability::{evaluate, CriterionCheck, DesignCriteria, StabilityResult};
use crate::errors::DamResult;
use crate::geometry::{GeometrySpec, Shape};
use crate::hydraulics::HydraulicParams;
use crate::loads::{build_empty, build_full, LoadCase};

/// Complete analysis outcome handed to the presentation layer.
///
/// Contains values only: no formatting, unit labels or locale concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub geometry: GeometrySpec,
    pub hydraulics: HydraulicParams,
    pub criteria: DesignCriteria,

    /// Elementary shapes of the section, in canonical order
    pub shapes: Vec<Shape>,

    /// Forces acting with the reservoir full
    pub full_case: LoadCase,

    /// Forces acting with the reservoir empty
    pub empty_case: LoadCase,

    /// Results with the reservoir full
    pub full: StabilityResult,

    /// Results with the reservoir empty
    pub empty: StabilityResult,

    /// Both cases pass every criterion
    pub overall_pass: bool,
}

impl AnalysisReport {
    /// Results for both cases, full first
    pub fn results(&self) -> [&StabilityResult; 2] {
        [&self.full, &self.empty]
    }

    /// Every failed check across both cases
    pub fn failed_checks(&self) -> Vec<&CriterionCheck> {
        self.results().into_iter().flat_map(|r| r.failed_checks()).collect()
    }
}

/// Analyze a dam section.
///
/// # Returns
///
/// * `Ok(AnalysisReport)` - Results for both cases, pass or fail
/// * `Err(DamError)` - If the geometry or hydraulic inputs are invalid;
///   nothing is computed in that case
pub fn analyze(
    geometry: &GeometrySpec,
    hydraulics: &HydraulicParams,
    criteria: &DesignCriteria,
) -> DamResult<AnalysisReport> {
    geometry.validate()?;
    hydraulics.validate(geometry)?;

    let shapes = geometry.decompose()?;
    let full_case = build_full(geometry, hydraulics)?;
    let empty_case = build_empty(geometry, hydraulics)?;

    let full = evaluate(&full_case, geometry, hydraulics, criteria);
    let empty = evaluate(&empty_case, geometry, hydraulics, criteria);
    let overall_pass = full.passes() && empty.passes();

    debug!(
        "Analysis complete: B={} m, H={} m, accepted={}",
        geometry.base_width_m, geometry.height_m, overall_pass
    );

    Ok(AnalysisReport {
        geometry: *geometry,
        hydraulics: *hydraulics,
        criteria: *criteria,
        shapes,
        full_case,
        empty_case,
        full,
        empty,
        overall_pass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::Criterion;
    use crate::errors::DamError;
    use crate::hydraulics::WaveCoefficients;
    use crate::loads::{ForceKind, LoadCaseName};

    fn params() -> HydraulicParams {
        HydraulicParams {
            upstream_depth_m: 18.0,
            tailwater_depth_m: 0.0,
            unit_weight_water_kn_m3: 9.81,
            unit_weight_concrete_kn_m3: 24.0,
            uplift_factor: 1.0,
            friction_coefficient: 0.65,
            wave_height_m: 0.0,
            wave_coefficients: WaveCoefficients::molitor(),
        }
    }

    #[test]
    fn test_reference_example_full_reservoir() {
        // B = 10, H = 20, crest 1 m, vertical upstream face, downstream batter 0.6
        let g = GeometrySpec::new(10.0, 20.0, 0.0, 0.6, 1.0).unwrap();
        let report = analyze(&g, &params(), &DesignCriteria::default()).unwrap();

        let full = &report.full;
        assert!(full.sum_horizontal_kn > 0.0);

        let uplift: f64 = report
            .full_case
            .of_kind(ForceKind::Uplift)
            .map(|c| c.magnitude_kn.abs())
            .sum();
        let thrust: f64 = report
            .full_case
            .of_kind(ForceKind::HydrostaticHorizontal)
            .map(|c| c.magnitude_kn.abs())
            .sum();
        assert!(uplift > 0.0 && uplift < thrust);

        let e = full.eccentricity_m.unwrap();
        assert_eq!(full.middle_third_violated, e.abs() > 10.0 / 6.0);
        assert!(full.middle_third_violated);
        assert!(!report.overall_pass);
    }

    #[test]
    fn test_accepted_design() {
        // Elementary profile with partial uplift and a generous base
        let g = GeometrySpec::new(20.0, 20.0, 0.0, 0.85, 3.0).unwrap();
        let mut p = params();
        p.uplift_factor = 0.5;
        p.friction_coefficient = 0.75;
        let report = analyze(&g, &p, &DesignCriteria::default()).unwrap();

        assert!(report.full.passes(), "{:?}", report.failed_checks());
        assert!(report.empty.passes(), "{:?}", report.failed_checks());
        assert!(report.overall_pass);
        assert!(report.failed_checks().is_empty());
    }

    #[test]
    fn test_invalid_geometry_aborts() {
        let g = GeometrySpec {
            base_width_m: -1.0,
            height_m: 20.0,
            upstream_batter: 0.0,
            downstream_batter: 0.6,
            crest_width_m: 0.0,
            upstream_slope_height_m: None,
        };
        let err = analyze(&g, &params(), &DesignCriteria::default()).unwrap_err();
        assert!(matches!(err, DamError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_invalid_hydraulics_aborts() {
        let g = GeometrySpec::new(10.0, 20.0, 0.0, 0.6, 1.0).unwrap();
        let mut p = params();
        p.unit_weight_water_kn_m3 = -9.81;
        let err = analyze(&g, &p, &DesignCriteria::default()).unwrap_err();
        assert!(matches!(err, DamError::InvalidHydraulicParams { .. }));
    }

    #[test]
    fn test_tailwater_only() {
        let g = GeometrySpec::new(15.0, 20.0, 0.0, 0.6, 3.0).unwrap();
        let mut p = params();
        p.upstream_depth_m = 0.0;
        p.tailwater_depth_m = 4.0;
        p.wave_height_m = 1.0;
        let report = analyze(&g, &p, &DesignCriteria::default()).unwrap();

        assert!(!report.full_case.contains(ForceKind::WavePressure));
        assert!(report.full.sum_horizontal_kn < 0.0);
        assert!(report.full.sliding_fs.is_finite());
        assert!(report.full.sliding_fs > 0.0);
        assert!(!report.full.overturning_fs.is_nan());
    }

    #[test]
    fn test_dry_reservoir_has_unbounded_factors() {
        let g = GeometrySpec::new(15.0, 20.0, 0.0, 0.6, 3.0).unwrap();
        let mut p = params();
        p.upstream_depth_m = 0.0;
        let report = analyze(&g, &p, &DesignCriteria::default()).unwrap();
        assert_eq!(report.full.sum_horizontal_kn, 0.0);
        assert_eq!(report.full.sliding_fs, f64::INFINITY);
        assert!(report.full.check(Criterion::Sliding).unwrap().passed);
    }

    #[test]
    fn test_report_serializes() {
        let g = GeometrySpec::new(15.0, 20.0, 0.0, 0.6, 3.0).unwrap();
        let report = analyze(&g, &params(), &DesignCriteria::default()).unwrap();
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"overall_pass\""));
        assert!(json.contains("\"Full\""));
        assert_eq!(report.empty.case, LoadCaseName::Empty);

        // Unbounded factors of the empty case survive a round trip
        assert_eq!(report.empty.sliding_fs, f64::INFINITY);
        let roundtrip: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, report);
        assert_eq!(roundtrip.empty.overturning_fs, f64::INFINITY);
        assert_eq!(
            roundtrip.empty.check(Criterion::Sliding).unwrap().computed,
            f64::INFINITY
        );
    }
}
