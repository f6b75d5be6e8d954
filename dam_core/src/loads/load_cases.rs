//! Reservoir loading conditions
//!
//! Assembles the two conditions checked by the single-step method from the
//! individual force functions. Water-dependent forces are omitted from the
//! empty case, not zeroed.

use log::debug;
use serde::{Deserialize, Serialize};

use super::force_types::{ForceCategory, ForceKind};
use super::forces::{self, ForceContribution};
use crate::errors::DamResult;
use crate::geometry::GeometrySpec;
use crate::hydraulics::HydraulicParams;

/// Loading condition name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCaseName {
    /// Reservoir at its design level
    Full,
    /// Reservoir drawn down; self-weight only
    Empty,
}

impl LoadCaseName {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCaseName::Full => "Reservoir full",
            LoadCaseName::Empty => "Reservoir empty",
        }
    }

    /// Whether water acts on the section in this condition
    pub fn has_water(&self) -> bool {
        matches!(self, LoadCaseName::Full)
    }
}

impl std::fmt::Display for LoadCaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ordered set of forces for one loading condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    pub name: LoadCaseName,
    pub contributions: Vec<ForceContribution>,
}

impl LoadCase {
    /// Whether any contribution of `kind` is present
    pub fn contains(&self, kind: ForceKind) -> bool {
        self.contributions.iter().any(|c| c.kind == kind)
    }

    /// Contributions of one kind
    pub fn of_kind(&self, kind: ForceKind) -> impl Iterator<Item = &ForceContribution> {
        self.contributions.iter().filter(move |c| c.kind == kind)
    }

    /// Contributions in one direction category
    pub fn in_category(&self, category: ForceCategory) -> impl Iterator<Item = &ForceContribution> {
        self.contributions.iter().filter(move |c| c.category() == category)
    }

    /// ΣV, downward positive (kN/m)
    pub fn vertical_sum(&self) -> f64 {
        self.in_category(ForceCategory::Vertical).map(|c| c.magnitude_kn).sum()
    }

    /// ΣH, downstream positive (kN/m)
    pub fn horizontal_sum(&self) -> f64 {
        self.in_category(ForceCategory::Horizontal).map(|c| c.magnitude_kn).sum()
    }
}

/// Reservoir full: self-weight, water on the upstream slope, uplift,
/// hydrostatic thrust and wave pressure, in that order.
pub fn build_full(geometry: &GeometrySpec, hydraulics: &HydraulicParams) -> DamResult<LoadCase> {
    geometry.validate()?;
    hydraulics.validate(geometry)?;

    let shapes = geometry.decompose()?;
    let mut contributions = forces::self_weight(&shapes, hydraulics.unit_weight_concrete_kn_m3);
    contributions.extend(forces::water_column_vertical(geometry, hydraulics));
    contributions.extend(forces::uplift(geometry, hydraulics));
    contributions.extend(forces::hydrostatic_horizontal(hydraulics));
    if hydraulics.upstream_depth_m > 0.0 {
        contributions.extend(forces::wave_pressure(hydraulics));
    }

    debug!(
        "Built {} case with {} contributions",
        LoadCaseName::Full,
        contributions.len()
    );

    Ok(LoadCase {
        name: LoadCaseName::Full,
        contributions,
    })
}

/// Reservoir empty: self-weight only.
pub fn build_empty(geometry: &GeometrySpec, hydraulics: &HydraulicParams) -> DamResult<LoadCase> {
    geometry.validate()?;
    hydraulics.validate(geometry)?;

    let shapes = geometry.decompose()?;
    let contributions = forces::self_weight(&shapes, hydraulics.unit_weight_concrete_kn_m3);

    debug!(
        "Built {} case with {} contributions",
        LoadCaseName::Empty,
        contributions.len()
    );

    Ok(LoadCase {
        name: LoadCaseName::Empty,
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydraulics::WaveCoefficients;
    use approx::assert_relative_eq;

    fn section() -> GeometrySpec {
        GeometrySpec::new(16.0, 20.0, 0.1, 0.6, 2.0).unwrap()
    }

    fn params() -> HydraulicParams {
        HydraulicParams {
            upstream_depth_m: 18.0,
            tailwater_depth_m: 2.0,
            unit_weight_water_kn_m3: 9.81,
            unit_weight_concrete_kn_m3: 24.0,
            uplift_factor: 0.5,
            friction_coefficient: 0.7,
            wave_height_m: 1.0,
            wave_coefficients: WaveCoefficients::molitor(),
        }
    }

    #[test]
    fn test_full_case_order() {
        let case = build_full(&section(), &params()).unwrap();
        let kinds: Vec<_> = case.contributions.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ForceKind::SelfWeight,
                ForceKind::SelfWeight,
                ForceKind::SelfWeight,
                ForceKind::WaterColumnVertical,
                ForceKind::Uplift,
                ForceKind::HydrostaticHorizontal,
                ForceKind::HydrostaticHorizontal,
                ForceKind::WavePressure,
            ]
        );
    }

    #[test]
    fn test_empty_case_self_weight_only() {
        let case = build_empty(&section(), &params()).unwrap();
        assert_eq!(case.name, LoadCaseName::Empty);
        assert!(case.contributions.iter().all(|c| c.kind == ForceKind::SelfWeight));
        assert_eq!(case.horizontal_sum(), 0.0);
    }

    #[test]
    fn test_self_weight_identical_in_both_cases() {
        let full = build_full(&section(), &params()).unwrap();
        let empty = build_empty(&section(), &params()).unwrap();
        let full_weight: Vec<_> = full.of_kind(ForceKind::SelfWeight).cloned().collect();
        assert_eq!(full_weight, empty.contributions);
    }

    #[test]
    fn test_wave_absent_without_wave_height() {
        let mut p = params();
        p.wave_height_m = 0.0;
        let full = build_full(&section(), &p).unwrap();
        assert!(!full.contains(ForceKind::WavePressure));
    }

    #[test]
    fn test_sums() {
        let case = build_full(&section(), &params()).unwrap();
        let expected_h = 0.5 * 9.81 * (18.0 * 18.0 - 2.0 * 2.0) + 2.0 * 9.81;
        assert_relative_eq!(case.horizontal_sum(), expected_h, epsilon = 1e-9);
        assert!(case.vertical_sum() > 0.0);
    }

    #[test]
    fn test_builders_are_deterministic() {
        assert_eq!(build_full(&section(), &params()), build_full(&section(), &params()));
        assert_eq!(build_empty(&section(), &params()), build_empty(&section(), &params()));
    }

    #[test]
    fn test_builders_validate_inputs() {
        let mut p = params();
        p.upstream_depth_m = -2.0;
        assert!(build_full(&section(), &p).is_err());
        assert!(build_empty(&section(), &p).is_err());
    }
}
