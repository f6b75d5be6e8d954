//! # Stability Evaluation
//!
//! Reduces a [`LoadCase`] to resultant forces, moments, factors of safety and
//! base stresses, and classifies them against [`DesignCriteria`].
//!
//! ## Sign Convention
//!
//! Moments are taken about the toe. Resisting and overturning moments are
//! accumulated as separate non-negative totals; the net moment is
//! `ΣM = ΣM_resist - ΣM_overturn`, so a positive net moment holds the dam
//! down on its base.
//!
//! ## Formulas
//!
//! - `x̄ = ΣM / ΣV` (resultant location from the toe)
//! - `e = B/2 - x̄` (positive toward the toe)
//! - `FSs = μ·ΣV / |ΣH|`, `FSo = ΣM_resist / ΣM_overturn`
//! - `σ = ΣV/B · (1 ± 6e/B)`, `+` at the toe and `-` at the heel
//! - Principal stress on a sloping face: `σ1 = σv(1 + tan²φ) - p·tan²φ`

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::GeometrySpec;
use crate::hydraulics::HydraulicParams;
use crate::loads::{LoadCase, LoadCaseName};

/// Design code thresholds, passed explicitly to every analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "min_sliding_fs": 1.5,
///   "min_overturning_fs": 1.5,
///   "allowable_compressive_stress_kpa": 4000.0,
///   "tension_permitted": false
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignCriteria {
    /// Minimum factor of safety against sliding
    pub min_sliding_fs: f64,

    /// Minimum factor of safety against overturning
    pub min_overturning_fs: f64,

    /// Allowable compressive base stress (kPa)
    pub allowable_compressive_stress_kpa: f64,

    /// Whether tension at the base is acceptable
    pub tension_permitted: bool,
}

impl Default for DesignCriteria {
    fn default() -> Self {
        DesignCriteria {
            min_sliding_fs: 1.5,
            min_overturning_fs: 1.5,
            allowable_compressive_stress_kpa: 4000.0,
            tension_permitted: false,
        }
    }
}

/// Stability criteria checked for every load case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    Sliding,
    Overturning,
    /// No tension at the base and resultant within the middle third
    NoTension,
    AllowableStress,
}

impl Criterion {
    /// All criteria in report order
    pub const ALL: [Criterion; 4] = [
        Criterion::Sliding,
        Criterion::Overturning,
        Criterion::NoTension,
        Criterion::AllowableStress,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Criterion::Sliding => "Sliding",
            Criterion::Overturning => "Overturning",
            Criterion::NoTension => "No tension / middle third",
            Criterion::AllowableStress => "Allowable stress",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of one criterion for one load case.
///
/// A failed check is a normal analysis result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionCheck {
    pub criterion: Criterion,
    pub case: LoadCaseName,
    /// Governing computed value (factor of safety or stress in kPa)
    #[serde(with = "unbounded")]
    pub computed: f64,
    /// Limit the computed value is compared against
    pub threshold: f64,
    pub passed: bool,
}

/// Stability and base stress results for one load case.
///
/// Factors of safety are `f64::INFINITY` when there is nothing to resist
/// (ΣH = 0 or no overturning moment); they serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    pub case: LoadCaseName,

    /// ΣV, downward positive (kN/m)
    pub sum_vertical_kn: f64,

    /// ΣH, downstream positive (kN/m)
    pub sum_horizontal_kn: f64,

    /// Net moment about the toe, resisting positive (kN·m/m)
    pub sum_moment_knm: f64,

    /// Total resisting moment about the toe (kN·m/m)
    pub resisting_moment_knm: f64,

    /// Total overturning moment about the toe (kN·m/m)
    pub overturning_moment_knm: f64,

    /// Resultant location x̄ from the toe (m); `None` when ΣV ≤ 0
    pub resultant_from_toe_m: Option<f64>,

    /// Eccentricity e = B/2 - x̄ (m); `None` when ΣV ≤ 0
    pub eccentricity_m: Option<f64>,

    /// Factor of safety against sliding
    #[serde(with = "unbounded")]
    pub sliding_fs: f64,

    /// Factor of safety against overturning
    #[serde(with = "unbounded")]
    pub overturning_fs: f64,

    /// Vertical base stress at the heel (kPa, compression positive)
    pub heel_stress_kpa: f64,

    /// Vertical base stress at the toe (kPa, compression positive)
    pub toe_stress_kpa: f64,

    /// Principal stress at the heel along the upstream face (kPa)
    pub principal_heel_stress_kpa: f64,

    /// Principal stress at the toe along the downstream face (kPa)
    pub principal_toe_stress_kpa: f64,

    /// |e| > B/6, or no resultant within the base
    pub middle_third_violated: bool,

    /// Tension at the heel or toe where tension is not permitted
    pub tension_violated: bool,

    /// Maximum base stress exceeds the allowable compressive stress
    pub overstress_violated: bool,

    /// One check per [`Criterion`], in [`Criterion::ALL`] order
    pub checks: Vec<CriterionCheck>,
}

impl StabilityResult {
    /// Whether every criterion passes
    pub fn passes(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Look up the check for one criterion
    pub fn check(&self, criterion: Criterion) -> Option<&CriterionCheck> {
        self.checks.iter().find(|c| c.criterion == criterion)
    }

    /// Checks that did not pass
    pub fn failed_checks(&self) -> impl Iterator<Item = &CriterionCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Larger of the heel and toe stresses (kPa)
    pub fn max_stress_kpa(&self) -> f64 {
        self.heel_stress_kpa.max(self.toe_stress_kpa)
    }

    /// Smaller of the heel and toe stresses (kPa)
    pub fn min_stress_kpa(&self) -> f64 {
        self.heel_stress_kpa.min(self.toe_stress_kpa)
    }
}

/// Serde adapter for factors of safety: `+∞` is written as `null` and
/// `null` reads back as `+∞`.
mod unbounded {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if *value == f64::INFINITY {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Evaluate one load case.
///
/// `geometry` and `hydraulics` must be the inputs the case was built from.
pub fn evaluate(
    case: &LoadCase,
    geometry: &GeometrySpec,
    hydraulics: &HydraulicParams,
    criteria: &DesignCriteria,
) -> StabilityResult {
    let b = geometry.base_width_m;

    let sum_v = case.vertical_sum();
    let sum_h = case.horizontal_sum();

    let mut resisting = 0.0;
    let mut overturning = 0.0;
    for contribution in &case.contributions {
        let m = contribution.resisting_moment_knm();
        if m >= 0.0 {
            resisting += m;
        } else {
            overturning -= m;
        }
    }
    let net = resisting - overturning;

    // The section floats when uplift outweighs it; no resultant on the base.
    let floating = sum_v <= 0.0;
    let resultant = if floating { None } else { Some(net / sum_v) };
    let eccentricity = resultant.map(|x| b / 2.0 - x);

    let sliding_fs = if sum_h == 0.0 {
        f64::INFINITY
    } else {
        hydraulics.friction_coefficient * sum_v / sum_h.abs()
    };
    let overturning_fs = if overturning == 0.0 {
        f64::INFINITY
    } else {
        resisting / overturning
    };

    let mean_stress = sum_v / b;
    let (heel_stress, toe_stress) = match eccentricity {
        Some(e) => (mean_stress * (1.0 - 6.0 * e / b), mean_stress * (1.0 + 6.0 * e / b)),
        None => (mean_stress, mean_stress),
    };

    let (heel_water, toe_water) = if case.name.has_water() {
        (hydraulics.heel_pressure_kpa(), hydraulics.toe_pressure_kpa())
    } else {
        (0.0, 0.0)
    };
    let tan2_up = geometry.effective_upstream_batter().powi(2);
    let tan2_down = geometry.effective_downstream_batter().powi(2);
    let principal_heel = heel_stress * (1.0 + tan2_up) - heel_water * tan2_up;
    let principal_toe = toe_stress * (1.0 + tan2_down) - toe_water * tan2_down;

    let middle_third_violated = match eccentricity {
        Some(e) => e.abs() > b / 6.0,
        None => true,
    };
    let min_stress = heel_stress.min(toe_stress);
    let max_stress = heel_stress.max(toe_stress);
    let tension_violated = !criteria.tension_permitted && min_stress < 0.0;
    let overstress_violated = max_stress > criteria.allowable_compressive_stress_kpa;

    let no_tension_passed =
        !floating && !tension_violated && (!middle_third_violated || criteria.tension_permitted);

    let checks = vec![
        CriterionCheck {
            criterion: Criterion::Sliding,
            case: case.name,
            computed: sliding_fs,
            threshold: criteria.min_sliding_fs,
            passed: sliding_fs >= criteria.min_sliding_fs,
        },
        CriterionCheck {
            criterion: Criterion::Overturning,
            case: case.name,
            computed: overturning_fs,
            threshold: criteria.min_overturning_fs,
            passed: overturning_fs >= criteria.min_overturning_fs,
        },
        CriterionCheck {
            criterion: Criterion::NoTension,
            case: case.name,
            computed: min_stress,
            threshold: 0.0,
            passed: no_tension_passed,
        },
        CriterionCheck {
            criterion: Criterion::AllowableStress,
            case: case.name,
            computed: max_stress,
            threshold: criteria.allowable_compressive_stress_kpa,
            passed: !overstress_violated,
        },
    ];

    debug!(
        "{}: ΣV={:.2} ΣH={:.2} ΣM={:.2} FSs={:.3} FSo={:.3} σ_heel={:.2} σ_toe={:.2}",
        case.name, sum_v, sum_h, net, sliding_fs, overturning_fs, heel_stress, toe_stress
    );

    StabilityResult {
        case: case.name,
        sum_vertical_kn: sum_v,
        sum_horizontal_kn: sum_h,
        sum_moment_knm: net,
        resisting_moment_knm: resisting,
        overturning_moment_knm: overturning,
        resultant_from_toe_m: resultant,
        eccentricity_m: eccentricity,
        sliding_fs,
        overturning_fs,
        heel_stress_kpa: heel_stress,
        toe_stress_kpa: toe_stress,
        principal_heel_stress_kpa: principal_heel,
        principal_toe_stress_kpa: principal_toe,
        middle_third_violated,
        tension_violated,
        overstress_violated,
        checks,
    }
}
