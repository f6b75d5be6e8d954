//! Individual force contributions
//!
//! Each function computes one kind of force from the section and the
//! hydraulic parameters, independent of any load case. Forces that do not
//! arise for the given inputs are returned as `None` or left out of the
//! returned vector rather than reported with zero magnitude.
//!
//! Inputs are expected to have passed [`GeometrySpec::validate`] and
//! [`HydraulicParams::validate`]; the load case builders do that.

use serde::{Deserialize, Serialize};

use super::force_types::{ForceCategory, ForceKind};
use crate::geometry::{GeometrySpec, Shape};
use crate::hydraulics::HydraulicParams;

/// One force acting on the section, per metre run of dam.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kind": "Uplift",
///   "label": "Uplift under base",
///   "magnitude_kn": -882.9,
///   "lever_arm_m": 6.667,
///   "moment_knm": -5886.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceContribution {
    pub kind: ForceKind,

    /// Short label for reports
    pub label: String,

    /// Signed magnitude (kN/m), see [`ForceCategory`] for the convention
    pub magnitude_kn: f64,

    /// Perpendicular distance from the toe to the line of action (m)
    pub lever_arm_m: f64,

    /// magnitude × lever arm (kN·m/m)
    pub moment_knm: f64,
}

impl ForceContribution {
    /// Create a contribution; the moment is derived from magnitude and lever arm.
    pub fn new(kind: ForceKind, label: impl Into<String>, magnitude_kn: f64, lever_arm_m: f64) -> Self {
        ForceContribution {
            kind,
            label: label.into(),
            magnitude_kn,
            lever_arm_m,
            moment_knm: magnitude_kn * lever_arm_m,
        }
    }

    /// Direction category of this force
    pub fn category(&self) -> ForceCategory {
        self.kind.category()
    }

    /// Moment about the toe with resisting moments positive.
    pub fn resisting_moment_knm(&self) -> f64 {
        match self.category() {
            ForceCategory::Vertical => self.moment_knm,
            ForceCategory::Horizontal => -self.moment_knm,
        }
    }
}

/// Self-weight of each elementary shape, in decomposition order.
pub fn self_weight(shapes: &[Shape], unit_weight_concrete_kn_m3: f64) -> Vec<ForceContribution> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            ForceContribution::new(
                ForceKind::SelfWeight,
                format!("W{} {}", i + 1, shape.kind.description().to_lowercase()),
                shape.area_m2 * unit_weight_concrete_kn_m3,
                shape.centroid_from_toe_m,
            )
        })
        .collect()
}

/// Weight of the water body resting on the sloping upstream face.
///
/// The water body lies between the face and the vertical through the heel,
/// from the base up to the reservoir level. When the reservoir rises above the
/// top of the slope, a rectangle sits on top of the wedge.
pub fn water_column_vertical(geometry: &GeometrySpec, hydraulics: &HydraulicParams) -> Option<ForceContribution> {
    let u = geometry.upstream_offset_m();
    let h1 = hydraulics.upstream_depth_m;
    if u <= 0.0 || h1 <= 0.0 {
        return None;
    }

    let heel = geometry.base_width_m;
    let h_u = geometry.upstream_slope_height();

    let (area, centroid_x) = if h1 <= h_u {
        let top_width = u * h1 / h_u;
        (0.5 * top_width * h1, heel - top_width / 3.0)
    } else {
        let wedge = 0.5 * u * h_u;
        let block = u * (h1 - h_u);
        let area = wedge + block;
        let x = (wedge * (heel - u / 3.0) + block * (heel - u / 2.0)) / area;
        (area, x)
    };

    Some(ForceContribution::new(
        ForceKind::WaterColumnVertical,
        "Fv water on upstream slope",
        area * hydraulics.unit_weight_water_kn_m3,
        centroid_x,
    ))
}

/// Uplift under the base.
///
/// Pressure varies linearly from γw·h1 at the heel to γw·h2 at the toe and
/// is scaled by the uplift factor. The magnitude is negative (upward) and the
/// lever arm is the centroid of the pressure diagram from the toe.
pub fn uplift(geometry: &GeometrySpec, hydraulics: &HydraulicParams) -> Option<ForceContribution> {
    let p_heel = hydraulics.heel_pressure_kpa();
    let p_toe = hydraulics.toe_pressure_kpa();
    let p_sum = p_heel + p_toe;
    if p_sum <= 0.0 {
        return None;
    }

    let b = geometry.base_width_m;
    let magnitude = hydraulics.uplift_factor * b * p_sum / 2.0;
    let centroid_x = b * (2.0 * p_heel + p_toe) / (3.0 * p_sum);

    Some(ForceContribution::new(
        ForceKind::Uplift,
        "U uplift under base",
        -magnitude,
        centroid_x,
    ))
}

/// Hydrostatic thrust on the upstream face (positive) and the downstream
/// face (negative), each at one third of its water depth.
pub fn hydrostatic_horizontal(hydraulics: &HydraulicParams) -> Vec<ForceContribution> {
    let gamma_w = hydraulics.unit_weight_water_kn_m3;
    let mut forces = Vec::with_capacity(2);

    let h1 = hydraulics.upstream_depth_m;
    if h1 > 0.0 {
        forces.push(ForceContribution::new(
            ForceKind::HydrostaticHorizontal,
            "Ph1 reservoir thrust",
            0.5 * gamma_w * h1 * h1,
            h1 / 3.0,
        ));
    }

    let h2 = hydraulics.tailwater_depth_m;
    if h2 > 0.0 {
        forces.push(ForceContribution::new(
            ForceKind::HydrostaticHorizontal,
            "Ph2 tailwater thrust",
            -0.5 * gamma_w * h2 * h2,
            h2 / 3.0,
        ));
    }

    forces
}

/// Wave pressure near the reservoir surface.
///
/// `None` unless both the wave height and the upstream depth are positive.
pub fn wave_pressure(hydraulics: &HydraulicParams) -> Option<ForceContribution> {
    let hw = hydraulics.wave_height_m;
    let h1 = hydraulics.upstream_depth_m;
    if hw <= 0.0 || h1 <= 0.0 {
        return None;
    }

    let coefficients = &hydraulics.wave_coefficients;
    Some(ForceContribution::new(
        ForceKind::WavePressure,
        "Pw wave pressure",
        coefficients.force_kn_per_m(hw, hydraulics.unit_weight_water_kn_m3),
        h1 + coefficients.application_ratio * hw,
    ))
}
