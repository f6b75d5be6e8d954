//! # Hydraulic and Material Parameters
//!
//! Water levels, unit weights, uplift and friction, plus the empirical wave
//! relations. Wave-pressure coefficients vary by design code, so they are a
//! configuration input ([`WaveCoefficients`]) rather than constants.
//!
//! ## Example
//!
//! ```rust
//! use dam_core::hydraulics::{HydraulicParams, WaveCoefficients};
//!
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
//! assert!((water.heel_pressure_kpa() - 176.58).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DamError, DamResult};
use crate::geometry::{GeometrySpec, GEOMETRY_TOLERANCE_M};

/// Fetch length (km) at which the Molitor-Stevenson relation switches form.
pub const LONG_FETCH_KM: f64 = 32.0;

/// Empirical wave pressure relation.
///
/// Wave force per metre run: `P = γw · (linear·hw + quadratic·hw²)`, acting
/// `application_ratio · hw` above the still water level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveCoefficients {
    /// Coefficient on wave height (m)
    pub linear: f64,

    /// Coefficient on wave height squared
    pub quadratic: f64,

    /// Height of the resultant above still water, as a fraction of hw
    pub application_ratio: f64,
}

impl WaveCoefficients {
    /// Molitor relation `P = 2 γw hw²` acting at `3/8 hw` above still water.
    pub fn molitor() -> Self {
        WaveCoefficients {
            linear: 0.0,
            quadratic: 2.0,
            application_ratio: 0.375,
        }
    }

    /// Wave force per metre run (kN/m)
    pub fn force_kn_per_m(&self, wave_height_m: f64, unit_weight_water_kn_m3: f64) -> f64 {
        unit_weight_water_kn_m3
            * (self.linear * wave_height_m + self.quadratic * wave_height_m * wave_height_m)
    }

    fn validate(&self) -> DamResult<()> {
        let fields = [
            ("wave_coefficients.linear", self.linear),
            ("wave_coefficients.quadratic", self.quadratic),
            ("wave_coefficients.application_ratio", self.application_ratio),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(DamError::invalid_hydraulics(
                    field,
                    value.to_string(),
                    "Wave coefficient must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

impl Default for WaveCoefficients {
    fn default() -> Self {
        WaveCoefficients::molitor()
    }
}

/// Hydraulic loading and material parameters for one analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "upstream_depth_m": 18.0,
///   "tailwater_depth_m": 0.0,
///   "unit_weight_water_kn_m3": 9.81,
///   "unit_weight_concrete_kn_m3": 24.0,
///   "uplift_factor": 1.0,
///   "friction_coefficient": 0.65,
///   "wave_height_m": 0.0,
///   "wave_coefficients": { "linear": 0.0, "quadratic": 2.0, "application_ratio": 0.375 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydraulicParams {
    /// Reservoir depth at the upstream face, h1 (m)
    pub upstream_depth_m: f64,

    /// Tailwater depth at the downstream face, h2 (m)
    pub tailwater_depth_m: f64,

    /// Unit weight of water γw (kN/m³)
    pub unit_weight_water_kn_m3: f64,

    /// Unit weight of concrete γc (kN/m³)
    pub unit_weight_concrete_kn_m3: f64,

    /// Uplift effectiveness factor c (0 to 1)
    pub uplift_factor: f64,

    /// Coefficient of friction μ between dam and foundation
    pub friction_coefficient: f64,

    /// Wave height hw (m)
    pub wave_height_m: f64,

    /// Empirical wave pressure relation
    #[serde(default)]
    pub wave_coefficients: WaveCoefficients,
}

impl HydraulicParams {
    /// Validate against the section the water acts on.
    ///
    /// Values are never clamped: anything physically impossible fails with
    /// [`DamError::InvalidHydraulicParams`].
    pub fn validate(&self, geometry: &GeometrySpec) -> DamResult<()> {
        let fields = [
            ("upstream_depth_m", self.upstream_depth_m),
            ("tailwater_depth_m", self.tailwater_depth_m),
            ("unit_weight_water_kn_m3", self.unit_weight_water_kn_m3),
            ("unit_weight_concrete_kn_m3", self.unit_weight_concrete_kn_m3),
            ("uplift_factor", self.uplift_factor),
            ("friction_coefficient", self.friction_coefficient),
            ("wave_height_m", self.wave_height_m),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(DamError::invalid_hydraulics(field, value.to_string(), "Value must be finite"));
            }
        }

        for (field, depth) in [
            ("upstream_depth_m", self.upstream_depth_m),
            ("tailwater_depth_m", self.tailwater_depth_m),
        ] {
            if depth < 0.0 {
                return Err(DamError::invalid_hydraulics(
                    field,
                    depth.to_string(),
                    "Water depth cannot be negative",
                ));
            }
            if depth > geometry.height_m + GEOMETRY_TOLERANCE_M {
                return Err(DamError::invalid_hydraulics(
                    field,
                    depth.to_string(),
                    format!("Water depth exceeds the dam height of {} m", geometry.height_m),
                ));
            }
        }

        if self.unit_weight_water_kn_m3 <= 0.0 {
            return Err(DamError::invalid_hydraulics(
                "unit_weight_water_kn_m3",
                self.unit_weight_water_kn_m3.to_string(),
                "Unit weight must be positive",
            ));
        }
        if self.unit_weight_concrete_kn_m3 <= 0.0 {
            return Err(DamError::invalid_hydraulics(
                "unit_weight_concrete_kn_m3",
                self.unit_weight_concrete_kn_m3.to_string(),
                "Unit weight must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.uplift_factor) {
            return Err(DamError::invalid_hydraulics(
                "uplift_factor",
                self.uplift_factor.to_string(),
                "Uplift factor must be between 0 and 1",
            ));
        }
        if self.friction_coefficient < 0.0 {
            return Err(DamError::invalid_hydraulics(
                "friction_coefficient",
                self.friction_coefficient.to_string(),
                "Coefficient of friction cannot be negative",
            ));
        }
        if self.wave_height_m < 0.0 {
            return Err(DamError::invalid_hydraulics(
                "wave_height_m",
                self.wave_height_m.to_string(),
                "Wave height cannot be negative",
            ));
        }

        self.wave_coefficients.validate()
    }

    /// Hydrostatic pressure at the heel, γw·h1 (kPa)
    pub fn heel_pressure_kpa(&self) -> f64 {
        self.unit_weight_water_kn_m3 * self.upstream_depth_m
    }

    /// Hydrostatic pressure at the toe, γw·h2 (kPa)
    pub fn toe_pressure_kpa(&self) -> f64 {
        self.unit_weight_water_kn_m3 * self.tailwater_depth_m
    }
}

/// Estimate significant wave height (m) from fetch and wind speed.
///
/// Molitor-Stevenson:
/// - F ≥ 32 km: `hw = 0.032 √(V·F)`
/// - F < 32 km: `hw = 0.032 √(V·F) + 0.763 − 0.271 F^¼`
pub fn estimate_wave_height(fetch_km: f64, wind_velocity_kmh: f64) -> DamResult<f64> {
    if !fetch_km.is_finite() || fetch_km <= 0.0 {
        return Err(DamError::invalid_hydraulics(
            "fetch_km",
            fetch_km.to_string(),
            "Fetch length must be positive",
        ));
    }
    if !wind_velocity_kmh.is_finite() || wind_velocity_kmh < 0.0 {
        return Err(DamError::invalid_hydraulics(
            "wind_velocity_kmh",
            wind_velocity_kmh.to_string(),
            "Wind velocity cannot be negative",
        ));
    }

    let base = 0.032 * (wind_velocity_kmh * fetch_km).sqrt();
    let hw = if fetch_km >= LONG_FETCH_KM {
        base
    } else {
        base + 0.763 - 0.271 * fetch_km.powf(0.25)
    };
    Ok(hw.max(0.0))
}

/// Wave rise and freeboard derived from a wave height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Freeboard {
    /// Wave height hw (m)
    pub wave_height_m: f64,

    /// Rise of wave against the dam face (m)
    pub rise_of_wave_m: f64,

    /// Freeboard above the still water level (m)
    pub freeboard_m: f64,
}

impl Freeboard {
    /// Rise = amplification × hw; freeboard = allowance + rise.
    pub fn from_wave(wave_height_m: f64, amplification: f64, allowance_m: f64) -> Self {
        let rise_of_wave_m = amplification * wave_height_m;
        Freeboard {
            wave_height_m,
            rise_of_wave_m,
            freeboard_m: allowance_m + rise_of_wave_m,
        }
    }
}
