//! Force kinds acting on a gravity dam section
//!
//! Each kind belongs to a direction category which fixes its sign and
//! moment convention (see [`ForceCategory`]).

use serde::{Deserialize, Serialize};

/// Direction category of a force.
///
/// - `Vertical`: magnitude positive downward, lever arm measured horizontally
///   from the toe. A positive moment resists overturning.
/// - `Horizontal`: magnitude positive toward downstream, lever arm measured
///   as elevation above the base. A positive moment overturns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceCategory {
    Vertical,
    Horizontal,
}

/// Force contributions considered by the single-step method.
///
/// # Example
/// ```
/// use dam_core::loads::{ForceCategory, ForceKind};
///
/// assert_eq!(ForceKind::Uplift.code(), "U");
/// assert_eq!(ForceKind::WavePressure.category(), ForceCategory::Horizontal);
/// assert!(!ForceKind::SelfWeight.is_water_dependent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceKind {
    /// W - Self-weight of the concrete
    SelfWeight,
    /// Fv - Weight of water resting on a sloping upstream face
    WaterColumnVertical,
    /// U - Uplift pressure under the base
    Uplift,
    /// Ph - Hydrostatic pressure on the upstream and downstream faces
    HydrostaticHorizontal,
    /// Pw - Wave pressure near the reservoir surface
    WavePressure,
}

impl ForceKind {
    /// All kinds in load case order
    pub const ALL: [ForceKind; 5] = [
        ForceKind::SelfWeight,
        ForceKind::WaterColumnVertical,
        ForceKind::Uplift,
        ForceKind::HydrostaticHorizontal,
        ForceKind::WavePressure,
    ];

    /// Standard abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            ForceKind::SelfWeight => "W",
            ForceKind::WaterColumnVertical => "Fv",
            ForceKind::Uplift => "U",
            ForceKind::HydrostaticHorizontal => "Ph",
            ForceKind::WavePressure => "Pw",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ForceKind::SelfWeight => "Self-weight",
            ForceKind::WaterColumnVertical => "Water on upstream slope",
            ForceKind::Uplift => "Uplift",
            ForceKind::HydrostaticHorizontal => "Hydrostatic pressure",
            ForceKind::WavePressure => "Wave pressure",
        }
    }

    /// Direction category
    pub fn category(&self) -> ForceCategory {
        match self {
            ForceKind::SelfWeight | ForceKind::WaterColumnVertical | ForceKind::Uplift => {
                ForceCategory::Vertical
            }
            ForceKind::HydrostaticHorizontal | ForceKind::WavePressure => ForceCategory::Horizontal,
        }
    }

    /// Whether the force exists only when water is present
    pub fn is_water_dependent(&self) -> bool {
        !matches!(self, ForceKind::SelfWeight)
    }
}

impl std::fmt::Display for ForceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(ForceKind::SelfWeight.category(), ForceCategory::Vertical);
        assert_eq!(ForceKind::WaterColumnVertical.category(), ForceCategory::Vertical);
        assert_eq!(ForceKind::Uplift.category(), ForceCategory::Vertical);
        assert_eq!(ForceKind::HydrostaticHorizontal.category(), ForceCategory::Horizontal);
        assert_eq!(ForceKind::WavePressure.category(), ForceCategory::Horizontal);
    }

    #[test]
    fn test_only_self_weight_is_dry() {
        let dry: Vec<_> = ForceKind::ALL.iter().filter(|k| !k.is_water_dependent()).collect();
        assert_eq!(dry, vec![&ForceKind::SelfWeight]);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ForceKind::HydrostaticHorizontal).unwrap();
        assert_eq!(json, "\"HydrostaticHorizontal\"");
    }
}
