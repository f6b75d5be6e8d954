//! # Design Project Files
//!
//! A `DamProject` groups alternative dam sections for one job. Projects
//! serialize to `.dam` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! DamProject
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! └── designs: HashMap<Uuid, DamDesign>
//!     └── DamDesign (label, geometry, hydraulics, criteria, optional wind)
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dam_core::hydraulics::{estimate_wave_height, Freeboard};
use dam_core::{analyze, AnalysisReport, DamResult, DesignCriteria, GeometrySpec, HydraulicParams};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for .dam files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container serialized to `.dam` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamProject {
    pub meta: ProjectMetadata,

    /// Dam sections, keyed by UUID
    pub designs: HashMap<Uuid, DamDesign>,
}

impl DamProject {
    /// Create a new empty project.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        DamProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            designs: HashMap::new(),
        }
    }

    /// Add a design, returning the UUID assigned to it.
    pub fn add_design(&mut self, design: DamDesign) -> Uuid {
        let id = Uuid::new_v4();
        self.designs.insert(id, design);
        self.touch();
        id
    }

    /// Designs ordered by label, then UUID, for stable report output.
    pub fn designs_by_label(&self) -> Vec<(&Uuid, &DamDesign)> {
        let mut designs: Vec<_> = self.designs.iter().collect();
        designs.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(b.0)));
        designs
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn design_count(&self) -> usize {
        self.designs.len()
    }
}

impl Default for DamProject {
    fn default() -> Self {
        DamProject::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Wind and fetch data used to estimate the design wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindInputs {
    /// Fetch length (km)
    pub fetch_km: f64,

    /// Wind velocity (km/h)
    pub wind_velocity_kmh: f64,

    /// Rise of wave as a multiple of wave height
    pub amplification: f64,

    /// Extra freeboard allowance (m)
    pub freeboard_allowance_m: f64,
}

impl Default for WindInputs {
    fn default() -> Self {
        WindInputs {
            fetch_km: 5.0,
            wind_velocity_kmh: 128.0,
            amplification: 1.33,
            freeboard_allowance_m: 0.14,
        }
    }
}

impl WindInputs {
    /// Wave height and freeboard for these conditions
    pub fn freeboard(&self) -> DamResult<Freeboard> {
        let hw = estimate_wave_height(self.fetch_km, self.wind_velocity_kmh)?;
        Ok(Freeboard::from_wave(hw, self.amplification, self.freeboard_allowance_m))
    }
}

/// One dam section with everything needed to analyze it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamDesign {
    /// User label (e.g., "Section A - spillway")
    pub label: String,

    pub geometry: GeometrySpec,
    pub hydraulics: HydraulicParams,

    #[serde(default)]
    pub criteria: DesignCriteria,

    /// Wind data the wave height was derived from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindInputs>,
}

impl DamDesign {
    /// Run the stability analysis for this design
    pub fn analyze(&self) -> DamResult<AnalysisReport> {
        analyze(&self.geometry, &self.hydraulics, &self.criteria)
    }

    /// Wave characteristics, when wind data is present
    pub fn freeboard(&self) -> Option<DamResult<Freeboard>> {
        self.wind.map(|w| w.freeboard())
    }
}
