//! # Dam Cross-Section Geometry
//!
//! Describes the 2D silhouette of a gravity dam and decomposes it into the
//! elementary shapes used for self-weight and centroid computation.
//!
//! ## Coordinate System
//!
//! ```text
//!            crest (T)
//!           ┌───────┐  y = H
//!           │       │
//!  downstr. │ block │  upstream
//!   slope  /│       │\  slope (h_u)
//!         / │       │ \
//!   toe  /──┴───────┴──\ heel
//!     x = 0             x = B
//! ```
//!
//! x is measured from the toe towards the heel, y upward from the base.
//! The downstream slope covers `d = B - T - u` of the base and rises at the
//! downstream batter until it meets the crest block.
//!
//! ## Example
//!
//! ```rust
//! use dam_core::geometry::GeometrySpec;
//!
//! let section = GeometrySpec::new(15.0, 20.0, 0.0, 0.6, 3.0).unwrap();
//! let shapes = section.decompose().unwrap();
//! let total: f64 = shapes.iter().map(|s| s.area_m2).sum();
//! assert!((total - section.area_m2()).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DamError, DamResult};

/// Absolute tolerance (m) when checking that the section closes.
pub const GEOMETRY_TOLERANCE_M: f64 = 1e-6;

/// Gravity dam cross-section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "base_width_m": 15.0,
///   "height_m": 20.0,
///   "upstream_batter": 0.0,
///   "downstream_batter": 0.6,
///   "crest_width_m": 3.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySpec {
    /// Base width B (m)
    pub base_width_m: f64,

    /// Total height H (m)
    pub height_m: f64,

    /// Upstream face batter, horizontal run per unit rise
    pub upstream_batter: f64,

    /// Downstream face batter, horizontal run per unit rise
    pub downstream_batter: f64,

    /// Crest (top) width T (m)
    pub crest_width_m: f64,

    /// Height over which the upstream batter applies (m). Defaults to H.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_slope_height_m: Option<f64>,
}

impl GeometrySpec {
    /// Create and validate a section whose upstream batter spans the full height.
    pub fn new(
        base_width_m: f64,
        height_m: f64,
        upstream_batter: f64,
        downstream_batter: f64,
        crest_width_m: f64,
    ) -> DamResult<Self> {
        let spec = GeometrySpec {
            base_width_m,
            height_m,
            upstream_batter,
            downstream_batter,
            crest_width_m,
            upstream_slope_height_m: None,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Restrict the upstream batter to the lower `height_m` of the face.
    pub fn with_upstream_slope_height(mut self, height_m: f64) -> DamResult<Self> {
        self.upstream_slope_height_m = Some(height_m);
        self.validate()?;
        Ok(self)
    }

    /// Closed-form elementary profile with a vertical upstream face.
    ///
    /// Base width follows the no-tension condition for a triangle under full
    /// reservoir with uplift: `B = H / sqrt(Sc - c)` where `Sc = γc / γw`.
    /// The crest block sits on the heel side and the downstream face runs
    /// from the toe to the top of the block.
    pub fn elementary_profile(
        height_m: f64,
        crest_width_m: f64,
        unit_weight_concrete_kn_m3: f64,
        unit_weight_water_kn_m3: f64,
        uplift_factor: f64,
    ) -> DamResult<Self> {
        if unit_weight_water_kn_m3.is_nan() || unit_weight_water_kn_m3 <= 0.0 {
            return Err(DamError::invalid_hydraulics(
                "unit_weight_water_kn_m3",
                unit_weight_water_kn_m3.to_string(),
                "Unit weight of water must be positive",
            ));
        }
        let specific_gravity = unit_weight_concrete_kn_m3 / unit_weight_water_kn_m3;
        if specific_gravity.is_nan() || specific_gravity <= uplift_factor {
            return Err(DamError::invalid_hydraulics(
                "unit_weight_concrete_kn_m3",
                unit_weight_concrete_kn_m3.to_string(),
                "Specific gravity of concrete must exceed the uplift factor",
            ));
        }
        if height_m.is_nan() || height_m <= 0.0 {
            return Err(DamError::invalid_geometry(
                "height_m",
                height_m.to_string(),
                "Height must be positive",
            ));
        }

        let base_width_m = height_m / (specific_gravity - uplift_factor).sqrt();
        if crest_width_m >= base_width_m {
            return Err(DamError::invalid_geometry(
                "crest_width_m",
                crest_width_m.to_string(),
                format!("Crest width must be less than the elementary base width {:.3} m", base_width_m),
            ));
        }
        let downstream_batter = (base_width_m - crest_width_m) / height_m;

        GeometrySpec::new(base_width_m, height_m, 0.0, downstream_batter, crest_width_m)
    }

    /// Validate the section.
    ///
    /// Fails with [`DamError::InvalidGeometry`] for non-positive base or height,
    /// negative batters or crest width, or when the faces cannot close into a
    /// simple polygon over the given base and reach the full height.
    pub fn validate(&self) -> DamResult<()> {
        let fields = [
            ("base_width_m", self.base_width_m),
            ("height_m", self.height_m),
            ("upstream_batter", self.upstream_batter),
            ("downstream_batter", self.downstream_batter),
            ("crest_width_m", self.crest_width_m),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(DamError::invalid_geometry(field, value.to_string(), "Value must be finite"));
            }
        }

        if self.base_width_m <= 0.0 {
            return Err(DamError::invalid_geometry(
                "base_width_m",
                self.base_width_m.to_string(),
                "Base width must be positive",
            ));
        }
        if self.height_m <= 0.0 {
            return Err(DamError::invalid_geometry(
                "height_m",
                self.height_m.to_string(),
                "Height must be positive",
            ));
        }
        if self.upstream_batter < 0.0 {
            return Err(DamError::invalid_geometry(
                "upstream_batter",
                self.upstream_batter.to_string(),
                "Batter cannot be negative",
            ));
        }
        if self.downstream_batter < 0.0 {
            return Err(DamError::invalid_geometry(
                "downstream_batter",
                self.downstream_batter.to_string(),
                "Batter cannot be negative",
            ));
        }
        if self.crest_width_m < 0.0 {
            return Err(DamError::invalid_geometry(
                "crest_width_m",
                self.crest_width_m.to_string(),
                "Crest width cannot be negative",
            ));
        }
        if let Some(h_u) = self.upstream_slope_height_m {
            if !h_u.is_finite() || h_u <= 0.0 || h_u > self.height_m + GEOMETRY_TOLERANCE_M {
                return Err(DamError::invalid_geometry(
                    "upstream_slope_height_m",
                    h_u.to_string(),
                    "Upstream slope height must be within (0, H]",
                ));
            }
        }

        let covered = self.upstream_offset_m() + self.crest_width_m;
        if covered > self.base_width_m + GEOMETRY_TOLERANCE_M {
            return Err(DamError::invalid_geometry(
                "crest_width_m",
                self.crest_width_m.to_string(),
                format!(
                    "Upstream offset plus crest width ({:.3} m) exceeds base width ({:.3} m)",
                    covered, self.base_width_m
                ),
            ));
        }

        let d = self.base_width_m - covered;
        if d > GEOMETRY_TOLERANCE_M {
            if self.downstream_batter == 0.0 {
                return Err(DamError::invalid_geometry(
                    "downstream_batter",
                    self.downstream_batter.to_string(),
                    format!("Vertical downstream face leaves {:.3} m of base uncovered", d),
                ));
            }
            let h_d = d / self.downstream_batter;
            if h_d > self.height_m + GEOMETRY_TOLERANCE_M {
                return Err(DamError::invalid_geometry(
                    "downstream_batter",
                    self.downstream_batter.to_string(),
                    format!(
                        "Downstream slope would rise {:.3} m, above the dam height of {:.3} m",
                        h_d, self.height_m
                    ),
                ));
            }
        }

        // Without a crest block every sloping face has to reach the top,
        // otherwise the section ends in a zero-width spike below H.
        if self.crest_width_m <= GEOMETRY_TOLERANCE_M {
            let top = self.height_m - GEOMETRY_TOLERANCE_M;
            let u = self.upstream_offset_m();
            let h_u = self.upstream_slope_height();
            if u > GEOMETRY_TOLERANCE_M && h_u < top {
                return Err(DamError::invalid_geometry(
                    "crest_width_m",
                    self.crest_width_m.to_string(),
                    format!(
                        "Without a crest block the upstream slope must reach the dam height ({:.3} m), it stops at {:.3} m",
                        self.height_m, h_u
                    ),
                ));
            }
            if d > GEOMETRY_TOLERANCE_M {
                let h_d = d / self.downstream_batter;
                if h_d < top {
                    return Err(DamError::invalid_geometry(
                        "crest_width_m",
                        self.crest_width_m.to_string(),
                        format!(
                            "Without a crest block the downstream slope must reach the dam height ({:.3} m), it stops at {:.3} m",
                            self.height_m, h_d
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Height over which the upstream batter applies (m)
    pub fn upstream_slope_height(&self) -> f64 {
        self.upstream_slope_height_m.unwrap_or(self.height_m)
    }

    /// Horizontal projection of the upstream slope, u (m)
    pub fn upstream_offset_m(&self) -> f64 {
        self.upstream_batter * self.upstream_slope_height()
    }

    /// Horizontal projection of the downstream slope, d (m)
    pub fn downstream_offset_m(&self) -> f64 {
        let d = self.base_width_m - self.upstream_offset_m() - self.crest_width_m;
        if d > GEOMETRY_TOLERANCE_M {
            d
        } else {
            0.0
        }
    }

    /// Elevation where the downstream slope meets the crest block (m)
    pub fn downstream_slope_height(&self) -> f64 {
        let d = self.downstream_offset_m();
        if d > 0.0 {
            d / self.downstream_batter
        } else {
            0.0
        }
    }

    /// Effective upstream batter; zero when the upstream face is vertical.
    pub fn effective_upstream_batter(&self) -> f64 {
        if self.upstream_offset_m() > 0.0 {
            self.upstream_batter
        } else {
            0.0
        }
    }

    /// Effective downstream batter; zero when the downstream slope vanishes.
    pub fn effective_downstream_batter(&self) -> f64 {
        if self.downstream_offset_m() > 0.0 {
            self.downstream_batter
        } else {
            0.0
        }
    }

    /// Decompose the section into elementary shapes.
    ///
    /// Canonical order: crest block, upstream triangle, downstream triangle.
    /// Shapes with zero area are left out.
    pub fn decompose(&self) -> DamResult<Vec<Shape>> {
        self.validate()?;

        let b = self.base_width_m;
        let h = self.height_m;
        let t = self.crest_width_m;
        let u = self.upstream_offset_m();
        let h_u = self.upstream_slope_height();
        let d = self.downstream_offset_m();
        let h_d = self.downstream_slope_height();

        let candidates = [
            Shape {
                kind: ShapeKind::CrestBlock,
                area_m2: t * h,
                centroid_from_toe_m: d + t / 2.0,
                centroid_elevation_m: h / 2.0,
            },
            Shape {
                kind: ShapeKind::UpstreamTriangle,
                area_m2: 0.5 * u * h_u,
                centroid_from_toe_m: b - 2.0 * u / 3.0,
                centroid_elevation_m: h_u / 3.0,
            },
            Shape {
                kind: ShapeKind::DownstreamTriangle,
                area_m2: 0.5 * d * h_d,
                centroid_from_toe_m: 2.0 * d / 3.0,
                centroid_elevation_m: h_d / 3.0,
            },
        ];

        Ok(candidates.into_iter().filter(|s| s.area_m2 > 0.0).collect())
    }

    /// Section outline, counter-clockwise from the toe.
    ///
    /// Coincident vertices are kept so the vertex count is always six.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let b = self.base_width_m;
        let h = self.height_m;
        let t = self.crest_width_m;
        let d = self.downstream_offset_m();
        vec![
            (0.0, 0.0),
            (b, 0.0),
            (d + t, self.upstream_slope_height()),
            (d + t, h),
            (d, h),
            (d, self.downstream_slope_height()),
        ]
    }

    /// Cross-section area from the outline (shoelace formula), m²
    pub fn area_m2(&self) -> f64 {
        let pts = self.outline();
        let n = pts.len();
        let twice_area: f64 = (0..n)
            .map(|i| {
                let (x0, y0) = pts[i];
                let (x1, y1) = pts[(i + 1) % n];
                x0 * y1 - x1 * y0
            })
            .sum();
        0.5 * twice_area
    }

    /// Horizontal width of the section at elevation `y_m`
    pub fn width_at(&self, y_m: f64) -> f64 {
        if y_m < 0.0 || y_m > self.height_m {
            return 0.0;
        }
        let mut width = self.crest_width_m;

        let h_u = self.upstream_slope_height();
        if y_m < h_u {
            width += self.upstream_offset_m() * (1.0 - y_m / h_u);
        }

        let h_d = self.downstream_slope_height();
        if h_d > 0.0 && y_m < h_d {
            width += self.downstream_offset_m() * (1.0 - y_m / h_d);
        }

        width
    }
}

/// Kind of elementary shape in the decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Upright rectangular block under the crest
    CrestBlock,
    /// Triangle under the sloping upstream face
    UpstreamTriangle,
    /// Triangle under the sloping downstream face
    DownstreamTriangle,
}

impl ShapeKind {
    /// Human-readable name
    pub fn description(&self) -> &'static str {
        match self {
            ShapeKind::CrestBlock => "Crest block",
            ShapeKind::UpstreamTriangle => "Upstream triangle",
            ShapeKind::DownstreamTriangle => "Downstream triangle",
        }
    }
}

/// Elementary shape with its area and centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,

    /// Area per metre run (m²)
    pub area_m2: f64,

    /// Horizontal distance of the centroid from the toe (m)
    pub centroid_from_toe_m: f64,

    /// Elevation of the centroid above the base (m)
    pub centroid_elevation_m: f64,
}
