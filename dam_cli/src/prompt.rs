//! Interactive parameter entry.
//!
//! Every prompt shows its default in brackets; an empty line, end of input or
//! an unparseable answer keeps the default. The wave height is estimated from
//! fetch and wind speed, the dam height is the water depth plus freeboard and
//! the suggested base width comes from the elementary profile.

use std::io::{BufRead, Write};

use dam_core::{DesignCriteria, GeometrySpec, HydraulicParams, WaveCoefficients};
use log::debug;

use crate::errors::CliResult;
use crate::project::{DamDesign, WindInputs};

const DEFAULT_LABEL: &str = "Section 1";
const DEFAULT_UPSTREAM_DEPTH_M: f64 = 45.0;
const DEFAULT_CREST_WIDTH_M: f64 = 7.5;
const DEFAULT_UNIT_WEIGHT_CONCRETE: f64 = 22.0;
const DEFAULT_UNIT_WEIGHT_WATER: f64 = 10.0;
const DEFAULT_FRICTION: f64 = 0.75;
const DEFAULT_UPLIFT_FACTOR: f64 = 0.5;

/// Line-oriented prompter over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print `prompt` and return the trimmed answer, or `None` when the user
    /// entered nothing or input is exhausted.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        write!(self.output, "{}", prompt).ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let answer = line.trim();
                (!answer.is_empty()).then(|| answer.to_string())
            }
        }
    }

    pub fn read_f64(&mut self, label: &str, default: f64) -> f64 {
        self.ask(&format!("{} [{}]: ", label, format_default(default)))
            .and_then(|a| a.parse::<f64>().ok())
            .unwrap_or(default)
    }

    pub fn read_bool(&mut self, label: &str, default: bool) -> bool {
        let hint = if default { "Y/n" } else { "y/N" };
        match self.ask(&format!("{} [{}]: ", label, hint)).map(|a| a.to_lowercase()) {
            Some(a) if matches!(a.as_str(), "y" | "yes" | "true") => true,
            Some(a) if matches!(a.as_str(), "n" | "no" | "false") => false,
            _ => default,
        }
    }

    pub fn read_string(&mut self, label: &str, default: &str) -> String {
        self.ask(&format!("{} [{}]: ", label, default))
            .unwrap_or_else(|| default.to_string())
    }

    /// Print an informational line between prompts.
    pub fn note(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    /// Walk the user through one design.
    pub fn prompt_design(&mut self) -> CliResult<DamDesign> {
        let label = self.read_string("Design label", DEFAULT_LABEL);

        self.note("\nReservoir");
        let upstream_depth_m = self.read_f64("  Upstream water depth (m)", DEFAULT_UPSTREAM_DEPTH_M);
        let tailwater_depth_m = self.read_f64("  Tailwater depth (m)", 0.0);

        self.note("\nWind and waves");
        let defaults = WindInputs::default();
        let wind = WindInputs {
            fetch_km: self.read_f64("  Fetch length (km)", defaults.fetch_km),
            wind_velocity_kmh: self.read_f64("  Wind velocity (km/h)", defaults.wind_velocity_kmh),
            amplification: self.read_f64("  Rise of wave / wave height", defaults.amplification),
            freeboard_allowance_m: self.read_f64("  Freeboard allowance (m)", defaults.freeboard_allowance_m),
        };
        let freeboard = wind.freeboard()?;
        self.note(&format!(
            "  -> wave height {:.3} m, rise {:.3} m, freeboard {:.3} m",
            freeboard.wave_height_m, freeboard.rise_of_wave_m, freeboard.freeboard_m
        ));

        self.note("\nMaterials");
        let unit_weight_concrete = self.read_f64("  Unit weight of concrete (kN/m³)", DEFAULT_UNIT_WEIGHT_CONCRETE);
        let unit_weight_water = self.read_f64("  Unit weight of water (kN/m³)", DEFAULT_UNIT_WEIGHT_WATER);
        let friction_coefficient = self.read_f64("  Coefficient of friction", DEFAULT_FRICTION);
        let uplift_factor = self.read_f64("  Uplift factor (0-1)", DEFAULT_UPLIFT_FACTOR);

        self.note("\nSection");
        let height_m = self.read_f64("  Dam height (m)", upstream_depth_m + freeboard.freeboard_m);
        let crest_width_m = self.read_f64("  Crest width (m)", DEFAULT_CREST_WIDTH_M);
        let profile = GeometrySpec::elementary_profile(
            height_m,
            crest_width_m,
            unit_weight_concrete,
            unit_weight_water,
            uplift_factor,
        )?;
        debug!(
            "elementary profile: B={:.3} m_d={:.4}",
            profile.base_width_m, profile.downstream_batter
        );
        let base_width_m = self.read_f64("  Base width (m)", profile.base_width_m);
        let upstream_batter = self.read_f64("  Upstream batter (H/V)", 0.0);
        let downstream_batter = self.read_f64("  Downstream batter (H/V)", profile.downstream_batter);

        self.note("\nCriteria");
        let base_criteria = DesignCriteria::default();
        let criteria = DesignCriteria {
            allowable_compressive_stress_kpa: self.read_f64(
                "  Allowable compressive stress (kPa)",
                base_criteria.allowable_compressive_stress_kpa,
            ),
            tension_permitted: self.read_bool("  Permit tension at the base?", base_criteria.tension_permitted),
            ..base_criteria
        };

        let geometry = GeometrySpec::new(base_width_m, height_m, upstream_batter, downstream_batter, crest_width_m)?;
        let hydraulics = HydraulicParams {
            upstream_depth_m,
            tailwater_depth_m,
            unit_weight_water_kn_m3: unit_weight_water,
            unit_weight_concrete_kn_m3: unit_weight_concrete,
            uplift_factor,
            friction_coefficient,
            wave_height_m: freeboard.wave_height_m,
            wave_coefficients: WaveCoefficients::molitor(),
        };

        Ok(DamDesign {
            label,
            geometry,
            hydraulics,
            criteria,
            wind: Some(wind),
        })
    }
}

/// Up to three decimals without trailing zeros: 45 -> "45", 0.140 -> "0.14".
fn format_default(value: f64) -> String {
    let text = format!("{:.3}", value);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_format_default() {
        assert_eq!(format_default(45.0), "45");
        assert_eq!(format_default(0.14), "0.14");
        assert_eq!(format_default(35.8123), "35.812");
    }

    #[test]
    fn test_read_f64_defaults() {
        let mut p = prompter("\nabc\n12.5\n");
        assert_eq!(p.read_f64("a", 1.0), 1.0);
        assert_eq!(p.read_f64("b", 2.0), 2.0);
        assert_eq!(p.read_f64("c", 3.0), 12.5);
        // input exhausted
        assert_eq!(p.read_f64("d", 4.0), 4.0);
    }

    #[test]
    fn test_read_bool() {
        let mut p = prompter("y\nNO\nmaybe\n");
        assert!(p.read_bool("a", false));
        assert!(!p.read_bool("b", true));
        assert!(p.read_bool("c", true));
    }

    #[test]
    fn test_prompt_shows_default() {
        let mut p = prompter("\n");
        p.read_f64("Crest width (m)", 7.5);
        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown, "Crest width (m) [7.5]: ");
    }

    #[test]
    fn test_prompt_design_all_defaults() {
        let design = prompter("").prompt_design().unwrap();
        assert_eq!(design.label, DEFAULT_LABEL);

        let wind = design.wind.unwrap();
        let fb = wind.freeboard().unwrap();
        // 0.032√640 + 0.763 - 0.271·5^¼
        assert_relative_eq!(fb.wave_height_m, 1.1673, epsilon = 1e-3);
        assert_relative_eq!(design.hydraulics.wave_height_m, fb.wave_height_m);
        assert_relative_eq!(design.geometry.height_m, 45.0 + fb.freeboard_m);

        // B = H / √(Sc - c) with Sc = 2.2, c = 0.5
        let expected_b = design.geometry.height_m / 1.7f64.sqrt();
        assert_relative_eq!(design.geometry.base_width_m, expected_b, epsilon = 1e-9);
        assert_eq!(design.geometry.crest_width_m, 7.5);
        assert_eq!(design.criteria, DesignCriteria::default());

        assert!(design.analyze().is_ok());
    }

    #[test]
    fn test_prompt_design_overrides() {
        let input = "Spillway\n30\n2\n";
        let design = prompter(input).prompt_design().unwrap();
        assert_eq!(design.label, "Spillway");
        assert_eq!(design.hydraulics.upstream_depth_m, 30.0);
        assert_eq!(design.hydraulics.tailwater_depth_m, 2.0);
        assert!(design.geometry.height_m > 30.0);
    }

    #[test]
    fn test_prompt_design_rejects_bad_materials() {
        // Concrete lighter than the uplift allows: no elementary profile.
        let input = "\n\n\n\n\n\n\n5\n10\n0.7\n0.9\n";
        let err = prompter(input).prompt_design().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_HYDRAULIC_PARAMS");
    }
}
