//! Plain-text rendering of an [`AnalysisReport`].

use std::fmt::{self, Write};

use dam_core::hydraulics::Freeboard;
use dam_core::{AnalysisReport, Criterion, CriterionCheck, LoadCase, StabilityResult};

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Render a full text report for one design.
pub fn render_report(label: &str, report: &AnalysisReport, freeboard: Option<&Freeboard>) -> String {
    let mut out = String::new();
    // Writing into a String is infallible.
    let _ = write_report(&mut out, label, report, freeboard);
    out
}

pub fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn write_report(
    out: &mut String,
    label: &str,
    report: &AnalysisReport,
    freeboard: Option<&Freeboard>,
) -> fmt::Result {
    let g = &report.geometry;
    let h = &report.hydraulics;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  GRAVITY DAM STABILITY - {}", label)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    writeln!(out, "Section:")?;
    writeln!(out, "  Base width B      {:>10.3} m", g.base_width_m)?;
    writeln!(out, "  Height H          {:>10.3} m", g.height_m)?;
    writeln!(out, "  Crest width T     {:>10.3} m", g.crest_width_m)?;
    writeln!(
        out,
        "  Upstream batter   {:>10.3}   over {:.3} m",
        g.upstream_batter,
        g.upstream_slope_height()
    )?;
    writeln!(
        out,
        "  Downstream batter {:>10.3}   over {:.3} m",
        g.downstream_batter,
        g.downstream_slope_height()
    )?;
    writeln!(out, "  Area              {:>10.3} m²", g.area_m2())?;
    writeln!(out)?;

    writeln!(out, "Water and materials:")?;
    writeln!(out, "  Upstream depth    {:>10.3} m", h.upstream_depth_m)?;
    writeln!(out, "  Tailwater depth   {:>10.3} m", h.tailwater_depth_m)?;
    writeln!(out, "  γw / γc           {:>10.2} / {:.2} kN/m³", h.unit_weight_water_kn_m3, h.unit_weight_concrete_kn_m3)?;
    writeln!(out, "  Uplift factor     {:>10.3}", h.uplift_factor)?;
    writeln!(out, "  Friction μ        {:>10.3}", h.friction_coefficient)?;
    writeln!(out, "  Wave height hw    {:>10.3} m", h.wave_height_m)?;
    if let Some(fb) = freeboard {
        writeln!(out, "  Rise of wave      {:>10.3} m", fb.rise_of_wave_m)?;
        writeln!(out, "  Freeboard         {:>10.3} m", fb.freeboard_m)?;
    }
    writeln!(out)?;

    writeln!(out, "Elementary shapes:")?;
    for shape in &report.shapes {
        writeln!(
            out,
            "  {:<20} A = {:>9.3} m²  x = {:>8.3} m  y = {:>8.3} m",
            shape.kind.description(),
            shape.area_m2,
            shape.centroid_from_toe_m,
            shape.centroid_elevation_m
        )?;
    }

    write_case(out, &report.full_case, &report.full)?;
    write_case(out, &report.empty_case, &report.empty)?;

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    let failed = report.failed_checks().len();
    if report.overall_pass {
        writeln!(out, "  RESULT: ACCEPTED")?;
    } else {
        writeln!(out, "  RESULT: NOT ACCEPTED ({} failed check(s))", failed)?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn write_case(out: &mut String, case: &LoadCase, result: &StabilityResult) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "── {} ──", case.name)?;
    writeln!(
        out,
        "  {:<4} {:<28} {:>12} {:>10} {:>14}",
        "", "Force", "kN/m", "arm (m)", "kN·m/m"
    )?;
    for c in &case.contributions {
        writeln!(
            out,
            "  {:<4} {:<28} {:>12.2} {:>10.3} {:>14.2}",
            c.kind.code(),
            c.label,
            c.magnitude_kn,
            c.lever_arm_m,
            c.moment_knm
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  ΣV = {:.2} kN/m   ΣH = {:.2} kN/m", result.sum_vertical_kn, result.sum_horizontal_kn)?;
    writeln!(
        out,
        "  ΣM resisting = {:.2}   ΣM overturning = {:.2}   net = {:.2} kN·m/m",
        result.resisting_moment_knm, result.overturning_moment_knm, result.sum_moment_knm
    )?;
    match (result.resultant_from_toe_m, result.eccentricity_m) {
        (Some(x), Some(e)) => writeln!(out, "  Resultant x̄ = {:.3} m from toe, e = {:.3} m", x, e)?,
        _ => writeln!(out, "  No resultant within the base (section floats)")?,
    }
    writeln!(
        out,
        "  Base stress: heel {:.1} kPa, toe {:.1} kPa (principal {:.1} / {:.1})",
        result.heel_stress_kpa,
        result.toe_stress_kpa,
        result.principal_heel_stress_kpa,
        result.principal_toe_stress_kpa
    )?;
    writeln!(out)?;
    for check in &result.checks {
        writeln!(
            out,
            "  {:<28} {:<28} {}",
            check.criterion.display_name(),
            describe_check(check),
            status_icon(check.passed)
        )?;
    }
    Ok(())
}

fn describe_check(check: &CriterionCheck) -> String {
    match check.criterion {
        Criterion::Sliding if check.computed.is_infinite() => "no sliding risk".to_string(),
        Criterion::Overturning if check.computed.is_infinite() => "no overturning moment".to_string(),
        Criterion::Sliding | Criterion::Overturning => {
            format!("FS {:.3} (min {:.2})", check.computed, check.threshold)
        }
        Criterion::NoTension => format!("min σ {:.1} kPa", check.computed),
        Criterion::AllowableStress => {
            format!("max σ {:.1} / {:.0} kPa", check.computed, check.threshold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dam_core::{analyze, DesignCriteria, GeometrySpec, HydraulicParams, WaveCoefficients};

    fn hydraulics(upstream_depth_m: f64) -> HydraulicParams {
        HydraulicParams {
            upstream_depth_m,
            tailwater_depth_m: 0.0,
            unit_weight_water_kn_m3: 9.81,
            unit_weight_concrete_kn_m3: 24.0,
            uplift_factor: 0.5,
            friction_coefficient: 0.75,
            wave_height_m: 0.0,
            wave_coefficients: WaveCoefficients::molitor(),
        }
    }

    #[test]
    fn test_accepted_report() {
        let g = GeometrySpec::new(20.0, 20.0, 0.0, 0.85, 3.0).unwrap();
        let report = analyze(&g, &hydraulics(18.0), &DesignCriteria::default()).unwrap();
        let text = render_report("Section A", &report, None);

        assert!(text.contains("GRAVITY DAM STABILITY - Section A"));
        assert!(text.contains("Reservoir full"));
        assert!(text.contains("Reservoir empty"));
        assert!(text.contains("RESULT: ACCEPTED"));
        assert!(!text.contains("[FAIL]"));
        assert!(!text.contains("Rise of wave"));
    }

    #[test]
    fn test_rejected_report() {
        let g = GeometrySpec::new(10.0, 20.0, 0.0, 0.6, 1.0).unwrap();
        let report = analyze(&g, &hydraulics(20.0), &DesignCriteria::default()).unwrap();
        let text = render_report("Slender", &report, None);

        assert!(text.contains("[FAIL]"));
        assert!(text.contains("NOT ACCEPTED"));
    }

    #[test]
    fn test_dry_reservoir_wording() {
        let g = GeometrySpec::new(20.0, 20.0, 0.0, 0.85, 3.0).unwrap();
        let report = analyze(&g, &hydraulics(0.0), &DesignCriteria::default()).unwrap();
        let text = render_report("Dry", &report, None);

        assert!(text.contains("no sliding risk"));
        assert!(text.contains("no overturning moment"));
    }

    #[test]
    fn test_freeboard_lines() {
        let g = GeometrySpec::new(20.0, 20.0, 0.0, 0.85, 3.0).unwrap();
        let mut p = hydraulics(18.0);
        p.wave_height_m = 1.0;
        let report = analyze(&g, &p, &DesignCriteria::default()).unwrap();
        let fb = Freeboard::from_wave(1.0, 1.33, 0.14);
        let text = render_report("Windy", &report, Some(&fb));

        assert!(text.contains("Rise of wave"));
        assert!(text.contains("Pw"));
    }
}
