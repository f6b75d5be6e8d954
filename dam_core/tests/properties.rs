//! Property tests over randomly generated valid sections and water levels.

use dam_core::loads::{build_empty, build_full, ForceKind};
use dam_core::{analyze, DesignCriteria, GeometrySpec, HydraulicParams, WaveCoefficients};
use proptest::prelude::*;

/// Sections built so that the faces always close over the base.
fn section() -> impl Strategy<Value = GeometrySpec> {
    (
        5.0..80.0f64,  // height
        0.5..8.0f64,   // crest width
        0.0..0.3f64,   // upstream batter
        0.2..=1.0f64,  // upstream slope height fraction
        0.5..40.0f64,  // downstream offset
        0.2..=1.0f64,  // downstream slope height fraction
    )
        .prop_map(|(h, t, m_u, hu_frac, d, hd_frac)| {
            let h_u = hu_frac * h;
            let u = m_u * h_u;
            GeometrySpec {
                base_width_m: u + t + d,
                height_m: h,
                upstream_batter: m_u,
                downstream_batter: d / (hd_frac * h),
                crest_width_m: t,
                upstream_slope_height_m: Some(h_u),
            }
        })
}

fn hydraulics_for(height_m: f64) -> impl Strategy<Value = HydraulicParams> {
    (0.0..=1.0f64, 0.0..0.3f64, 0.0..=1.0f64, 0.3..0.9f64, 0.0..3.0f64).prop_map(
        move |(h1_frac, h2_frac, c, mu, hw)| HydraulicParams {
            upstream_depth_m: h1_frac * height_m,
            tailwater_depth_m: h2_frac * height_m,
            unit_weight_water_kn_m3: 9.81,
            unit_weight_concrete_kn_m3: 24.0,
            uplift_factor: c,
            friction_coefficient: mu,
            wave_height_m: hw,
            wave_coefficients: WaveCoefficients::molitor(),
        },
    )
}

fn design() -> impl Strategy<Value = (GeometrySpec, HydraulicParams)> {
    section().prop_flat_map(|g| (Just(g), hydraulics_for(g.height_m)))
}

proptest! {
    #[test]
    fn shapes_reconstruct_section_area(g in section()) {
        prop_assert!(g.validate().is_ok());
        let total: f64 = g.decompose().unwrap().iter().map(|s| s.area_m2).sum();
        let exact = g.area_m2();
        prop_assert!((total - exact).abs() <= 1e-9 * exact.max(1.0));
        prop_assert!(g.decompose().unwrap().iter().all(|s| s.area_m2 >= 0.0));
    }

    #[test]
    fn empty_case_has_no_water_terms((g, p) in design()) {
        let empty = build_empty(&g, &p).unwrap();
        prop_assert!(empty.contributions.iter().all(|c| !c.kind.is_water_dependent()));
        prop_assert!(!empty.contains(ForceKind::WavePressure));
        prop_assert_eq!(empty.horizontal_sum(), 0.0);

        let report = analyze(&g, &p, &DesignCriteria::default()).unwrap();
        prop_assert_eq!(report.empty.sum_horizontal_kn, 0.0);
    }

    #[test]
    fn wave_absent_when_height_is_zero((g, mut p) in design()) {
        p.wave_height_m = 0.0;
        let full = build_full(&g, &p).unwrap();
        let empty = build_empty(&g, &p).unwrap();
        prop_assert!(!full.contains(ForceKind::WavePressure));
        prop_assert!(!empty.contains(ForceKind::WavePressure));
    }

    #[test]
    fn analysis_is_idempotent((g, p) in design()) {
        let criteria = DesignCriteria::default();
        let first = analyze(&g, &p, &criteria).unwrap();
        let second = analyze(&g, &p, &criteria).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.full.toe_stress_kpa.to_bits(), second.full.toe_stress_kpa.to_bits());
        prop_assert_eq!(first.full.sliding_fs.to_bits(), second.full.sliding_fs.to_bits());
    }

    #[test]
    fn eccentricity_grows_with_uplift(
        (g, p) in design(),
        c_low in 0.0..0.5f64,
        step in 0.01..0.5f64,
    ) {
        prop_assume!(p.upstream_depth_m > 0.5);
        let criteria = DesignCriteria::default();

        let low = HydraulicParams { uplift_factor: c_low, ..p };
        let high = HydraulicParams { uplift_factor: c_low + step, ..p };
        let r_low = analyze(&g, &low, &criteria).unwrap();
        let r_high = analyze(&g, &high, &criteria).unwrap();

        // Uplift shifts the resultant toward the toe while it acts on the
        // heel side of the resultant.
        let uplift_lever = r_low
            .full_case
            .of_kind(ForceKind::Uplift)
            .map(|c| c.lever_arm_m)
            .next()
            .unwrap();
        prop_assume!(r_high.full.resultant_from_toe_m.is_some());
        let x_low = r_low.full.resultant_from_toe_m.unwrap();
        prop_assume!(x_low < uplift_lever);

        let e_low = r_low.full.eccentricity_m.unwrap();
        let e_high = r_high.full.eccentricity_m.unwrap();
        prop_assert!(e_high >= e_low - 1e-9, "e({}) = {} < e({}) = {}", c_low + step, e_high, c_low, e_low);
    }

    #[test]
    fn tailwater_only_is_well_defined((g, mut p) in design()) {
        p.upstream_depth_m = 0.0;
        prop_assume!(p.tailwater_depth_m > 0.0);
        let report = analyze(&g, &p, &DesignCriteria::default()).unwrap();

        prop_assert!(!report.full_case.contains(ForceKind::WavePressure));
        prop_assert!(!report.full.sliding_fs.is_nan());
        prop_assert!(!report.full.overturning_fs.is_nan());
        prop_assert!(report.full.sum_horizontal_kn <= 0.0);
    }
}
