//! Closed-form acid-base equilibrium math for a weak acid (acetic acid)
//! titrated with a strong base (NaOH).
//!
//! The formulas are the simplified teaching model: mL x mol/L is used
//! directly as the mole quantity (a millimole proxy, never scaled by 0.001),
//! and the pre-equivalence branch omits the total-volume dilution term.
//! Both conventions are load-bearing for numeric compatibility with the
//! published pH curves and must not be "corrected".

use crate::constants::{
    ANALYTE_CONCENTRATION_M, KA_ACETIC_ACID, KW_WATER, NEUTRAL_PH, PH_SCALE_MAX, PH_SCALE_MIN,
    TITRANT_CONCENTRATION_M,
};
use crate::error::TitrationError;

/// Which side of the equivalence point a given mixture sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitrationRegion {
    /// Un-neutralized acid remains; pH governed by the weak-acid approximation
    ExcessAcid,
    /// Moles of base exactly equal moles of acid
    Equivalence,
    /// Base has overshot the acid; pH governed by the excess hydroxide
    ExcessBase,
}

/// Raw pH formula, no input validation.
///
/// Callers that hold already-validated state (e.g. the experiment loop) use
/// this directly; external callers should go through [`compute_ph`].
///
/// # Arguments
/// - `titrant_volume_ml`: cumulative NaOH volume added
/// - `analyte_volume_ml`: initial acid volume
/// - `analyte_conc_m` / `titrant_conc_m`: solution concentrations in mol/L
///
/// # Returns
/// pH of the mixture; exactly 7.0 when the mole difference is bit-exact zero.
pub fn ph_for_mix(
    titrant_volume_ml: f64,
    analyte_volume_ml: f64,
    analyte_conc_m: f64,
    titrant_conc_m: f64,
) -> f64 {
    let moles_acid = analyte_volume_ml * analyte_conc_m;
    let moles_base = titrant_volume_ml * titrant_conc_m;
    let remaining_acid = moles_acid - moles_base;

    if remaining_acid > 0.0 {
        let h_conc = (remaining_acid * KA_ACETIC_ACID).sqrt();
        -h_conc.log10()
    } else if remaining_acid < 0.0 {
        let oh_conc = -remaining_acid;
        let h_conc = KW_WATER / oh_conc;
        -h_conc.log10()
    } else {
        NEUTRAL_PH
    }
}

/// Validated pH calculation.
///
/// Rejects physically meaningless inputs before touching the formula:
/// negative titrant volume, non-positive analyte volume, or non-positive
/// concentrations. Pure and deterministic otherwise.
pub fn compute_ph(
    titrant_volume_ml: f64,
    analyte_volume_ml: f64,
    analyte_conc_m: f64,
    titrant_conc_m: f64,
) -> Result<f64, TitrationError> {
    if titrant_volume_ml < 0.0 {
        return Err(TitrationError::NegativeTitrantVolume {
            volume_ml: titrant_volume_ml,
        });
    }
    if analyte_volume_ml <= 0.0 {
        return Err(TitrationError::NonPositiveAnalyteVolume {
            volume_ml: analyte_volume_ml,
        });
    }
    for conc in [analyte_conc_m, titrant_conc_m] {
        if conc <= 0.0 {
            return Err(TitrationError::NonPositiveConcentration {
                concentration_m: conc,
            });
        }
    }

    Ok(ph_for_mix(
        titrant_volume_ml,
        analyte_volume_ml,
        analyte_conc_m,
        titrant_conc_m,
    ))
}

/// Convenience wrapper using the standard 0.8 M acid / 0.1 M base solutions
pub fn compute_ph_default(
    titrant_volume_ml: f64,
    analyte_volume_ml: f64,
) -> Result<f64, TitrationError> {
    compute_ph(
        titrant_volume_ml,
        analyte_volume_ml,
        ANALYTE_CONCENTRATION_M,
        TITRANT_CONCENTRATION_M,
    )
}

/// Titrant volume (mL) at which moles of base exactly equal moles of acid
pub fn equivalence_volume_ml(
    analyte_volume_ml: f64,
    analyte_conc_m: f64,
    titrant_conc_m: f64,
) -> f64 {
    analyte_volume_ml * analyte_conc_m / titrant_conc_m
}

/// Classify a mixture by the sign of the remaining acid
pub fn region_for_mix(
    titrant_volume_ml: f64,
    analyte_volume_ml: f64,
    analyte_conc_m: f64,
    titrant_conc_m: f64,
) -> TitrationRegion {
    let remaining_acid =
        analyte_volume_ml * analyte_conc_m - titrant_volume_ml * titrant_conc_m;
    if remaining_acid > 0.0 {
        TitrationRegion::ExcessAcid
    } else if remaining_acid < 0.0 {
        TitrationRegion::ExcessBase
    } else {
        TitrationRegion::Equivalence
    }
}

/// Indicator color for a pH value, as an RGB triple.
///
/// Mimics a universal-indicator strip: red in strong acid, green around
/// neutral, violet in strong base. Used by the status reporting op to tint
/// the terminal readout.
pub fn ph_color(ph: f64) -> (u8, u8, u8) {
    let ph = ph.clamp(PH_SCALE_MIN, PH_SCALE_MAX);
    if ph < NEUTRAL_PH {
        let ratio = ph / NEUTRAL_PH;
        (
            lerp_channel(215, 40, ratio),
            lerp_channel(45, 180, ratio),
            45,
        )
    } else {
        let ratio = (ph - NEUTRAL_PH) / (PH_SCALE_MAX - NEUTRAL_PH);
        (
            lerp_channel(40, 110, ratio),
            lerp_channel(180, 45, ratio),
            lerp_channel(45, 200, ratio),
        )
    }
}

fn lerp_channel(a: u8, b: u8, ratio: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * ratio).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use more_asserts::assert_ge;

    #[test]
    fn test_initial_acid_ph() {
        // Untouched 50 mL of 0.8 M acid: [H+] = sqrt(40 * Ka)
        let expected = -(50.0 * 0.8 * KA_ACETIC_ACID).sqrt().log10();
        let ph = compute_ph_default(0.0, 50.0).unwrap();
        assert_abs_diff_eq!(ph, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_equivalence_point_is_exactly_neutral() {
        // 50 mL * 0.8 M / 0.1 M = 400 mL of titrant
        assert_abs_diff_eq!(equivalence_volume_ml(50.0, 0.8, 0.1), 400.0, epsilon = 1e-9);
        // Both 400*0.1 and 50*0.8 round to exactly 40.0, so the zero branch fires
        let ph = compute_ph_default(400.0, 50.0).unwrap();
        assert_eq!(ph, 7.0);
    }

    #[test]
    fn test_post_equivalence_ph() {
        // remaining = 40 - 45 = -5; [OH-] = 5; [H+] = 1e-14/5 = 2e-15
        let ph = compute_ph_default(450.0, 50.0).unwrap();
        assert_abs_diff_eq!(ph, -(2e-15_f64).log10(), epsilon = 1e-12);
        assert_abs_diff_eq!(ph, 14.70, epsilon = 0.01);
    }

    #[test]
    fn test_ph_finite_over_sampled_inputs() {
        for analyte_volume in [0.5, 5.0, 50.0, 100.0] {
            let mut titrant_volume = 0.0;
            while titrant_volume <= 1000.0 {
                let ph = compute_ph_default(titrant_volume, analyte_volume).unwrap();
                assert!(
                    ph.is_finite(),
                    "pH not finite at titrant {titrant_volume} mL, analyte {analyte_volume} mL"
                );
                titrant_volume += 7.3; // stride off the grid to avoid exact-zero remainders
            }
        }
    }

    #[test]
    fn test_ph_non_decreasing_with_titrant_volume() {
        // Sampled well clear of the equivalence sliver where the simplified
        // excess-base branch is numerically degenerate
        let mut last_ph = f64::NEG_INFINITY;
        for titrant_volume in [0.0, 50.0, 100.0, 200.0, 300.0, 390.0, 400.0, 410.0, 450.0, 600.0] {
            let ph = compute_ph_default(titrant_volume, 50.0).unwrap();
            assert_ge!(ph, last_ph, "pH decreased at {titrant_volume} mL");
            last_ph = ph;
        }
    }

    #[test]
    fn test_region_classification() {
        assert_eq!(
            region_for_mix(100.0, 50.0, 0.8, 0.1),
            TitrationRegion::ExcessAcid
        );
        assert_eq!(
            region_for_mix(400.0, 50.0, 0.8, 0.1),
            TitrationRegion::Equivalence
        );
        assert_eq!(
            region_for_mix(500.0, 50.0, 0.8, 0.1),
            TitrationRegion::ExcessBase
        );
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert_eq!(
            compute_ph_default(-0.1, 50.0),
            Err(TitrationError::NegativeTitrantVolume { volume_ml: -0.1 })
        );
        assert_eq!(
            compute_ph_default(0.0, 0.0),
            Err(TitrationError::NonPositiveAnalyteVolume { volume_ml: 0.0 })
        );
        assert_eq!(
            compute_ph(0.0, 50.0, -0.8, 0.1),
            Err(TitrationError::NonPositiveConcentration {
                concentration_m: -0.8
            })
        );
        assert_eq!(
            compute_ph(0.0, 50.0, 0.8, 0.0),
            Err(TitrationError::NonPositiveConcentration {
                concentration_m: 0.0
            })
        );
    }

    #[test]
    fn test_ph_color_bands() {
        let (r_acid, g_acid, _) = ph_color(1.0);
        let (r_neutral, g_neutral, _) = ph_color(7.0);
        let (_, g_base, b_base) = ph_color(13.5);

        assert_ge!(r_acid, g_acid, "strong acid should read red");
        assert_ge!(g_neutral, r_neutral, "neutral should read green");
        assert_ge!(b_base, g_base, "strong base should read violet");

        // Out-of-scale values clamp instead of wrapping
        assert_eq!(ph_color(-3.0), ph_color(0.0));
        assert_eq!(ph_color(20.0), ph_color(14.0));
    }
}
