// Equilibrium constants for the acetic acid / NaOH system
pub const KA_ACETIC_ACID: f64 = 1.8e-5; // acid dissociation constant of CH3COOH
pub const KW_WATER: f64 = 1e-14; // water autoionization constant
pub const NEUTRAL_PH: f64 = 7.0;

// The burette auto-closes once pH crosses this threshold. Intentionally below
// 7.0: the model treats "near neutral" as reached, not exact equivalence.
pub const NEUTRALITY_THRESHOLD_PH: f64 = 6.5;

// Fixed solution concentrations (mol/L)
pub const ANALYTE_CONCENTRATION_M: f64 = 0.8; // acetic acid (vinegar)
pub const TITRANT_CONCENTRATION_M: f64 = 0.1; // NaOH

// Burette dispensing
pub const TITRANT_STEP_ML: f64 = 0.1; // volume dispensed per tick

// Analyte volume configuration
pub const DEFAULT_ANALYTE_VOLUME_ML: f64 = 50.0;
pub const MIN_ANALYTE_VOLUME_ML: f64 = 0.1; // exclusive lower bound
pub const MAX_ANALYTE_VOLUME_ML: f64 = 100.0; // inclusive upper bound

// Real-time cadence of the host tick loop (the core itself never sleeps)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

// pH scale bounds used for color mapping
pub const PH_SCALE_MIN: f64 = 0.0;
pub const PH_SCALE_MAX: f64 = 14.0;
