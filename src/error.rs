use thiserror::Error;

/// Input validation errors for the titration core.
///
/// These are all "invalid input" failures: they are raised before any state
/// is mutated, so a caller that sees one can keep using its state unchanged.
/// Calling `advance` or `toggle_running` in the wrong phase is NOT an error,
/// it is a tolerated no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TitrationError {
    /// Analyte (acid) volume must be strictly positive
    #[error("analyte volume must be positive, got {volume_ml} mL")]
    NonPositiveAnalyteVolume { volume_ml: f64 },

    /// Analyte volume outside the supported range of (0.1, 100.0] mL
    #[error("analyte volume {volume_ml} mL outside supported range (0.1 mL, 100.0 mL]")]
    AnalyteVolumeOutOfRange { volume_ml: f64 },

    /// Titrant (base) volume cannot be negative
    #[error("titrant volume cannot be negative, got {volume_ml} mL")]
    NegativeTitrantVolume { volume_ml: f64 },

    /// Solution concentrations must be strictly positive
    #[error("concentration must be positive, got {concentration_m} M")]
    NonPositiveConcentration { concentration_m: f64 },
}
