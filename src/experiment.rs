//! The mutable state of one simulated titration run.
//!
//! One `ExperimentState` lives for one session. It is only ever mutated by
//! three operations: `advance` (one burette increment), `toggle_running`
//! (the burette stopcock), and `reset`. The host drives `advance` once per
//! tick; all chart/audio/status side effects happen host-side from the
//! returned [`StepOutcome`].

use serde::{Deserialize, Serialize};

use crate::chemistry::{equivalence_volume_ml, ph_for_mix};
use crate::constants::{
    ANALYTE_CONCENTRATION_M, DEFAULT_ANALYTE_VOLUME_ML, MAX_ANALYTE_VOLUME_ML,
    MIN_ANALYTE_VOLUME_ML, NEUTRALITY_THRESHOLD_PH, TITRANT_CONCENTRATION_M, TITRANT_STEP_ML,
};
use crate::error::TitrationError;

/// One recorded point of the pH curve: (volume of NaOH added, pH).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhSample {
    pub titrant_volume_ml: f64,
    pub ph: f64,
}

/// Derived view of the two state flags.
///
/// `idle -> running` via toggle, `running -> completed` when pH crosses the
/// neutrality threshold, `completed -> idle` via reset only. The toggle is
/// inert while completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

/// Result of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// One titrant increment was dispensed and its pH recorded.
    /// `just_reached_neutral` is true on exactly the step that tripped the
    /// latch, so the host can fire its completion cue once and only once.
    Sampled {
        sample: PhSample,
        just_reached_neutral: bool,
    },
    /// The burette was closed or the run already completed; state unchanged.
    Skipped,
}

impl StepOutcome {
    pub fn sample(&self) -> Option<PhSample> {
        match self {
            StepOutcome::Sampled { sample, .. } => Some(*sample),
            StepOutcome::Skipped => None,
        }
    }

    pub fn just_reached_neutral(&self) -> bool {
        matches!(
            self,
            StepOutcome::Sampled {
                just_reached_neutral: true,
                ..
            }
        )
    }
}

/// Full state of one titration experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentState {
    /// Cumulative NaOH volume added; monotonically non-decreasing while running
    pub titrant_volume_ml: f64,
    /// Initial acid volume, configured once per run
    pub analyte_volume_ml: f64,
    pub analyte_concentration_m: f64,
    pub titrant_concentration_m: f64,
    /// Whether the burette stopcock is open
    pub is_running: bool,
    /// One-way latch: set the first time pH crosses the neutrality threshold,
    /// cleared only by reset
    pub has_reached_neutral: bool,
    /// Append-only log of every computed sample, in dispensing order
    pub history: Vec<PhSample>,
}

impl Default for ExperimentState {
    fn default() -> Self {
        Self {
            titrant_volume_ml: 0.0,
            analyte_volume_ml: DEFAULT_ANALYTE_VOLUME_ML,
            analyte_concentration_m: ANALYTE_CONCENTRATION_M,
            titrant_concentration_m: TITRANT_CONCENTRATION_M,
            is_running: false,
            has_reached_neutral: false,
            history: Vec::new(),
        }
    }
}

fn validate_analyte_volume(volume_ml: f64) -> Result<(), TitrationError> {
    if volume_ml <= 0.0 {
        return Err(TitrationError::NonPositiveAnalyteVolume { volume_ml });
    }
    if volume_ml <= MIN_ANALYTE_VOLUME_ML || volume_ml > MAX_ANALYTE_VOLUME_ML {
        return Err(TitrationError::AnalyteVolumeOutOfRange { volume_ml });
    }
    Ok(())
}

impl ExperimentState {
    /// Create a fresh idle state with the given analyte volume.
    pub fn new(analyte_volume_ml: f64) -> Result<ExperimentState, TitrationError> {
        validate_analyte_volume(analyte_volume_ml)?;
        Ok(ExperimentState {
            analyte_volume_ml,
            ..ExperimentState::default()
        })
    }

    pub fn phase(&self) -> Phase {
        if self.has_reached_neutral {
            Phase::Completed
        } else if self.is_running {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    /// pH of the mixture as it stands: the last recorded sample, or the
    /// untouched analyte's pH before any titrant has been dispensed.
    pub fn current_ph(&self) -> f64 {
        match self.history.last() {
            Some(sample) => sample.ph,
            None => ph_for_mix(
                self.titrant_volume_ml,
                self.analyte_volume_ml,
                self.analyte_concentration_m,
                self.titrant_concentration_m,
            ),
        }
    }

    pub fn current_sample(&self) -> Option<PhSample> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[PhSample] {
        &self.history
    }

    /// Titrant volume at which this run's acid is exactly neutralized
    pub fn equivalence_volume_ml(&self) -> f64 {
        equivalence_volume_ml(
            self.analyte_volume_ml,
            self.analyte_concentration_m,
            self.titrant_concentration_m,
        )
    }

    /// Dispense one titrant increment and record the resulting pH.
    ///
    /// A no-op (`StepOutcome::Skipped`) unless the burette is open and the
    /// neutrality latch is clear. On the step whose pH first exceeds the
    /// threshold, the latch is set, the burette closes, and the outcome
    /// reports `just_reached_neutral` so the caller fires its completion
    /// feedback exactly once.
    pub fn advance(&mut self) -> StepOutcome {
        if !self.is_running || self.has_reached_neutral {
            return StepOutcome::Skipped;
        }

        self.titrant_volume_ml += TITRANT_STEP_ML;
        // Fields are validated at construction/reset, so the raw formula holds
        let ph = ph_for_mix(
            self.titrant_volume_ml,
            self.analyte_volume_ml,
            self.analyte_concentration_m,
            self.titrant_concentration_m,
        );
        let sample = PhSample {
            titrant_volume_ml: self.titrant_volume_ml,
            ph,
        };
        self.history.push(sample);

        let just_reached_neutral = ph > NEUTRALITY_THRESHOLD_PH;
        if just_reached_neutral {
            self.has_reached_neutral = true;
            self.is_running = false;
        }

        StepOutcome::Sampled {
            sample,
            just_reached_neutral,
        }
    }

    /// Open or close the burette stopcock.
    ///
    /// Inert once the neutrality latch is set: only reset re-arms the run.
    /// Returns the resulting `is_running` flag.
    pub fn toggle_running(&mut self) -> bool {
        if !self.has_reached_neutral {
            self.is_running = !self.is_running;
        }
        self.is_running
    }

    /// Restore the idle starting state with the given analyte volume.
    ///
    /// Validation happens before any field changes, so a rejected volume
    /// leaves the state untouched; on success the clear is atomic.
    pub fn reset(&mut self, analyte_volume_ml: f64) -> Result<(), TitrationError> {
        validate_analyte_volume(analyte_volume_ml)?;
        self.titrant_volume_ml = 0.0;
        self.analyte_volume_ml = analyte_volume_ml;
        self.is_running = false;
        self.has_reached_neutral = false;
        self.history.clear();
        Ok(())
    }
}
