//! The host-side run loop.
//!
//! `TitrationRun` owns one [`ExperimentState`] plus a set of observer ops and
//! performs exactly one `advance` per `tick` call. Real-time cadence lives in
//! whatever drives `tick` (a timer, a UI frame callback, a test loop); the
//! run itself never sleeps.

use crate::error::TitrationError;
use crate::experiment::{ExperimentState, Phase, StepOutcome};
use crate::sim::op::{TitrationOp, TitrationOpHandle};

/// Steps allowed before a run is abandoned as non-terminating. The largest
/// configurable experiment (100 mL of 0.8 M acid into 0.1 M base) completes
/// in about 8000 steps.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

pub struct RunProps {
    pub name: &'static str,
    pub analyte_volume_ml: f64,
    pub ops: Vec<TitrationOpHandle>,
    pub max_steps: usize,
    pub debug: bool,
}

impl Default for RunProps {
    fn default() -> Self {
        RunProps {
            name: "titration",
            analyte_volume_ml: crate::constants::DEFAULT_ANALYTE_VOLUME_ML,
            ops: Vec::new(),
            max_steps: DEFAULT_MAX_STEPS,
            debug: false,
        }
    }
}

pub struct TitrationRun {
    pub state: ExperimentState,
    pub ops: Vec<Box<dyn TitrationOp>>,
    pub max_steps: usize,
    pub name: String,
    pub debug: bool,
    steps_taken: usize,
    initialized: bool,
}

impl TitrationRun {
    pub fn new(props: RunProps) -> Result<TitrationRun, TitrationError> {
        let state = ExperimentState::new(props.analyte_volume_ml)?;
        let ops = props.ops.into_iter().map(|handle| handle.op).collect();
        Ok(TitrationRun {
            state,
            ops,
            max_steps: props.max_steps,
            name: props.name.to_string(),
            debug: props.debug,
            steps_taken: 0,
            initialized: false,
        })
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Open the burette stopcock (no-op if already open or completed)
    pub fn open_burette(&mut self) {
        if self.state.phase() == Phase::Idle {
            self.state.toggle_running();
        }
    }

    /// Close the burette stopcock (no-op unless running)
    pub fn close_burette(&mut self) {
        if self.state.phase() == Phase::Running {
            self.state.toggle_running();
        }
    }

    /// Perform one simulated step and fan the result out to the ops.
    ///
    /// Safe to call in any phase; outside `Running` it skips without touching
    /// state, so a host timer that misfires after completion is harmless.
    pub fn tick(&mut self) -> StepOutcome {
        if !self.initialized {
            self.initialized = true;
            let mut ops = std::mem::take(&mut self.ops);
            for op in &mut ops {
                op.init_run(&self.state);
            }
            self.ops = ops;
        }

        let outcome = self.state.advance();

        if let StepOutcome::Sampled {
            sample,
            just_reached_neutral,
        } = outcome
        {
            self.steps_taken += 1;
            let mut ops = std::mem::take(&mut self.ops);
            for op in &mut ops {
                op.on_sample(&self.state, &sample);
            }
            if just_reached_neutral {
                for op in &mut ops {
                    op.on_neutral(&self.state, &sample);
                }
            }
            self.ops = ops;

            if self.debug {
                println!(
                    "[{}] step {}: {:.1} mL -> pH {:.2}",
                    self.name, self.steps_taken, sample.titrant_volume_ml, sample.ph
                );
            }
        }

        outcome
    }

    /// Open the burette and tick until the neutrality latch trips or the
    /// step guard runs out, then notify the ops the run is over.
    ///
    /// Intended for batch/offline use; interactive hosts call `tick` from
    /// their own scheduler at their own cadence instead.
    pub fn run_to_completion(&mut self) -> &ExperimentState {
        self.open_burette();
        while self.state.phase() == Phase::Running && self.steps_taken < self.max_steps {
            self.tick();
        }
        self.finish();
        &self.state
    }

    /// Notify the ops that no further ticks are coming
    pub fn finish(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);
        for op in &mut ops {
            op.after_run(&self.state);
        }
        self.ops = ops;
    }
}
