// Host-side observers of a titration run
pub mod csv_writer_op;
pub mod status_reporting_op;

// Re-export the main operations for easier access
pub use csv_writer_op::CsvWriterOp;
pub use status_reporting_op::StatusReportingOp;

use std::any::Any;

use crate::experiment::{ExperimentState, PhSample};

/// An observer hooked into a [`crate::sim::TitrationRun`].
///
/// Ops never mutate the experiment; they render, record or cue off it. The
/// run fans each tick's sample out to every op, and fires `on_neutral`
/// exactly once per run, on the step that tripped the latch.
pub trait TitrationOp {
    /// The name of this operator (for identification and lookup)
    fn name(&self) -> &str;

    /// Downcast support, so hosts can read op state back after a run
    fn as_any(&self) -> &dyn Any;

    /// Called once before the first tick
    fn init_run(&mut self, _state: &ExperimentState) {
        // Default implementation does nothing
    }

    /// Called for every recorded sample
    fn on_sample(&mut self, _state: &ExperimentState, _sample: &PhSample) {
        // Default implementation does nothing
    }

    /// Called once, on the sample that crossed the neutrality threshold
    fn on_neutral(&mut self, _state: &ExperimentState, _sample: &PhSample) {
        // Default implementation does nothing
    }

    /// Called once when the run stops ticking
    fn after_run(&mut self, _state: &ExperimentState) {
        // Default implementation does nothing
    }
}

pub struct TitrationOpHandle {
    pub op: Box<dyn TitrationOp>,
}

impl TitrationOpHandle {
    /// Create a new TitrationOpHandle with the given operation
    pub fn new(op: Box<dyn TitrationOp>) -> Self {
        TitrationOpHandle { op }
    }
}
