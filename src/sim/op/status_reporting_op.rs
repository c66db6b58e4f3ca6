/// Status reporting operation
/// Prints the burette readout every N samples, tinted by the indicator color
/// of the current pH, plus a closing summary when the run ends.
use std::any::Any;

use colored::Colorize;

use crate::chemistry::{ph_color, region_for_mix, TitrationRegion};
use crate::experiment::{ExperimentState, PhSample};
use crate::sim::op::TitrationOp;

pub struct StatusReportingOp {
    /// Print one status line every this many samples
    pub report_every_samples: usize,
    samples_seen: usize,
}

impl StatusReportingOp {
    pub fn new() -> Self {
        Self {
            report_every_samples: 50, // 5 mL of titrant between status lines
            samples_seen: 0,
        }
    }

    pub fn with_frequency(report_every_samples: usize) -> Self {
        Self {
            report_every_samples: report_every_samples.max(1),
            samples_seen: 0,
        }
    }

    fn region_label(state: &ExperimentState, sample: &PhSample) -> &'static str {
        match region_for_mix(
            sample.titrant_volume_ml,
            state.analyte_volume_ml,
            state.analyte_concentration_m,
            state.titrant_concentration_m,
        ) {
            TitrationRegion::ExcessAcid => "excess acid",
            TitrationRegion::Equivalence => "equivalence",
            TitrationRegion::ExcessBase => "excess base",
        }
    }

    fn print_status_line(state: &ExperimentState, sample: &PhSample) {
        let (r, g, b) = ph_color(sample.ph);
        let readout = format!(
            "NaOH added: {:>6.1} mL | pH {:>5.2} | {}",
            sample.titrant_volume_ml,
            sample.ph,
            Self::region_label(state, sample)
        );
        println!("  {}", readout.truecolor(r, g, b));
    }
}

impl Default for StatusReportingOp {
    fn default() -> Self {
        Self::new()
    }
}

impl TitrationOp for StatusReportingOp {
    fn name(&self) -> &str {
        "StatusReporting"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn init_run(&mut self, state: &ExperimentState) {
        println!(
            "🧪 Titrating {:.1} mL of {:.1} M acetic acid with {:.1} M NaOH",
            state.analyte_volume_ml, state.analyte_concentration_m, state.titrant_concentration_m
        );
        println!(
            "   Equivalence expected at {:.1} mL, initial pH {:.2}",
            state.equivalence_volume_ml(),
            state.current_ph()
        );
    }

    fn on_sample(&mut self, state: &ExperimentState, sample: &PhSample) {
        self.samples_seen += 1;
        if self.samples_seen % self.report_every_samples != 0 {
            return;
        }
        Self::print_status_line(state, sample);
    }

    fn on_neutral(&mut self, state: &ExperimentState, sample: &PhSample) {
        Self::print_status_line(state, sample);
        println!(
            "{}",
            "🔔 Near the neutral point! The stopcock has closed automatically.".green()
        );
    }

    fn after_run(&mut self, state: &ExperimentState) {
        println!("🏁 Final Titration Report:");
        println!("   - Samples recorded: {}", state.history.len());
        println!("   - NaOH dispensed: {:.1} mL", state.titrant_volume_ml);
        println!("   - Final pH: {:.2}", state.current_ph());
        if !state.has_reached_neutral {
            println!("   - Neutral point NOT reached (burette closed early)");
        }
    }
}
