//! Terminal rendition of the virtual titration experiment.
//!
//! Opens the burette, dispenses 0.1 mL of NaOH every tick at real-time
//! cadence, streams the colored status readout and the pH curve CSV, and
//! rings the terminal bell when the neutral point closes the stopcock.
//!
//! Usage: titrate [analyte_volume_ml] [curve.csv]

use std::any::Any;
use std::env;
use std::thread;
use std::time::Duration;

use titration_sim::constants::{DEFAULT_ANALYTE_VOLUME_ML, DEFAULT_TICK_INTERVAL_MS};
use titration_sim::experiment::{ExperimentState, Phase, PhSample};
use titration_sim::sim::op::{CsvWriterOp, StatusReportingOp};
use titration_sim::sim::{RunProps, TitrationOp, TitrationOpHandle, TitrationRun};

/// The completion audio cue, reduced to the terminal's own beep
struct BellCueOp;

impl TitrationOp for BellCueOp {
    fn name(&self) -> &str {
        "BellCue"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn on_neutral(&mut self, _state: &ExperimentState, _sample: &PhSample) {
        print!("\x07");
    }
}

fn main() {
    let mut args = env::args().skip(1);
    let analyte_volume_ml: f64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ANALYTE_VOLUME_ML);
    let csv_path = args.next().unwrap_or_else(|| "titration_curve.csv".to_string());

    let mut run = match TitrationRun::new(RunProps {
        name: "virtual-titration",
        analyte_volume_ml,
        ops: vec![
            TitrationOpHandle::new(Box::new(StatusReportingOp::new())),
            TitrationOpHandle::new(Box::new(BellCueOp)),
            CsvWriterOp::handle(csv_path.clone()),
        ],
        ..RunProps::default()
    }) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("titrate: {e}");
            std::process::exit(1);
        }
    };

    run.open_burette();
    while run.state.phase() == Phase::Running && run.steps_taken() < run.max_steps {
        run.tick();
        // Cadence lives here in the host, never inside the core
        thread::sleep(Duration::from_millis(DEFAULT_TICK_INTERVAL_MS));
    }
    run.finish();

    println!("Curve written to {csv_path}");
}
