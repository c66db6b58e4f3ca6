use std::any::Any;
use std::fs::OpenOptions;
use std::io::Write;

use crate::experiment::{ExperimentState, PhSample};
use crate::sim::op::{TitrationOp, TitrationOpHandle};

/// CSV Writer Operator
///
/// Streams the pH curve to a CSV file as it is recorded, one row per sample,
/// so an external plotting tool can chart the titration without linking
/// against this crate. Columns:
/// - titrant_volume_ml: cumulative NaOH volume
/// - ph: computed pH at that volume
pub struct CsvWriterOp {
    /// Path to the CSV file to write
    pub file_path: String,

    /// Whether the header has been written
    header_written: bool,
}

impl CsvWriterOp {
    /// Create a new CSV writer operator
    ///
    /// # Arguments
    /// * `file_path` - Path to the CSV file to write (will be created/overwritten)
    pub fn new(file_path: String) -> Self {
        Self {
            file_path,
            header_written: false,
        }
    }

    /// Create a handle for the CSV writer operator
    pub fn handle(file_path: String) -> TitrationOpHandle {
        TitrationOpHandle::new(Box::new(Self::new(file_path)))
    }

    /// Write the CSV header if not already written
    fn write_header(&mut self) -> Result<(), std::io::Error> {
        if self.header_written {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.file_path)?;

        writeln!(file, "titrant_volume_ml,ph")?;

        self.header_written = true;
        Ok(())
    }

    /// Append one sample row to the CSV file
    fn write_sample(&self, sample: &PhSample) -> Result<(), std::io::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        writeln!(file, "{:.1},{:.6}", sample.titrant_volume_ml, sample.ph)?;

        Ok(())
    }
}

impl TitrationOp for CsvWriterOp {
    fn name(&self) -> &str {
        "CsvWriter"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn init_run(&mut self, _state: &ExperimentState) {
        if let Err(e) = self.write_header() {
            eprintln!(
                "Warning: Failed to write CSV header to {}: {}",
                self.file_path, e
            );
        }
    }

    fn on_sample(&mut self, _state: &ExperimentState, sample: &PhSample) {
        if let Err(e) = self.write_sample(sample) {
            eprintln!(
                "Warning: Failed to write CSV data to {}: {}",
                self.file_path, e
            );
        }
    }
}
