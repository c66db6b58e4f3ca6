pub mod op;
pub mod run;

pub use op::{TitrationOp, TitrationOpHandle};
pub use run::{RunProps, TitrationRun};
