//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the world, executes gameplay commands and
//! drives the fixed tick.

mod simulation;

pub use simulation::{Command, SimulationWorker, WorkerSettings};
