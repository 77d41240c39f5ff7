pub mod effect;
pub mod intent;
pub mod reducer;
pub mod runner;

pub use intent::Intent;
pub use runner::{FlowOutcome, Replay, StepFrame, StepView, replay, run_wizard};
