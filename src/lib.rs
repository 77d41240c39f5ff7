pub mod app;
pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod flows;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod state;
pub mod submission;
pub mod terminal;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use flows::FlowKind;
pub use state::{DataStore, StepDefinition, Transition, Wizard};
