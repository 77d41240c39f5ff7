pub mod flow;
pub mod step;
pub mod store;
pub mod validation;

pub use flow::{FlowState, Transition, Wizard};
pub use step::{FieldKind, FieldSpec, StepBuilder, StepDefinition, StepStatus};
pub use store::DataStore;
pub use validation::{FieldRule, StepValidator, ValidationIssue, ValidationTarget};
