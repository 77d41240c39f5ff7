use crate::state::store::DataStore;
use crate::state::validation::ValidationIssue;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render,
    ShowIssues(Vec<ValidationIssue>),
    Complete(DataStore),
    Exit,
}
