use crate::state::store::DataStore;

/// What a rendered step asks the wizard to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// "Next"/"Submit" with the values entered on the current step.
    Submit(DataStore),
    Back,
    /// Leave the flow from wherever the user is.
    Exit,
}
