use crate::error::{Error, Result};
use crate::state::step::{StepDefinition, StepStatus};
use crate::state::store::DataStore;
use crate::state::validation::ValidationIssue;
use std::collections::HashSet;
use std::fmt;

type ExitCallback = Box<dyn FnMut()>;
type CompleteCallback = Box<dyn FnMut(&DataStore)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Active,
    Completed,
    Exited,
}

/// Outcome of a single `advance`/`retreat` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advanced { from: usize, to: usize },
    Retreated { from: usize, to: usize },
    /// The current step rejected the merged data; nothing moved.
    Blocked(Vec<ValidationIssue>),
    /// The last step was accepted; carries the full aggregate.
    Completed(DataStore),
    /// `retreat` at the first step left the flow.
    Exited,
    /// The flow already finished; the call had no effect.
    Ignored,
}

/// Ordered step sequence with a shared accumulator.
pub struct Wizard {
    steps: Vec<StepDefinition>,
    data: DataStore,
    current: usize,
    statuses: Vec<StepStatus>,
    state: FlowState,
    on_exit: Option<ExitCallback>,
    on_complete: Option<CompleteCallback>,
}

impl Wizard {
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::EmptyFlow);
        }
        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(Error::DuplicateStep(step.id.clone()));
            }
        }

        let mut statuses = vec![StepStatus::Pending; steps.len()];
        statuses[0] = StepStatus::Active;

        Ok(Self {
            steps,
            data: DataStore::new(),
            current: 0,
            statuses,
            state: FlowState::Active,
            on_exit: None,
            on_complete: None,
        })
    }

    /// Pre-fills the accumulator, e.g. with the signed-in user's details.
    pub fn with_data(mut self, data: DataStore) -> Self {
        self.data.merge(data);
        self
    }

    pub fn on_exit(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_exit = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnMut(&DataStore) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    pub fn title(&self) -> &str {
        self.current_step().title.as_str()
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.current + 1, self.steps.len())
    }

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != FlowState::Active
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        self.statuses
            .get(index)
            .copied()
            .unwrap_or(StepStatus::Pending)
    }

    /// Whether the current step would accept `output` on top of what is
    /// already collected. Drives the enabled state of a "Next" control.
    pub fn can_advance(&self, output: &DataStore) -> bool {
        !self.is_finished() && self.current_step().is_valid(&self.data.merged_with(output))
    }

    pub fn advance(&mut self, output: DataStore) -> Transition {
        if self.is_finished() {
            return Transition::Ignored;
        }

        self.data.merge(output);
        let issues = self.current_step().issues(&self.data);
        if !issues.is_empty() {
            tracing::debug!(
                step = %self.current_step().id,
                issues = issues.len(),
                "step blocked by validation"
            );
            return Transition::Blocked(issues);
        }

        let from = self.current;
        self.statuses[from] = StepStatus::Done;

        if self.is_last_step() {
            self.state = FlowState::Completed;
            tracing::debug!(step = %self.current_step().id, "flow completed");
            if let Some(callback) = self.on_complete.as_mut() {
                callback(&self.data);
            }
            return Transition::Completed(self.data.clone());
        }

        self.current += 1;
        self.statuses[self.current] = StepStatus::Active;
        tracing::debug!(from, to = self.current, "advanced");
        Transition::Advanced {
            from,
            to: self.current,
        }
    }

    pub fn retreat(&mut self) -> Transition {
        if self.is_finished() {
            return Transition::Ignored;
        }

        let from = self.current;
        if from == 0 {
            self.statuses[0] = StepStatus::Cancelled;
            self.state = FlowState::Exited;
            tracing::debug!("exited flow from first step");
            if let Some(callback) = self.on_exit.as_mut() {
                callback();
            }
            return Transition::Exited;
        }

        self.statuses[from] = StepStatus::Pending;
        self.current -= 1;
        self.statuses[self.current] = StepStatus::Active;
        tracing::debug!(from, to = self.current, "retreated");
        Transition::Retreated {
            from,
            to: self.current,
        }
    }

    /// Leaves the flow from any step without touching collected data.
    pub fn cancel(&mut self) -> Transition {
        if self.is_finished() {
            return Transition::Ignored;
        }
        self.statuses[self.current] = StepStatus::Cancelled;
        self.state = FlowState::Exited;
        if let Some(callback) = self.on_exit.as_mut() {
            callback();
        }
        Transition::Exited
    }
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("current", &self.current)
            .field("steps", &self.steps.len())
            .field("state", &self.state)
            .field("data", &self.data)
            .finish()
    }
}
