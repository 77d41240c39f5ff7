use crate::error::Result;
use crate::runtime::effect::Effect;
use crate::runtime::intent::Intent;
use crate::runtime::reducer::Reducer;
use crate::state::flow::{Transition, Wizard};
use crate::state::step::StepDefinition;
use crate::state::store::DataStore;
use crate::state::validation::ValidationIssue;

/// Everything a view needs to draw the current step.
#[derive(Debug, Clone, Copy)]
pub struct StepFrame<'a> {
    pub flow_title: &'a str,
    pub step: &'a StepDefinition,
    pub data: &'a DataStore,
    pub index: usize,
    pub len: usize,
    pub is_last: bool,
}

impl StepFrame<'_> {
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.len)
    }
}

/// A host that draws a step and reports what the user did on it.
pub trait StepView {
    fn render(&mut self, frame: &StepFrame<'_>) -> Result<Intent>;

    fn show_issues(&mut self, issues: &[ValidationIssue]) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Completed(DataStore),
    Exited,
}

/// Drives `wizard` through `view` until the flow completes or is left.
pub fn run_wizard(
    flow_title: &str,
    wizard: &mut Wizard,
    view: &mut dyn StepView,
) -> Result<FlowOutcome> {
    loop {
        let intent = {
            let frame = StepFrame {
                flow_title,
                step: wizard.current_step(),
                data: wizard.data(),
                index: wizard.current_index(),
                len: wizard.len(),
                is_last: wizard.is_last_step(),
            };
            view.render(&frame)?
        };

        for effect in Reducer::reduce(wizard, intent) {
            match effect {
                Effect::Render => {}
                Effect::ShowIssues(issues) => view.show_issues(&issues)?,
                Effect::Complete(data) => return Ok(FlowOutcome::Completed(data)),
                Effect::Exit => return Ok(FlowOutcome::Exited),
            }
        }

        if wizard.is_finished() {
            return Ok(FlowOutcome::Exited);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Replay {
    Completed(DataStore),
    Blocked {
        step: String,
        issues: Vec<ValidationIssue>,
    },
}

/// Feeds a full answer set through the wizard step by step, the way a user
/// pressing "Next" on each screen would.
pub fn replay(wizard: &mut Wizard, answers: DataStore) -> Replay {
    let mut pending = Some(answers);
    loop {
        let step = wizard.current_step().id.clone();
        match wizard.advance(pending.take().unwrap_or_default()) {
            Transition::Completed(data) => return Replay::Completed(data),
            Transition::Blocked(issues) => return Replay::Blocked { step, issues },
            Transition::Advanced { .. } => {}
            Transition::Retreated { .. } | Transition::Exited | Transition::Ignored => {
                return Replay::Blocked {
                    step,
                    issues: vec![ValidationIssue::step("Flow is no longer active")],
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FlowOutcome, Replay, StepFrame, StepView, replay, run_wizard};
    use crate::error::Result;
    use crate::runtime::intent::Intent;
    use crate::state::flow::Wizard;
    use crate::state::step::StepDefinition;
    use crate::state::store::DataStore;
    use crate::state::validation::ValidationIssue;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedView {
        intents: VecDeque<Intent>,
        frames: Vec<String>,
        issues: Vec<ValidationIssue>,
    }

    impl StepView for ScriptedView {
        fn render(&mut self, frame: &StepFrame<'_>) -> Result<Intent> {
            self.frames
                .push(format!("{} {}", frame.step.id, frame.progress_label()));
            Ok(self.intents.pop_front().unwrap_or(Intent::Exit))
        }

        fn show_issues(&mut self, issues: &[ValidationIssue]) -> Result<()> {
            self.issues.extend_from_slice(issues);
            Ok(())
        }
    }

    fn wizard() -> Wizard {
        Wizard::new(vec![
            StepDefinition::builder("name", "Name").text("name", "Name").require(["name"]).build(),
            StepDefinition::builder("done", "Done").build(),
        ])
        .expect("wizard")
    }

    #[test]
    fn scripted_session_with_retry_and_back() {
        let mut view = ScriptedView {
            intents: VecDeque::from(vec![
                Intent::Submit(DataStore::new()),
                Intent::Submit(DataStore::new().with("name", "Ana")),
                Intent::Back,
                Intent::Submit(DataStore::new()),
                Intent::Submit(DataStore::new()),
            ]),
            ..ScriptedView::default()
        };
        let mut wizard = wizard();
        let outcome = run_wizard("Test", &mut wizard, &mut view).expect("run");

        assert_eq!(
            outcome,
            FlowOutcome::Completed(DataStore::new().with("name", "Ana"))
        );
        assert_eq!(view.issues.len(), 1);
        assert_eq!(
            view.frames,
            vec!["name 1/2", "name 1/2", "done 2/2", "name 1/2", "done 2/2"]
        );
    }

    #[test]
    fn back_on_first_step_exits() {
        let mut view = ScriptedView {
            intents: VecDeque::from(vec![Intent::Back]),
            ..ScriptedView::default()
        };
        let outcome = run_wizard("Test", &mut wizard(), &mut view).expect("run");
        assert_eq!(outcome, FlowOutcome::Exited);
    }

    #[test]
    fn replay_reports_first_blocking_step() {
        assert_eq!(
            replay(&mut wizard(), DataStore::new().with("name", "Ana")),
            Replay::Completed(DataStore::new().with("name", "Ana"))
        );
        assert!(matches!(
            replay(&mut wizard(), DataStore::new()),
            Replay::Blocked { ref step, .. } if step == "name"
        ));
    }
}
