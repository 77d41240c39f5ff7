use crate::runtime::effect::Effect;
use crate::runtime::intent::Intent;
use crate::state::flow::{Transition, Wizard};

pub struct Reducer;

impl Reducer {
    pub fn reduce(wizard: &mut Wizard, intent: Intent) -> Vec<Effect> {
        let transition = match intent {
            Intent::Submit(output) => wizard.advance(output),
            Intent::Back => wizard.retreat(),
            Intent::Exit => wizard.cancel(),
        };
        Self::effects_for(transition)
    }

    fn effects_for(transition: Transition) -> Vec<Effect> {
        match transition {
            Transition::Advanced { .. } | Transition::Retreated { .. } => vec![Effect::Render],
            Transition::Blocked(issues) => vec![Effect::ShowIssues(issues), Effect::Render],
            Transition::Completed(data) => vec![Effect::Complete(data)],
            Transition::Exited => vec![Effect::Exit],
            Transition::Ignored => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Reducer;
    use crate::runtime::effect::Effect;
    use crate::runtime::intent::Intent;
    use crate::state::flow::Wizard;
    use crate::state::step::StepDefinition;
    use crate::state::store::DataStore;

    fn wizard() -> Wizard {
        Wizard::new(vec![
            StepDefinition::builder("a", "A").text("x", "X").require(["x"]).build(),
            StepDefinition::builder("b", "B").build(),
        ])
        .expect("wizard")
    }

    #[test]
    fn blocked_submit_shows_issues_then_renders() {
        let mut wizard = wizard();
        let effects = Reducer::reduce(&mut wizard, Intent::Submit(DataStore::new()));
        assert!(matches!(effects.as_slice(), [Effect::ShowIssues(_), Effect::Render]));
    }

    #[test]
    fn exit_from_middle_step_leaves_flow() {
        let mut wizard = wizard();
        Reducer::reduce(&mut wizard, Intent::Submit(DataStore::new().with("x", "1")));
        assert_eq!(Reducer::reduce(&mut wizard, Intent::Exit), vec![Effect::Exit]);
        assert!(Reducer::reduce(&mut wizard, Intent::Back).is_empty());
    }

    #[test]
    fn final_submit_completes() {
        let mut wizard = wizard();
        Reducer::reduce(&mut wizard, Intent::Submit(DataStore::new().with("x", "1")));
        let effects = Reducer::reduce(&mut wizard, Intent::Submit(DataStore::new()));
        assert_eq!(effects, vec![Effect::Complete(DataStore::new().with("x", "1"))]);
    }
}
