use crate::state::step::{FieldKind, FieldSpec, StepDefinition};
use crate::state::validation::{FieldRule, StepValidator};

// Plan, Assess, Control, Execute.
pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::builder("plan", "Plan")
            .text("task", "Task")
            .text("location", "Location")
            .text("crew", "Crew members")
            .require(["task", "location"])
            .build(),
        StepDefinition::builder("assess", "Assess")
            .field(FieldSpec::new("hazards", "Hazards identified", FieldKind::Multiline))
            .choice("initial_risk", "Initial risk rating", ["Low", "Medium", "High"])
            .require(["hazards", "initial_risk"])
            .build(),
        StepDefinition::builder("control", "Control")
            .field(FieldSpec::new("controls", "Controls applied", FieldKind::Multiline))
            .choice("residual_risk", "Residual risk rating", ["Low", "Medium", "High"])
            .field(FieldSpec::new(
                "residual_justification",
                "Why is the residual risk acceptable?",
                FieldKind::Multiline,
            ))
            .require(["controls", "residual_risk"])
            .validator(
                StepValidator::conditional_required("residual_justification", "residual_risk", "High")
                    .with_message("High residual risk needs a justification"),
            )
            .build(),
        StepDefinition::builder("execute", "Execute")
            .text("supervisor", "Supervisor")
            .yes_no("crew_briefed", "Crew briefed on hazards and controls")
            .require(["supervisor", "crew_briefed"])
            .validator(StepValidator::rules(
                "crew_briefed",
                vec![FieldRule::affirmative("Brief the crew before executing the task")],
            ))
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::steps;
    use crate::state::store::DataStore;

    #[test]
    fn high_residual_risk_needs_justification() {
        let control = &steps()[2];
        let data = DataStore::new()
            .with("controls", "Barricade, spotter")
            .with("residual_risk", "High");
        assert!(!control.is_valid(&data));
        assert!(control.is_valid(&data.with("residual_justification", "Shutdown window")));
    }
}
