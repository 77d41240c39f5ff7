use crate::state::step::{FieldKind, FieldSpec, StepDefinition};
use crate::state::validation::{FieldRule, StepValidator};

const CHECKLIST: [(&str, &str); 5] = [
    ("ppe", "PPE worn and in good condition"),
    ("isolation", "Energy sources isolated and tagged"),
    ("equipment", "Tools and equipment inspected"),
    ("work_area", "Work area clear of hazards"),
    ("permits", "Permits and procedures in place"),
];

pub(super) fn steps() -> Vec<StepDefinition> {
    let checks = CHECKLIST
        .iter()
        .fold(
            StepDefinition::builder("checks", "Pre-start checklist")
                .description("Mark each item ok, not-ok or n/a. Not-ok items need a comment."),
            |builder, (id, label)| builder.checklist_item(id, *label),
        )
        .build();

    vec![
        StepDefinition::builder("job", "Job details")
            .text("task", "Task")
            .text("location", "Work location")
            .text("supervisor", "Supervisor")
            .require(["task", "location", "supervisor"])
            .build(),
        checks,
        StepDefinition::builder("controls", "Hazard controls")
            .yes_no("hazards_controlled", "Are all identified hazards controlled?")
            .field(FieldSpec::new(
                "additional_controls",
                "Additional controls",
                FieldKind::Multiline,
            ))
            .require(["hazards_controlled"])
            .validator(
                StepValidator::conditional_required("additional_controls", "hazards_controlled", "No")
                    .with_message("List the controls you will put in place"),
            )
            .build(),
        StepDefinition::builder("sign_off", "Sign off")
            .text("worker_name", "Your name")
            .yes_no("fit_to_start", "I have taken control and am safe to start")
            .require(["worker_name", "fit_to_start"])
            .validator(StepValidator::rules(
                "fit_to_start",
                vec![FieldRule::affirmative("Stop and speak to your supervisor before starting")],
            ))
            .build(),
    ]
}
