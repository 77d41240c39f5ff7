use crate::scoring::Answer;
use crate::scoring::hazard::{Severity, Timeframe};
use crate::state::step::{FieldKind, FieldSpec, StepDefinition};
use crate::state::validation::StepValidator;

const HAZARD_TYPES: [&str; 6] = [
    "Slip or trip",
    "Falling object",
    "Vehicle interaction",
    "Electrical",
    "Chemical",
    "Other",
];

pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::builder("details", "Hazard details")
            .choice("hazard_type", "Type of hazard", HAZARD_TYPES)
            .text("other_type", "Describe the hazard type")
            .text("location", "Location")
            .field(FieldSpec::new("description", "What did you see?", FieldKind::Multiline))
            .require(["hazard_type", "location", "description"])
            .validator(StepValidator::conditional_required(
                "other_type",
                "hazard_type",
                "Other",
            ))
            .build(),
        StepDefinition::builder("risk", "Risk")
            .choice(Severity::FIELD, "Severity", Severity::options())
            .choice(Timeframe::FIELD, "Action required", Timeframe::options())
            .require([Severity::FIELD, Timeframe::FIELD])
            .build(),
        StepDefinition::builder("actions", "Immediate actions")
            .field(FieldSpec::new(
                "immediate_action",
                "What have you done to make it safe?",
                FieldKind::Multiline,
            ))
            .yes_no("area_isolated", "Is the area isolated?")
            .text("reporter", "Reported by")
            .require(["immediate_action", "area_isolated", "reporter"])
            .build(),
    ]
}
