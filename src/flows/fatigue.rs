use crate::scoring::Answer;
use crate::scoring::fatigue::{
    AlcoholIntake, Alertness, Gender, MEDICATION_FIELD, STRESS_FIELD, SleepLast24h, SleepLast48h,
    Wellbeing,
};
use crate::state::step::StepDefinition;
use crate::state::validation::{FieldRule, StepValidator};

pub(super) fn steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::builder("sleep", "Sleep")
            .choice(
                SleepLast24h::FIELD,
                "Hours of sleep in the last 24 hours",
                SleepLast24h::options(),
            )
            .choice(
                SleepLast48h::FIELD,
                "Hours of sleep in the last 48 hours",
                SleepLast48h::options(),
            )
            .require([SleepLast24h::FIELD, SleepLast48h::FIELD])
            .build(),
        StepDefinition::builder("alertness", "How are you feeling?")
            .choice(Alertness::FIELD, "Which best describes you right now?", Alertness::options())
            .choice(
                Wellbeing::FIELD,
                "Rate your overall wellbeing (0 = poor, 10 = great)",
                Wellbeing::options(),
            )
            .require([Alertness::FIELD, Wellbeing::FIELD])
            .build(),
        StepDefinition::builder("lifestyle", "Lifestyle factors")
            .description("Answers are confidential and only used to score fatigue risk.")
            .choice(Gender::FIELD, "Gender", Gender::options())
            .choice(
                AlcoholIntake::FIELD,
                "Standard drinks in the last 24 hours",
                AlcoholIntake::options(),
            )
            .yes_no(MEDICATION_FIELD, "Are you taking medication that may cause drowsiness?")
            .yes_no(STRESS_FIELD, "Are you experiencing stress that may affect your work?")
            .require([Gender::FIELD, AlcoholIntake::FIELD, MEDICATION_FIELD, STRESS_FIELD])
            .build(),
        StepDefinition::builder("review", "Review")
            .yes_no("declaration", "The answers I have given are true and correct")
            .require(["declaration"])
            .validator(StepValidator::rules(
                "declaration",
                vec![FieldRule::affirmative("Confirm your answers to submit")],
            ))
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::steps;
    use crate::state::store::DataStore;

    #[test]
    fn choices_reject_unknown_labels() {
        let sleep = &steps()[0];
        let typo = DataStore::new()
            .with("sleep_24h", "Less than 5")
            .with("sleep_48h", "about 12");
        assert!(!sleep.is_valid(&typo));

        let ok = typo.with("sleep_48h", "12-13");
        assert!(sleep.is_valid(&ok));
    }
}
