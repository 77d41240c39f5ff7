use crate::config::AppConfig;
use crate::state::step::{FieldKind, FieldSpec, StepDefinition};
use crate::state::validation::{FieldRule, StepValidator};

pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";
pub const CONFIRM_PASSWORD_FIELD: &str = "confirm_password";

pub(super) fn steps(config: &AppConfig) -> Vec<StepDefinition> {
    vec![
        StepDefinition::builder("details", "Your details")
            .text("full_name", "Full name")
            .field(FieldSpec::new(EMAIL_FIELD, "Email", FieldKind::Email))
            .text("employer", "Employer")
            .require(["full_name", EMAIL_FIELD, "employer"])
            .validator(StepValidator::rules(EMAIL_FIELD, vec![FieldRule::Email]))
            .build(),
        StepDefinition::builder("password", "Choose a password")
            .field(FieldSpec::new(PASSWORD_FIELD, "Password", FieldKind::Password))
            .field(FieldSpec::new(
                CONFIRM_PASSWORD_FIELD,
                "Confirm password",
                FieldKind::Password,
            ))
            .validator(StepValidator::rules(
                PASSWORD_FIELD,
                vec![FieldRule::MinLength {
                    min: config.min_password_length,
                }],
            ))
            .validator(
                StepValidator::equality(PASSWORD_FIELD, CONFIRM_PASSWORD_FIELD)
                    .with_message("Passwords do not match"),
            )
            .build(),
        StepDefinition::builder("terms", "Terms of use")
            .description("SafeMate records your safety submissions against your site.")
            .yes_no("accept_terms", "I accept the terms of use")
            .require(["accept_terms"])
            .validator(StepValidator::rules(
                "accept_terms",
                vec![FieldRule::affirmative("You must accept the terms to continue")],
            ))
            .build(),
    ]
}
