use crate::core::FieldId;
use crate::state::store::DataStore;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};

const REQUIRED_MESSAGE: &str = "This field is required";
const MISMATCH_MESSAGE: &str = "Values do not match";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationTarget {
    Field(FieldId),
    Step,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub target: ValidationTarget,
    pub message: String,
}

impl ValidationIssue {
    pub fn field(id: impl Into<FieldId>, message: impl Into<String>) -> Self {
        Self {
            target: ValidationTarget::Field(id.into()),
            message: message.into(),
        }
    }

    pub fn step(message: impl Into<String>) -> Self {
        Self {
            target: ValidationTarget::Step,
            message: message.into(),
        }
    }

    pub fn field_id(&self) -> Option<&str> {
        match &self.target {
            ValidationTarget::Field(id) => Some(id.as_str()),
            ValidationTarget::Step => None,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            ValidationTarget::Field(id) => write!(f, "{id}: {}", self.message),
            ValidationTarget::Step => f.write_str(self.message.as_str()),
        }
    }
}

/// Read-only view handed to validators: the step being checked and the data
/// it would advance with.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    step_id: &'a str,
    data: &'a DataStore,
}

impl<'a> ValidationContext<'a> {
    pub fn new(step_id: &'a str, data: &'a DataStore) -> Self {
        Self { step_id, data }
    }

    pub fn step_id(&self) -> &str {
        self.step_id
    }

    pub fn data(&self) -> &DataStore {
        self.data
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.data.text(id)
    }

    pub fn is_empty(&self, id: &str) -> bool {
        self.data.is_empty_field(id)
    }
}

type ValidatorFn = dyn Fn(&ValidationContext<'_>) -> Vec<ValidationIssue> + Send + Sync;

#[derive(Clone)]
pub struct CustomValidator(Arc<ValidatorFn>);

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomValidator(..)")
    }
}

/// Per-field format rules. An empty field passes every rule; pair with
/// [`StepValidator::AllRequired`] to demand a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    MinLength { min: usize },
    MaxLength { max: usize },
    Email,
    /// Case-insensitive membership in a fixed option list.
    OneOf {
        options: Vec<String>,
        #[serde(default)]
        message: Option<String>,
    },
    Pattern {
        pattern: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl FieldRule {
    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            options: options.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Accepts only a "Yes" answer, e.g. a declaration that must be ticked.
    pub fn affirmative(message: impl Into<String>) -> Self {
        Self::OneOf {
            options: vec!["Yes".to_string()],
            message: Some(message.into()),
        }
    }

    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Self::MinLength { min } => {
                if value.chars().count() < *min {
                    Err(format!("Minimum length is {min}"))
                } else {
                    Ok(())
                }
            }
            Self::MaxLength { max } => {
                if value.chars().count() > *max {
                    Err(format!("Maximum length is {max}"))
                } else {
                    Ok(())
                }
            }
            Self::Email => {
                if EMAIL.is_match(value.trim()) {
                    Ok(())
                } else {
                    Err("Enter a valid email address".to_string())
                }
            }
            Self::OneOf { options, message } => {
                if options
                    .iter()
                    .any(|option| option.eq_ignore_ascii_case(value.trim()))
                {
                    Ok(())
                } else {
                    Err(message
                        .clone()
                        .unwrap_or_else(|| format!("Choose one of: {}", options.join(", "))))
                }
            }
            Self::Pattern { pattern, message } => {
                let re = Regex::new(pattern).map_err(|err| format!("Invalid pattern: {err}"))?;
                if re.is_match(value) {
                    Ok(())
                } else {
                    Err(message
                        .clone()
                        .unwrap_or_else(|| format!("Value must match pattern: {pattern}")))
                }
            }
        }
    }

    /// Compiles a `Pattern` rule up front so bad documents fail at load time.
    pub fn compile_check(&self) -> Result<(), regex::Error> {
        if let Self::Pattern { pattern, .. } = self {
            Regex::new(pattern)?;
        }
        Ok(())
    }
}

/// The validation strategies a step can declare.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepValidator {
    /// Every listed field must be non-empty.
    AllRequired {
        fields: Vec<FieldId>,
        #[serde(default)]
        message: Option<String>,
    },
    /// `field` is required only while `when` equals `equals`.
    ConditionalRequired {
        field: FieldId,
        when: FieldId,
        equals: String,
        #[serde(default)]
        message: Option<String>,
    },
    /// Both fields non-empty and equal.
    EqualityConstrained {
        field: FieldId,
        confirm: FieldId,
        #[serde(default)]
        message: Option<String>,
    },
    FieldRules { field: FieldId, rules: Vec<FieldRule> },
    #[serde(skip)]
    Custom(CustomValidator),
}

impl StepValidator {
    pub fn all_required<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        Self::AllRequired {
            fields: fields.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    pub fn conditional_required(
        field: impl Into<FieldId>,
        when: impl Into<FieldId>,
        equals: impl Into<String>,
    ) -> Self {
        Self::ConditionalRequired {
            field: field.into(),
            when: when.into(),
            equals: equals.into(),
            message: None,
        }
    }

    pub fn equality(field: impl Into<FieldId>, confirm: impl Into<FieldId>) -> Self {
        Self::EqualityConstrained {
            field: field.into(),
            confirm: confirm.into(),
            message: None,
        }
    }

    pub fn rules(field: impl Into<FieldId>, rules: Vec<FieldRule>) -> Self {
        Self::FieldRules {
            field: field.into(),
            rules,
        }
    }

    pub fn custom(
        f: impl Fn(&ValidationContext<'_>) -> Vec<ValidationIssue> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(CustomValidator(Arc::new(f)))
    }

    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::AllRequired { message, .. }
            | Self::ConditionalRequired { message, .. }
            | Self::EqualityConstrained { message, .. } => *message = Some(text.into()),
            Self::FieldRules { .. } | Self::Custom(_) => {}
        }
        self
    }

    pub fn issues(&self, ctx: &ValidationContext<'_>) -> Vec<ValidationIssue> {
        match self {
            Self::AllRequired { fields, message } => fields
                .iter()
                .filter(|id| ctx.is_empty(id.as_str()))
                .map(|id| ValidationIssue::field(id, required_message(message)))
                .collect(),
            Self::ConditionalRequired {
                field,
                when,
                equals,
                message,
            } => {
                let triggered = ctx
                    .data()
                    .get(when.as_str())
                    .is_some_and(|value| value.matches(equals));
                if triggered && ctx.is_empty(field.as_str()) {
                    vec![ValidationIssue::field(field, required_message(message))]
                } else {
                    Vec::new()
                }
            }
            Self::EqualityConstrained {
                field,
                confirm,
                message,
            } => {
                let mut issues: Vec<ValidationIssue> = [field, confirm]
                    .into_iter()
                    .filter(|id| ctx.is_empty(id.as_str()))
                    .map(|id| ValidationIssue::field(id, REQUIRED_MESSAGE))
                    .collect();
                if issues.is_empty() && ctx.data().get(field.as_str()) != ctx.data().get(confirm.as_str()) {
                    issues.push(ValidationIssue::field(
                        confirm,
                        message.as_deref().unwrap_or(MISMATCH_MESSAGE),
                    ));
                }
                issues
            }
            Self::FieldRules { field, rules } => {
                let Some(value) = ctx.data().get(field.as_str()) else {
                    return Vec::new();
                };
                if value.is_empty() {
                    return Vec::new();
                }
                let raw = value.to_string();
                rules
                    .iter()
                    .find_map(|rule| rule.check(raw.as_str()).err())
                    .map(|err| vec![ValidationIssue::field(field, err)])
                    .unwrap_or_default()
            }
            Self::Custom(CustomValidator(f)) => f(ctx),
        }
    }

    pub fn is_valid(&self, ctx: &ValidationContext<'_>) -> bool {
        self.issues(ctx).is_empty()
    }
}

fn required_message(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or(REQUIRED_MESSAGE)
}

/// Runs every validator of a step against `data`.
pub fn validate_step(
    step_id: &str,
    validators: &[StepValidator],
    data: &DataStore,
) -> Vec<ValidationIssue> {
    let ctx = ValidationContext::new(step_id, data);
    validators
        .iter()
        .flat_map(|validator| validator.issues(&ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{FieldRule, StepValidator, ValidationContext, ValidationIssue, validate_step};
    use crate::core::value::Value;
    use crate::state::store::DataStore;

    fn check(validator: &StepValidator, data: &DataStore) -> bool {
        validator.is_valid(&ValidationContext::new("step", data))
    }

    #[test]
    fn all_required_fails_iff_some_field_empty() {
        let validator = StepValidator::all_required(["name", "site"]);

        let full = DataStore::new().with("name", "Ana").with("site", "Pit 3");
        assert!(check(&validator, &full));

        let blank = full.clone().with("site", "   ");
        assert!(!check(&validator, &blank));

        let missing = DataStore::new().with("name", "Ana");
        assert!(!check(&validator, &missing));

        let none = full.with("name", Value::None);
        assert!(!check(&validator, &none));
    }

    #[test]
    fn conditional_required_only_applies_on_sentinel() {
        let validator =
            StepValidator::conditional_required("brakes_comment", "brakes_status", "not-ok");

        let not_ok = DataStore::new()
            .with("brakes_status", "not-ok")
            .with("brakes_comment", "");
        assert!(!check(&validator, &not_ok));

        let ok = DataStore::new()
            .with("brakes_status", "ok")
            .with("brakes_comment", "");
        assert!(check(&validator, &ok));

        let explained = not_ok.with("brakes_comment", "Pads worn, tagged out");
        assert!(check(&validator, &explained));
    }

    #[test]
    fn equality_requires_both_present_and_equal() {
        let validator = StepValidator::equality("password", "confirm");

        let cases = [
            ("secret123", "secret123", true),
            ("secret123", "secret124", false),
            ("", "", false),
            ("secret123", "", false),
            ("", "secret123", false),
        ];
        for (password, confirm, expected) in cases {
            let data = DataStore::new()
                .with("password", password)
                .with("confirm", confirm);
            assert_eq!(check(&validator, &data), expected, "{password:?}/{confirm:?}");
        }
    }

    #[test]
    fn mismatch_is_reported_on_confirm_field() {
        let data = DataStore::new().with("password", "a1").with("confirm", "b2");
        let issues = validate_step("pw", &[StepValidator::equality("password", "confirm")], &data);
        assert_eq!(issues, vec![ValidationIssue::field("confirm", "Values do not match")]);
    }

    #[test]
    fn field_rules_skip_empty_and_report_first_failure() {
        let validator = StepValidator::rules(
            "email",
            vec![FieldRule::MinLength { min: 3 }, FieldRule::Email],
        );
        assert!(check(&validator, &DataStore::new()));
        assert!(check(&validator, &DataStore::new().with("email", "ana@mine.com.au")));

        let issues = validate_step("s", &[validator], &DataStore::new().with("email", "ab"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Minimum length is 3");
    }

    #[test]
    fn affirmative_rule_accepts_only_yes() {
        let validator = StepValidator::rules(
            "declaration",
            vec![FieldRule::affirmative("Confirm your answers to submit")],
        );
        assert!(check(&validator, &DataStore::new().with("declaration", "yes")));
        assert!(check(&validator, &DataStore::new().with("declaration", true)));

        let issues = validate_step("review", &[validator], &DataStore::new().with("declaration", "No"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Confirm your answers to submit");
    }

    #[test]
    fn one_of_without_message_lists_options() {
        let rule = FieldRule::one_of(["Day", "Night"]);
        assert!(rule.check(" night ").is_ok());
        assert_eq!(rule.check("Swing"), Err("Choose one of: Day, Night".to_string()));
    }

    #[test]
    fn invalid_pattern_surfaces_as_issue() {
        let rule = FieldRule::Pattern {
            pattern: "([".to_string(),
            message: None,
        };
        assert!(rule.compile_check().is_err());
        assert!(rule.check("anything").is_err());
    }

    #[test]
    fn custom_validator_sees_step_id() {
        let validator = StepValidator::custom(|ctx| {
            if ctx.step_id() == "sign_off" && ctx.text("agree") != Some("yes") {
                vec![ValidationIssue::step("You must agree before submitting")]
            } else {
                Vec::new()
            }
        });
        let ctx_data = DataStore::new().with("agree", "no");
        let issues = validator.issues(&ValidationContext::new("sign_off", &ctx_data));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].field_id().is_none());
    }

    #[test]
    fn yaml_validators_deserialize() {
        let yaml = r#"
- kind: all_required
  fields: [name, site]
- kind: conditional_required
  field: comment
  when: status
  equals: not-ok
- kind: field_rules
  field: email
  rules:
    - rule: email
    - rule: min_length
      min: 5
"#;
        let validators: Vec<StepValidator> = serde_yaml::from_str(yaml).expect("validators");
        assert_eq!(validators.len(), 3);
        assert!(matches!(validators[2], StepValidator::FieldRules { .. }));
    }
}
