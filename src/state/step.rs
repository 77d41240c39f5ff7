use crate::core::FieldId;
use crate::state::store::DataStore;
use crate::state::validation::{FieldRule, StepValidator, ValidationIssue, validate_step};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
    Cancelled,
}

pub const CHECKLIST_OK: &str = "ok";
pub const CHECKLIST_NOT_OK: &str = "not-ok";
pub const CHECKLIST_NOT_APPLICABLE: &str = "n/a";

/// How a host should capture a field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Multiline,
    Email,
    Password,
    Choice { options: Vec<String> },
    YesNo,
    /// Checklist item status: ok / not-ok / n/a.
    Checklist,
}

impl FieldKind {
    pub fn choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> Vec<&str> {
        match self {
            Self::Choice { options } => options.iter().map(String::as_str).collect(),
            Self::YesNo => vec!["Yes", "No"],
            Self::Checklist => vec![CHECKLIST_OK, CHECKLIST_NOT_OK, CHECKLIST_NOT_APPLICABLE],
            Self::Text | Self::Multiline | Self::Email | Self::Password => Vec::new(),
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub hint: Option<String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            hint: None,
        }
    }

    pub fn text(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// One screen of a wizard: what it asks for and when it may be left forwards.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub validators: Vec<StepValidator>,
}

impl StepDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> StepBuilder {
        StepBuilder::new(id, title)
    }

    pub fn issues(&self, data: &DataStore) -> Vec<ValidationIssue> {
        validate_step(self.id.as_str(), self.validators.as_slice(), data)
    }

    pub fn is_valid(&self, data: &DataStore) -> bool {
        self.issues(data).is_empty()
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id.as_str() == id)
    }
}

pub struct StepBuilder {
    step: StepDefinition,
}

impl StepBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            step: StepDefinition::new(id, title),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.step.description = Some(description.into());
        self
    }

    /// Adds a field. Fields offering options also get a `OneOf` rule so
    /// answers typed outside a picker are still checked.
    pub fn field(mut self, field: FieldSpec) -> Self {
        let options = field.kind.options();
        if !options.is_empty() {
            self.step.validators.push(StepValidator::rules(
                &field.id,
                vec![FieldRule::one_of(options)],
            ));
        }
        self.step.fields.push(field);
        self
    }

    pub fn text(self, id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        self.field(FieldSpec::new(id, label, FieldKind::Text))
    }

    pub fn choice<I, S>(self, id: impl Into<FieldId>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field(FieldSpec::new(id, label, FieldKind::choice(options)))
    }

    pub fn yes_no(self, id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        self.field(FieldSpec::new(id, label, FieldKind::YesNo))
    }

    /// Adds a checklist item as a status field plus a comment field that
    /// becomes mandatory when the status is "not-ok".
    pub fn checklist_item(self, id: &str, label: impl Into<String>) -> Self {
        let status = format!("{id}_status");
        let comment = format!("{id}_comment");
        let mut builder = self
            .field(FieldSpec::new(status.as_str(), label, FieldKind::Checklist))
            .field(
                FieldSpec::new(comment.as_str(), "Comment", FieldKind::Multiline)
                    .with_hint("Required when the item is not OK"),
            );
        builder
            .step
            .validators
            .push(StepValidator::all_required([status.as_str()]));
        builder.step.validators.push(
            StepValidator::conditional_required(comment, status, CHECKLIST_NOT_OK)
                .with_message("Describe the problem before continuing"),
        );
        builder
    }

    /// Marks the given fields as mandatory.
    pub fn require<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        self.step.validators.push(StepValidator::all_required(fields));
        self
    }

    pub fn validator(mut self, validator: StepValidator) -> Self {
        self.step.validators.push(validator);
        self
    }

    pub fn build(self) -> StepDefinition {
        self.step
    }
}
