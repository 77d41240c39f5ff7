//! Flows declared in YAML instead of code.
//!
//! ```yaml
//! id: vehicle-prestart
//! title: Vehicle pre-start
//! steps:
//!   - id: vehicle
//!     title: Vehicle
//!     fields:
//!       - id: rego
//!         label: Registration
//!     validators:
//!       - kind: all_required
//!         fields: [rego]
//!   - id: checks
//!     title: Checks
//!     checklist:
//!       - id: tyres
//!         label: Tyres
//! ```

use crate::error::{Error, Result};
use crate::state::flow::Wizard;
use crate::state::step::{FieldSpec, StepDefinition};
use crate::state::store::DataStore;
use crate::state::validation::{StepValidator, ValidationIssue, validate_step};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub checklist: Vec<ChecklistEntry>,
    #[serde(default)]
    pub validators: Vec<StepValidator>,
}

impl StepDocument {
    fn to_step(&self) -> Result<StepDefinition> {
        let mut builder = StepDefinition::builder(self.id.as_str(), self.title.as_str());
        if let Some(description) = &self.description {
            builder = builder.description(description.as_str());
        }
        for field in &self.fields {
            builder = builder.field(field.clone());
        }
        for entry in &self.checklist {
            builder = builder.checklist_item(entry.id.as_str(), entry.label.as_str());
        }
        for validator in &self.validators {
            if let StepValidator::FieldRules { rules, .. } = validator {
                for rule in rules {
                    rule.compile_check().map_err(|source| Error::InvalidPattern {
                        step: self.id.clone(),
                        source,
                    })?;
                }
            }
            builder = builder.validator(validator.clone());
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowDocument {
    pub id: String,
    pub title: String,
    pub steps: Vec<StepDocument>,
}

impl FlowDocument {
    pub fn from_yaml(data: &str) -> Result<Self> {
        let document: Self = serde_yaml::from_str(data)?;
        document.to_steps()?;
        Ok(document)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_yaml(fs::read_to_string(path)?.as_str())
    }

    pub fn to_steps(&self) -> Result<Vec<StepDefinition>> {
        self.steps.iter().map(StepDocument::to_step).collect()
    }

    pub fn wizard(&self) -> Result<Wizard> {
        Wizard::new(self.to_steps()?)
    }
}

/// Replays `answers` through every step of `steps` and returns the issues of
/// the first step that would block, if any.
pub fn first_blocking_step(
    steps: &[StepDefinition],
    answers: &DataStore,
) -> Option<(String, Vec<ValidationIssue>)> {
    steps.iter().find_map(|step| {
        let issues = validate_step(step.id.as_str(), step.validators.as_slice(), answers);
        (!issues.is_empty()).then(|| (step.id.clone(), issues))
    })
}
