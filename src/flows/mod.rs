//! The application's form flows. Each flow is configuration only: an ordered
//! list of steps with their fields and validators.

pub mod document;
mod fatigue;
mod hazard;
mod pace_card;
mod sign_up;
mod take_control;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::scoring;
use crate::state::flow::Wizard;
use crate::state::step::StepDefinition;
use crate::state::store::DataStore;
use crate::submission::FormSubmission;
use document::FlowDocument;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use sign_up::{CONFIRM_PASSWORD_FIELD, EMAIL_FIELD, PASSWORD_FIELD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    SignUp,
    TakeControl,
    Fatigue,
    PaceCard,
    HazardReport,
}

impl FlowKind {
    pub const ALL: [FlowKind; 5] = [
        Self::SignUp,
        Self::TakeControl,
        Self::Fatigue,
        Self::PaceCard,
        Self::HazardReport,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::SignUp => "sign-up",
            Self::TakeControl => "take-control",
            Self::Fatigue => "fatigue",
            Self::PaceCard => "pace-card",
            Self::HazardReport => "hazard-report",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SignUp => "Create account",
            Self::TakeControl => "Take Control",
            Self::Fatigue => "Fatigue Management",
            Self::PaceCard => "Pace Card",
            Self::HazardReport => "Hazard Report",
        }
    }

    /// Safety forms are only reachable with a company and site selected.
    pub fn is_safety_form(self) -> bool {
        !matches!(self, Self::SignUp)
    }

    pub fn steps(self, config: &AppConfig) -> Vec<StepDefinition> {
        match self {
            Self::SignUp => sign_up::steps(config),
            Self::TakeControl => take_control::steps(),
            Self::Fatigue => fatigue::steps(),
            Self::PaceCard => pace_card::steps(),
            Self::HazardReport => hazard::steps(),
        }
    }

    pub fn wizard(self, config: &AppConfig) -> Result<Wizard> {
        Wizard::new(self.steps(config))
    }

    /// Builds the submission from a completed flow's aggregate, adding the
    /// derived fields and dropping secrets.
    pub fn finalize(self, mut data: DataStore) -> Result<FormSubmission> {
        match self {
            Self::SignUp => {
                data.remove(PASSWORD_FIELD);
                data.remove(CONFIRM_PASSWORD_FIELD);
            }
            Self::Fatigue => {
                let assessment = scoring::fatigue::assess(&data)?;
                data.set("risk_score", i64::from(assessment.score));
                data.set("risk_level", assessment.level.label());
                data.set("recommendation", assessment.level.recommendation());
            }
            Self::HazardReport => {
                let assessment = scoring::hazard::assess(&data)?;
                data.set("escalate", assessment.escalate);
            }
            Self::TakeControl | Self::PaceCard => {}
        }
        Ok(FormSubmission::new(self.id(), data))
    }
}

/// Where a runnable flow comes from: the built-in catalog or a YAML document.
#[derive(Debug, Clone)]
pub enum FlowSource {
    Builtin(FlowKind),
    Document(FlowDocument),
}

impl FlowSource {
    /// A document path wins over a flow id.
    pub fn resolve(flow: Option<&str>, document: Option<&Path>) -> Result<Self> {
        match (flow, document) {
            (_, Some(path)) => Ok(Self::Document(FlowDocument::from_file(path)?)),
            (Some(flow), None) => Ok(Self::Builtin(flow.parse()?)),
            (None, None) => Err(Error::UnknownFlow(String::new())),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Builtin(kind) => kind.title(),
            Self::Document(document) => &document.title,
        }
    }

    pub fn wizard(&self, config: &AppConfig) -> Result<Wizard> {
        match self {
            Self::Builtin(kind) => kind.wizard(config),
            Self::Document(document) => document.wizard(),
        }
    }

    pub fn finalize(&self, data: DataStore) -> Result<FormSubmission> {
        match self {
            Self::Builtin(kind) => kind.finalize(data),
            Self::Document(document) => Ok(FormSubmission::new(document.id.clone(), data)),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FlowKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| Error::UnknownFlow(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::FlowKind;
    use crate::config::AppConfig;
    use crate::error::Error;
    use crate::state::store::DataStore;

    #[test]
    fn every_flow_builds_a_wizard() {
        let config = AppConfig::for_tests();
        for kind in FlowKind::ALL {
            let wizard = kind.wizard(&config).expect("wizard");
            assert!(wizard.len() >= 2, "{kind} has too few steps");
        }
    }

    #[test]
    fn parses_ids_leniently() {
        assert_eq!("Take_Control".parse::<FlowKind>().expect("kind"), FlowKind::TakeControl);
        assert!(matches!("leaderboard".parse::<FlowKind>(), Err(Error::UnknownFlow(_))));
    }

    #[test]
    fn sign_up_submission_drops_passwords() {
        let data = DataStore::new()
            .with("email", "a@b.co")
            .with("password", "hunter22")
            .with("confirm_password", "hunter22");
        let submission = FlowKind::SignUp.finalize(data).expect("submission");
        assert!(submission.data.get("password").is_none());
        assert!(submission.data.get("confirm_password").is_none());
        assert_eq!(submission.data.text("email"), Some("a@b.co"));
    }
}
