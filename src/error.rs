use thiserror::Error;

use crate::auth::AuthError;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that stop an operation. Validation problems are not errors; they
/// come back as `ValidationIssue`s and leave the user on the current step.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a flow needs at least one step")]
    EmptyFlow,
    #[error("duplicate step id `{0}`")]
    DuplicateStep(String),
    #[error("unknown flow `{0}`")]
    UnknownFlow(String),
    #[error("invalid answer for `{field}`: `{value}`")]
    InvalidAnswer { field: String, value: String },
    #[error("invalid pattern in step `{step}`: {source}")]
    InvalidPattern {
        step: String,
        #[source]
        source: regex::Error,
    },
    #[error("cannot {intent} from {route}")]
    InvalidNavigation { route: String, intent: String },
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl Error {
    pub fn invalid_answer(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            field: field.into(),
            value: value.into(),
        }
    }
}
