//! Derived values computed from categorical answers once a flow completes.

pub mod fatigue;
pub mod hazard;

use crate::core::value::Value;
use crate::error::{Error, Result};
use crate::state::store::DataStore;

/// A closed set of labelled answers a form offers for one field.
pub trait Answer: Sized + Copy + 'static {
    /// Key of the field this answer is stored under.
    const FIELD: &'static str;

    fn all() -> &'static [Self];

    fn label(self) -> &'static str;

    fn options() -> Vec<&'static str> {
        Self::all().iter().map(|answer| answer.label()).collect()
    }

    /// Case-insensitive match against the labels.
    fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        Self::all()
            .iter()
            .copied()
            .find(|answer| answer.label().eq_ignore_ascii_case(raw))
            .ok_or_else(|| Error::invalid_answer(Self::FIELD, raw))
    }

    fn from_data(data: &DataStore) -> Result<Self> {
        match data.get(Self::FIELD) {
            Some(value) if !value.is_empty() => Self::parse(value.to_string().as_str()),
            _ => Err(Error::invalid_answer(Self::FIELD, "")),
        }
    }
}

/// Reads a yes/no answer stored either as a boolean or as "Yes"/"No" text.
pub(crate) fn yes_no(data: &DataStore, field: &str) -> Result<bool> {
    match data.get(field) {
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::Text(text)) if text.trim().eq_ignore_ascii_case("yes") => Ok(true),
        Some(Value::Text(text)) if text.trim().eq_ignore_ascii_case("no") => Ok(false),
        Some(other) => Err(Error::invalid_answer(field, other.to_string())),
        None => Err(Error::invalid_answer(field, "")),
    }
}
