use crate::error::Result;
use crate::state::store::DataStore;
use serde::Serialize;
use std::thread;
use std::time::Duration;

/// Terminal artifact of a completed flow: every step's output plus any
/// derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSubmission {
    pub flow: String,
    pub data: DataStore,
}

impl FormSubmission {
    pub fn new(flow: impl Into<String>, data: DataStore) -> Self {
        Self {
            flow: flow.into(),
            data,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub trait SubmissionSink {
    fn submit(&mut self, submission: &FormSubmission) -> Result<()>;
}

/// Writes submissions to the log; there is no backend to send them to.
#[derive(Debug, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, submission: &FormSubmission) -> Result<()> {
        let payload = serde_json::to_string(&submission.data)?;
        tracing::info!(flow = %submission.flow, %payload, "form submitted");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    pub submissions: Vec<FormSubmission>,
}

impl SubmissionSink for MemorySink {
    fn submit(&mut self, submission: &FormSubmission) -> Result<()> {
        self.submissions.push(submission.clone());
        Ok(())
    }
}

/// Waits the fixed submission delay, then hands over. Not cancellable.
pub fn submit_after(
    sink: &mut dyn SubmissionSink,
    submission: &FormSubmission,
    delay: Duration,
) -> Result<()> {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    sink.submit(submission)
}

#[cfg(test)]
mod tests {
    use super::{FormSubmission, MemorySink, submit_after};
    use crate::state::store::DataStore;
    use std::time::Duration;

    #[test]
    fn json_keeps_field_order() {
        let submission = FormSubmission::new(
            "hazard-report",
            DataStore::new().with("location", "Crusher").with("escalate", true),
        );
        let json = submission.to_json().expect("json");
        let location = json.find("location").expect("location key");
        let escalate = json.find("escalate").expect("escalate key");
        assert!(location < escalate);
        assert!(json.contains("\"flow\": \"hazard-report\""));
    }

    #[test]
    fn submit_after_reaches_sink() {
        let mut sink = MemorySink::default();
        let submission = FormSubmission::new("pace-card", DataStore::new());
        submit_after(&mut sink, &submission, Duration::ZERO).expect("submit");
        assert_eq!(sink.submissions, vec![submission]);
    }
}
