use crate::error::Result;
use crate::scoring::Answer;
use crate::state::store::DataStore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Answer for Severity {
    const FIELD: &'static str = "severity";

    fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// How soon the hazard has to be made safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Immediate,
    Within24Hours,
    WithinWeek,
    NextMaintenance,
}

impl Answer for Timeframe {
    const FIELD: &'static str = "timeframe";

    fn all() -> &'static [Self] {
        &[
            Self::Immediate,
            Self::Within24Hours,
            Self::WithinWeek,
            Self::NextMaintenance,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::Within24Hours => "Within 24 hours",
            Self::WithinWeek => "Within a week",
            Self::NextMaintenance => "Next scheduled maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HazardAssessment {
    pub severity: &'static str,
    pub timeframe: &'static str,
    pub escalate: bool,
}

pub fn requires_escalation(severity: Severity, timeframe: Timeframe) -> bool {
    severity == Severity::Critical || timeframe == Timeframe::Immediate
}

pub fn assess(data: &DataStore) -> Result<HazardAssessment> {
    let severity = Severity::from_data(data)?;
    let timeframe = Timeframe::from_data(data)?;
    let escalate = requires_escalation(severity, timeframe);
    if escalate {
        tracing::info!(
            severity = severity.label(),
            timeframe = timeframe.label(),
            "hazard flagged for escalation"
        );
    }
    Ok(HazardAssessment {
        severity: severity.label(),
        timeframe: timeframe.label(),
        escalate,
    })
}

#[cfg(test)]
mod tests {
    use super::{Severity, Timeframe, assess, requires_escalation};
    use crate::state::store::DataStore;

    #[test]
    fn critical_or_immediate_escalates() {
        assert!(requires_escalation(Severity::Critical, Timeframe::WithinWeek));
        assert!(requires_escalation(Severity::Low, Timeframe::Immediate));
        assert!(!requires_escalation(Severity::High, Timeframe::Within24Hours));
    }

    #[test]
    fn assess_reads_labels_from_data() {
        let data = DataStore::new()
            .with("severity", "critical")
            .with("timeframe", "Next scheduled maintenance");
        let assessment = assess(&data).expect("assessment");
        assert!(assessment.escalate);
        assert_eq!(assessment.severity, "Critical");

        assert!(assess(&DataStore::new().with("severity", "High")).is_err());
    }
}
