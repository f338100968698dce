use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::enums::str_enum;
use crate::models::enums::ParseEnumError;

str_enum!(EventType {
    Admission => "admission",
    Vitals => "vitals",
    Lab => "lab",
    Imaging => "imaging",
    Therapy => "therapy",
    Note => "note",
});

str_enum!(EventSeverity {
    Normal => "normal",
    Warning => "warning",
    Critical => "critical",
});

impl EventSeverity {
    /// Sort rank, higher is more severe.
    pub fn rank(self) -> u8 {
        match self {
            EventSeverity::Normal => 0,
            EventSeverity::Warning => 1,
            EventSeverity::Critical => 2,
        }
    }
}

/// One discrete entry of a patient's derived event timeline.
///
/// Events are synthesized on demand from the trajectory and the raw
/// lab/medication records; they are never persisted. Ids are deterministic
/// so repeated synthesis of the same inputs yields identical lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub severity: EventSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_exam_id: Option<String>,
}

/// Result of the recent-events query. `is_fallback` tells the caller that
/// nothing happened inside the window, so it must render an explicit empty
/// state instead of reaching for stale events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub events: Vec<TimelineEvent>,
    pub is_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ranks_order_correctly() {
        assert!(EventSeverity::Critical.rank() > EventSeverity::Warning.rank());
        assert!(EventSeverity::Warning.rank() > EventSeverity::Normal.rank());
    }

    #[test]
    fn event_type_round_trips_through_str() {
        assert_eq!(EventType::Imaging.as_str(), "imaging");
        assert_eq!("therapy".parse::<EventType>().unwrap(), EventType::Therapy);
        assert!("surgery".parse::<EventType>().is_err());
    }
}
