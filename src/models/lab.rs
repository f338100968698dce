use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{LabKind, LabTrend};

/// A single laboratory result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub id: String,
    pub kind: LabKind,
    pub name: String,
    pub value: f64,
    pub unit: Option<String>,
    pub reference: Option<String>,
    pub trend: Option<LabTrend>,
    /// True when the value falls outside reference bounds.
    pub critical: bool,
    pub collected_at: DateTime<Utc>,
}

/// Most recent result of a given kind, by collection time.
pub fn latest_of_kind(labs: &[LabResult], kind: LabKind) -> Option<&LabResult> {
    labs.iter()
        .filter(|l| l.kind == kind)
        .max_by_key(|l| l.collected_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lactate(value: f64, hour: u32) -> LabResult {
        LabResult {
            id: format!("lac-{hour}"),
            kind: LabKind::Lactate,
            name: "Lactate".into(),
            value,
            unit: Some("mmol/L".into()),
            reference: Some("< 2.0".into()),
            trend: None,
            critical: value >= 3.0,
            collected_at: Utc.with_ymd_and_hms(2026, 8, 30, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn latest_of_kind_picks_newest() {
        let labs = vec![lactate(4.0, 2), lactate(2.5, 10), lactate(3.1, 6)];
        let latest = latest_of_kind(&labs, LabKind::Lactate).unwrap();
        assert_eq!(latest.value, 2.5);
    }

    #[test]
    fn latest_of_kind_none_when_absent() {
        let labs = vec![lactate(4.0, 2)];
        assert!(latest_of_kind(&labs, LabKind::Crp).is_none());
    }
}
