//! Cross-view consistency guard.
//!
//! A patient whose live 24h mortality risk is high must never surface a
//! recent discharge narrative, no matter which view derived it. Every call
//! site that could emit discharge-worded content (trajectory notable events,
//! the full timeline, the recent summary) goes through this one predicate so
//! the rule cannot drift between them.

use std::sync::LazyLock;

use regex::Regex;

use crate::config;
use crate::models::PatientSnapshot;

// Authored wording exists in both English and Portuguese.
static DISCHARGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)discharge|alta").expect("static regex"));

pub fn is_discharge_worded(text: &str) -> bool {
    DISCHARGE_RE.is_match(text)
}

#[derive(Debug, Clone, Copy)]
pub struct HighRiskDischargeGuard {
    high_risk: bool,
}

impl HighRiskDischargeGuard {
    pub fn for_patient(patient: &PatientSnapshot) -> Self {
        Self {
            high_risk: patient.risk_mortality_24h > config::HIGH_RISK_GUARD_THRESHOLD,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.high_risk
    }

    /// True when `day` falls inside the trailing guard window of a
    /// trajectory of `total_days` simulated days.
    pub fn in_recent_window(&self, day: u32, total_days: u32) -> bool {
        day > total_days.saturating_sub(config::GUARD_WINDOW_DAYS)
    }

    /// Whether discharge-worded content for simulated day `day` must be
    /// suppressed.
    pub fn suppresses(&self, text: &str, day: u32, total_days: u32) -> bool {
        self.high_risk && self.in_recent_window(day, total_days) && is_discharge_worded(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo;
    use chrono::{TimeZone, Utc};

    #[test]
    fn matches_both_languages() {
        assert!(is_discharge_worded("Planned ICU discharge"));
        assert!(is_discharge_worded("Alta da UTI programada"));
        assert!(!is_discharge_worded("Ventilatory wean in progress"));
    }

    #[test]
    fn only_high_risk_patients_trigger_suppression() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let high = HighRiskDischargeGuard::for_patient(&demo::septic_shock("p1", now));
        let low = HighRiskDischargeGuard::for_patient(&demo::baseline("p2", now));
        assert!(high.suppresses("ICU discharge", 28, 30));
        assert!(!low.suppresses("ICU discharge", 28, 30));
    }

    #[test]
    fn old_events_escape_the_window() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let guard = HighRiskDischargeGuard::for_patient(&demo::septic_shock("p1", now));
        // Day 10 of 30 is outside the trailing 14-day window.
        assert!(!guard.suppresses("ICU discharge", 10, 30));
        assert!(guard.suppresses("ICU discharge", 17, 30));
    }
}
