//! Unit-level census counters and the paired patient lists behind them.
//!
//! Every "count" in the summary is defined as the length of a concrete
//! list, so the two can never drift apart.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{PatientSnapshot, RiskLevel};
use crate::trajectory::DailyStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCensus {
    pub total_patients: usize,
    pub on_ventilation: usize,
    pub on_vasopressors: usize,
    pub high_risk: usize,
    pub moderate_risk: usize,
    pub low_risk: usize,
}

pub fn unit_census(patients: &[PatientSnapshot]) -> UnitCensus {
    UnitCensus {
        total_patients: patients.len(),
        on_ventilation: patients.iter().filter(|p| p.on_ventilation()).count(),
        on_vasopressors: patients
            .iter()
            .filter(|p| p.has_active_vasopressor())
            .count(),
        high_risk: patients
            .iter()
            .filter(|p| p.risk_mortality_24h >= config::CENSUS_HIGH_RISK_THRESHOLD)
            .count(),
        moderate_risk: patients
            .iter()
            .filter(|p| RiskLevel::from_score(p.risk_mortality_24h) == RiskLevel::Moderate)
            .count(),
        low_risk: patients
            .iter()
            .filter(|p| RiskLevel::from_score(p.risk_mortality_24h) == RiskLevel::Low)
            .count(),
    }
}

/// Patients admitted within the trailing 24 wall-clock hours.
pub fn admissions_last_24h<'a>(
    patients: &'a [PatientSnapshot],
    now: DateTime<Utc>,
) -> Vec<&'a PatientSnapshot> {
    let cutoff = now - Duration::hours(24);
    patients
        .iter()
        .filter(|p| p.admission_time(now) > cutoff)
        .collect()
}

/// Whether a patient is expected to leave the unit within one simulated
/// day: the next trajectory day is discharged and no support device is
/// still running.
pub fn discharge_ready(patient: &PatientSnapshot, trajectory: &[DailyStatus]) -> bool {
    if patient.on_ventilation() || patient.has_active_vasopressor() {
        return false;
    }
    trajectory
        .get(patient.icu_day_count as usize)
        .is_some_and(|next| next.global_status.is_discharged())
}
