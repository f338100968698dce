//! Heuristic trajectory for patients with no authored profile.
//!
//! The shape is regime-based: an implied discharge day is derived from the
//! live risk and the current ICU day, risk decays linearly from the
//! admission peak toward that day, and statuses are bucketed coarsely
//! around it. Decay is monotone except inside an explicitly critical
//! regime, where a small deterministic jitter may lift a day.

use chrono::{DateTime, Duration, Utc};

use crate::config;
use crate::models::{GlobalStatus, PatientSnapshot};
use crate::timeline::guard::HighRiskDischargeGuard;

use super::generator::{DailyStatus, HemodynamicSupport, VentilationSupport, GUARDED_EVENT_TEXT};
use super::interpolate::seed_fraction;

const CRITICAL_RISK_THRESHOLD: f64 = 0.65;
const LOW_RISK_THRESHOLD: f64 = 0.40;
const DISCHARGE_RISK: f64 = 0.15;
const POST_DISCHARGE_RISK: f64 = 0.08;
const ADMISSION_PEAK_FLOOR: f64 = 0.30;
const CRITICAL_JITTER_MAX: f64 = 0.04;

/// Implied discharge day given the live risk and the current ICU day.
pub fn implied_discharge_day(risk: f64, current_day: u32) -> u32 {
    if risk < LOW_RISK_THRESHOLD && current_day <= 3 {
        current_day + 2
    } else if risk < CRITICAL_RISK_THRESHOLD {
        (current_day + 5).min(25)
    } else {
        config::MIN_TRAJECTORY_DAYS
    }
}

pub fn generate(patient: &PatientSnapshot, now: DateTime<Utc>) -> Vec<DailyStatus> {
    let live_risk = patient.risk_mortality_24h;
    let discharge_day = implied_discharge_day(live_risk, patient.icu_day_count);
    let total_days = config::MIN_TRAJECTORY_DAYS.max(discharge_day);
    let admission = patient.admission_time(now);
    let guard = HighRiskDischargeGuard::for_patient(patient);
    let critical_onset = live_risk >= CRITICAL_RISK_THRESHOLD;
    let peak = live_risk.max(ADMISSION_PEAK_FLOOR);

    let mut days = Vec::with_capacity(total_days as usize);
    for day in 1..=total_days {
        let date = admission + Duration::days(i64::from(day) - 1);
        let in_critical_regime = critical_onset && day <= 3;

        let mut risk = day_risk(peak, day, discharge_day);
        if in_critical_regime {
            risk = (risk + seed_fraction(&format!("{}-day-{day}", patient.id))
                * CRITICAL_JITTER_MAX)
                .min(1.0);
        }

        let status = day_status(day, discharge_day, in_critical_regime, risk);
        let supported = !status.is_discharged()
            && (day <= patient.icu_day_count
                || matches!(status, GlobalStatus::Critical | GlobalStatus::Severe));

        let mut notable_events = Vec::new();
        if day == 1 {
            notable_events.push("ICU admission".to_string());
        }
        if day == discharge_day {
            let text = "ICU discharge";
            if guard.suppresses(text, day, total_days) {
                notable_events.push(GUARDED_EVENT_TEXT.into());
            } else {
                notable_events.push(text.into());
            }
        }

        days.push(DailyStatus {
            icu_day: day,
            date,
            global_status: status,
            risk_score: risk,
            ventilation_support: if supported {
                patient.ventilation.as_ref().map(|v| VentilationSupport {
                    mode: v.mode,
                    fio2_pct: v.fio2_pct,
                    peep_cmh2o: v.peep_cmh2o,
                })
            } else {
                None
            },
            hemodynamic_support: if supported && patient.has_active_vasopressor() {
                let med = patient
                    .medications
                    .iter()
                    .find(|m| m.is_active_vasopressor());
                HemodynamicSupport {
                    has_vasopressor: true,
                    drug_name: med.map(|m| m.name.clone()),
                    dose_description: med.map(|m| format!("{:.2} {}", m.dose, m.unit)),
                }
            } else {
                HemodynamicSupport::none()
            },
            notable_events,
            daily_summary: summary_for(status),
        });
    }
    days
}

fn day_risk(peak: f64, day: u32, discharge_day: u32) -> f64 {
    if day > discharge_day {
        POST_DISCHARGE_RISK
    } else if day >= discharge_day || discharge_day <= 1 {
        DISCHARGE_RISK
    } else {
        // Linear decay from the admission peak to the discharge-day floor.
        let progress = f64::from(day - 1) / f64::from(discharge_day - 1);
        peak - (peak - DISCHARGE_RISK) * progress
    }
}

fn day_status(day: u32, discharge_day: u32, in_critical_regime: bool, risk: f64) -> GlobalStatus {
    if day > discharge_day {
        GlobalStatus::DischargedIcu
    } else if day + 1 >= discharge_day {
        GlobalStatus::Improving
    } else if in_critical_regime {
        GlobalStatus::Critical
    } else if day <= 10 && risk >= 0.45 {
        GlobalStatus::Severe
    } else {
        GlobalStatus::Stable
    }
}

fn summary_for(status: GlobalStatus) -> String {
    match status {
        GlobalStatus::Critical => "Critical day, full intensive support",
        GlobalStatus::Severe => "Severe but responding to treatment",
        GlobalStatus::Stable => "Stable, supports being weaned",
        GlobalStatus::Improving => "Improving, discharge planning under way",
        GlobalStatus::DischargedIcu => "Discharged from the ICU",
    }
    .to_string()
}
