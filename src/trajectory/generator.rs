//! Day-by-day trajectory synthesis from an authored clinical profile.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{GlobalStatus, PatientSnapshot, TrendDirection, VentMode};
use crate::profile::ClinicalProfile;
use crate::timeline::guard::HighRiskDischargeGuard;

use super::fallback;
use super::interpolate::{lerp, phase_progress, trend_value};

/// Simulated ventilatory support for one ICU day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentilationSupport {
    pub mode: VentMode,
    pub fio2_pct: f64,
    pub peep_cmh2o: f64,
}

/// Simulated vasoactive support for one ICU day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HemodynamicSupport {
    pub has_vasopressor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drug_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_description: Option<String>,
}

impl HemodynamicSupport {
    pub fn none() -> Self {
        Self {
            has_vasopressor: false,
            drug_name: None,
            dose_description: None,
        }
    }
}

/// One simulated ICU day. Immutable once generated; sequences are cached
/// per patient for the process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStatus {
    pub icu_day: u32,
    pub date: DateTime<Utc>,
    pub global_status: GlobalStatus,
    pub risk_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventilation_support: Option<VentilationSupport>,
    pub hemodynamic_support: HemodynamicSupport,
    pub notable_events: Vec<String>,
    pub daily_summary: String,
}

/// Replacement wording when the consistency guard suppresses an authored
/// discharge event.
pub const GUARDED_EVENT_TEXT: &str = "Support adjustment and clinical reassessment";

const DEFAULT_FIO2_PCT: f64 = 40.0;
const DEFAULT_PEEP_CMH2O: f64 = 6.0;
const DEFAULT_VASOPRESSOR_DOSE: f64 = 0.5;
const DEFAULT_VASOPRESSOR_NAME: &str = "Norepinephrine";
const DISCHARGED_RISK: f64 = 0.1;

/// Produce the full trajectory for a patient: profile-interpolated when a
/// valid authored profile exists, heuristic otherwise. A malformed profile
/// is reported and demoted to the heuristic path, never an error.
pub fn generate(
    patient: &PatientSnapshot,
    profile: Option<&ClinicalProfile>,
    now: DateTime<Utc>,
) -> Vec<DailyStatus> {
    match profile {
        Some(profile) => match profile.validate() {
            Ok(()) => from_profile(patient, profile, now),
            Err(err) => {
                tracing::warn!(
                    patient_id = %patient.id,
                    error = %err,
                    "clinical profile failed validation, using heuristic trajectory"
                );
                fallback::generate(patient, now)
            }
        },
        None => fallback::generate(patient, now),
    }
}

// Support values interpolate against the live snapshot so the simulated
// course lands on what the bedside actually shows today.
struct Anchors {
    fio2_pct: f64,
    peep_cmh2o: f64,
    vent_mode: VentMode,
    vaso_dose: f64,
    vaso_name: String,
}

impl Anchors {
    fn from_snapshot(patient: &PatientSnapshot) -> Self {
        let (fio2_pct, peep_cmh2o, vent_mode) = match &patient.ventilation {
            Some(v) => (v.fio2_pct, v.peep_cmh2o, v.mode),
            None => (DEFAULT_FIO2_PCT, DEFAULT_PEEP_CMH2O, VentMode::Psv),
        };
        let vaso = patient
            .medications
            .iter()
            .find(|m| m.is_active_vasopressor());
        Self {
            fio2_pct,
            peep_cmh2o,
            vent_mode,
            vaso_dose: vaso.map_or(DEFAULT_VASOPRESSOR_DOSE, |m| m.dose),
            vaso_name: vaso.map_or_else(|| DEFAULT_VASOPRESSOR_NAME.into(), |m| m.name.clone()),
        }
    }
}

fn from_profile(
    patient: &PatientSnapshot,
    profile: &ClinicalProfile,
    now: DateTime<Utc>,
) -> Vec<DailyStatus> {
    let total_days = config::MIN_TRAJECTORY_DAYS.max(profile.discharge_day);
    let admission = patient.admission_time(now);
    let guard = HighRiskDischargeGuard::for_patient(patient);
    let anchors = Anchors::from_snapshot(patient);

    let mut days = Vec::with_capacity(total_days as usize);
    for day in 1..=total_days {
        let date = admission + Duration::days(i64::from(day) - 1);
        let entry = if let Some(phase) = profile.phase_for_day(day) {
            let progress = phase_progress(day, phase.day_start, phase.day_end);
            phase_day(day, date, phase, progress, &anchors)
        } else if day > profile.discharge_day && day > patient.icu_day_count {
            discharged_day(day, date)
        } else if let Some(prev) = profile.phase_before_day(day) {
            // Freeze-forward: hold the terminal values of the last authored
            // phase for days the author left uncovered.
            phase_day(day, date, prev, 1.0, &anchors)
        } else {
            discharged_day(day, date)
        };
        days.push(entry);
    }

    attach_key_events(&mut days, profile, &guard, total_days);
    days
}

fn phase_day(
    day: u32,
    date: DateTime<Utc>,
    phase: &crate::profile::Phase,
    progress: f64,
    anchors: &Anchors,
) -> DailyStatus {
    // Risk runs from the phase max down to its min: each phase models a
    // stretch of stabilization.
    let risk_score = lerp(phase.risk_max, phase.risk_min, progress).clamp(0.0, 1.0);

    let ventilation_support = phase.has_ventilation.then(|| {
        let trend = phase.fio2_trend.unwrap_or(TrendDirection::Stable);
        VentilationSupport {
            mode: anchors.vent_mode,
            fio2_pct: round1(
                trend_value(anchors.fio2_pct, trend, progress)
                    .clamp(config::FIO2_MIN_PCT, config::FIO2_MAX_PCT),
            ),
            peep_cmh2o: round1(trend_value(anchors.peep_cmh2o, trend, progress).clamp(4.0, 15.0)),
        }
    });

    let hemodynamic_support = if phase.has_vasopressor {
        let trend = phase.vasopressor_dose_trend.unwrap_or(TrendDirection::Stable);
        let dose = trend_value(anchors.vaso_dose, trend, progress).max(0.1 * anchors.vaso_dose);
        HemodynamicSupport {
            has_vasopressor: true,
            drug_name: Some(anchors.vaso_name.clone()),
            dose_description: Some(format!("{:.2} mcg/kg/min", dose)),
        }
    } else {
        HemodynamicSupport::none()
    };

    DailyStatus {
        icu_day: day,
        date,
        global_status: phase.global_status,
        risk_score,
        ventilation_support,
        hemodynamic_support,
        notable_events: Vec::new(),
        daily_summary: phase.description.clone(),
    }
}

fn discharged_day(day: u32, date: DateTime<Utc>) -> DailyStatus {
    DailyStatus {
        icu_day: day,
        date,
        global_status: GlobalStatus::DischargedIcu,
        risk_score: DISCHARGED_RISK,
        ventilation_support: None,
        hemodynamic_support: HemodynamicSupport::none(),
        notable_events: Vec::new(),
        daily_summary: "Discharged from the ICU".into(),
    }
}

fn attach_key_events(
    days: &mut [DailyStatus],
    profile: &ClinicalProfile,
    guard: &HighRiskDischargeGuard,
    total_days: u32,
) {
    for event in &profile.key_events {
        let Some(entry) = days.get_mut(event.day.saturating_sub(1) as usize) else {
            continue;
        };
        if entry.notable_events.len() >= 5 {
            continue;
        }
        if guard.suppresses(&event.description, event.day, total_days) {
            entry.notable_events.push(GUARDED_EVENT_TEXT.into());
        } else {
            entry.notable_events.push(event.description.clone());
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
