//! Short-window deterioration scoring.
//!
//! Works off the live snapshot only, with no trajectory dependency: each
//! crossed threshold adds a fixed increment and a human-readable reason.
//! Labs count only when collected within the trailing window.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::lab::latest_of_kind;
use crate::models::medication::total_vasopressor_dose;
use crate::models::{LabKind, LabResult, LabTrend, PatientSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeteriorationResult {
    pub patient_id: String,
    pub score: f64,
    pub reasons: Vec<String>,
}

impl DeteriorationResult {
    /// Qualifies only when the score crosses the threshold with at least
    /// one concrete reason behind it.
    pub fn is_deteriorated(&self) -> bool {
        self.score >= config::DETERIORATION_THRESHOLD && !self.reasons.is_empty()
    }
}

/// Score the trailing 6 hours of one patient.
pub fn detect(patient: &PatientSnapshot) -> DeteriorationResult {
    let mut score = 0.0;
    let mut reasons = Vec::new();
    let mut hit = |points: f64, reason: String| {
        score += points;
        reasons.push(reason);
    };

    let v = &patient.vital_signs;
    if v.map_mmhg < 65.0 {
        hit(0.30, format!("MAP {:.0} mmHg", v.map_mmhg));
    } else if v.map_mmhg < 70.0 {
        hit(0.15, format!("Borderline MAP {:.0} mmHg", v.map_mmhg));
    }

    if v.spo2_pct < 92.0 {
        hit(0.25, format!("SpO2 {:.0}%", v.spo2_pct));
    } else if v.spo2_pct < 94.0 {
        hit(0.10, format!("Borderline SpO2 {:.0}%", v.spo2_pct));
    }

    if v.heart_rate_bpm > 150.0 || v.heart_rate_bpm < 60.0 {
        hit(0.15, format!("Heart rate {:.0} bpm", v.heart_rate_bpm));
    }

    if v.temperature_c > 38.5 || v.temperature_c < 36.0 {
        hit(0.10, format!("Temperature {:.1} °C", v.temperature_c));
    }

    if let Some(vent) = &patient.ventilation {
        if vent.fio2_pct > 60.0 {
            hit(0.20, format!("FiO2 {:.0}%", vent.fio2_pct));
        } else if vent.fio2_pct > 50.0 {
            hit(0.10, format!("FiO2 {:.0}%", vent.fio2_pct));
        }
        if vent.peep_cmh2o > 10.0 {
            hit(0.15, format!("PEEP {:.0} cmH2O", vent.peep_cmh2o));
        }
    }

    let vaso_dose = total_vasopressor_dose(&patient.medications);
    if vaso_dose > 0.5 {
        hit(0.25, format!("High vasopressor dose ({vaso_dose:.2})"));
    } else if vaso_dose > 0.0 {
        hit(0.15, format!("On vasopressor ({vaso_dose:.2})"));
    }

    if let Some(lactate) = recent_lab(patient, LabKind::Lactate) {
        if lactate.value >= 4.0 {
            hit(0.30, format!("Lactate {:.1} mmol/L", lactate.value));
        } else if lactate.value >= 3.0 {
            hit(0.20, format!("Lactate {:.1} mmol/L", lactate.value));
        }
        if lactate.trend == Some(LabTrend::Rising) {
            hit(0.15, "Lactate rising".into());
        }
    }

    if let Some(crp) = recent_lab(patient, LabKind::Crp) {
        if crp.value > 100.0 {
            if crp.trend == Some(LabTrend::Rising) {
                hit(0.20, format!("CRP {:.0} and rising", crp.value));
            } else {
                hit(0.10, format!("CRP {:.0}", crp.value));
            }
        }
    }

    if patient.risk_mortality_24h >= 0.75 {
        hit(0.20, "24h mortality risk very high".into());
    } else if patient.risk_mortality_24h >= 0.61 {
        hit(0.10, "24h mortality risk high".into());
    }

    let fluids = &patient.fluid_balance;
    if fluids.balance_24h_ml_kg_h > 5.0 {
        hit(0.10, format!("Positive fluid balance {:.1} ml/kg/h", fluids.balance_24h_ml_kg_h));
    }
    if fluids.diuresis_ml_kg_h < 1.0 {
        hit(0.15, format!("Diuresis {:.1} ml/kg/h", fluids.diuresis_ml_kg_h));
    }

    DeteriorationResult {
        patient_id: patient.id.clone(),
        score: (score * 100.0).round() / 100.0,
        reasons,
    }
}

/// Score all patients and keep the deteriorated ones, worst first.
pub fn detect_all(patients: &[PatientSnapshot]) -> Vec<DeteriorationResult> {
    let mut results: Vec<DeteriorationResult> = patients
        .iter()
        .map(detect)
        .filter(DeteriorationResult::is_deteriorated)
        .collect();
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results
}

fn recent_lab(patient: &PatientSnapshot, kind: LabKind) -> Option<&LabResult> {
    let cutoff =
        patient.last_updated - Duration::hours(config::DETERIORATION_LAB_WINDOW_HOURS);
    latest_of_kind(&patient.lab_results, kind).filter(|lab| lab.collected_at >= cutoff)
}
