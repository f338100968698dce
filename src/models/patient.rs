use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lab::LabResult;
use super::medication::Medication;
use super::ventilation::VentilationParams;

/// Current vital signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub temperature_c: f64,
    pub heart_rate_bpm: f64,
    pub respiratory_rate: f64,
    pub systolic_mmhg: f64,
    pub diastolic_mmhg: f64,
    /// Mean arterial pressure.
    pub map_mmhg: f64,
    pub spo2_pct: f64,
    pub glasgow_coma_scale: Option<u8>,
}

/// 24h fluid balance, normalized to the patient's weight where noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidBalance {
    pub intake_24h_ml_kg_h: f64,
    pub output_24h_ml_kg_h: f64,
    /// intake minus output, mL/kg/h.
    pub balance_24h_ml_kg_h: f64,
    pub intake_total_ml: f64,
    pub output_total_ml: f64,
    pub diuresis_ml_kg_h: f64,
}

/// A patient's current, single-point-in-time clinical state.
///
/// Immutable per call; the engine never mutates the caller's copy (the
/// aligner returns an adjusted clone).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub id: String,
    pub bed: String,
    pub name: String,
    pub age_years: f64,
    pub weight_kg: f64,
    pub diagnosis_primary: String,
    /// Ordinal day since admission (1 = admission day).
    pub icu_day_count: u32,
    pub risk_mortality_24h: f64,
    pub risk_mortality_7d: f64,
    pub last_updated: DateTime<Utc>,
    pub vital_signs: VitalSigns,
    pub fluid_balance: FluidBalance,
    pub medications: Vec<Medication>,
    pub ventilation: Option<VentilationParams>,
    pub lab_results: Vec<LabResult>,
}

impl PatientSnapshot {
    pub fn on_ventilation(&self) -> bool {
        self.ventilation.is_some()
    }

    pub fn has_active_vasopressor(&self) -> bool {
        self.medications.iter().any(|m| m.is_active_vasopressor())
    }

    /// Admission timestamp implied by the ICU day count, relative to `now`.
    pub fn admission_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - chrono::Duration::days(i64::from(self.icu_day_count.saturating_sub(1)))
    }
}
