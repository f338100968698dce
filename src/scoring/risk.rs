//! Composite mortality-risk score.
//!
//! Deterministic additive rule model: each triggered rule adds a fixed
//! increment, the sum is clamped to 1.0. Missing optional fields simply
//! mean the rule does not fire.

use crate::models::lab::latest_of_kind;
use crate::models::{LabKind, LabTrend, PatientSnapshot};

/// Composite risk score in [0, 1].
pub fn risk_score(patient: &PatientSnapshot) -> f64 {
    let mut score: f64 = 0.0;
    let vitals = &patient.vital_signs;

    // Vital-sign instability
    if vitals.map_mmhg < 65.0 {
        score += 0.25;
    }
    if vitals.heart_rate_bpm > 150.0 || vitals.heart_rate_bpm < 60.0 {
        score += 0.15;
    }
    if vitals.temperature_c > 38.5 || vitals.temperature_c < 36.0 {
        score += 0.10;
    }
    if vitals.spo2_pct < 92.0 {
        score += 0.20;
    }

    // Support devices
    if patient.has_active_vasopressor() {
        score += 0.25;
    }
    if patient.on_ventilation() {
        score += 0.15;
    }

    // Lactate: level and trend fire independently
    if let Some(lactate) = latest_of_kind(&patient.lab_results, LabKind::Lactate) {
        if lactate.value >= 3.0 {
            score += 0.20;
        }
        if lactate.trend == Some(LabTrend::Rising) {
            score += 0.15;
        }
    }

    // Fluid status
    if patient.fluid_balance.balance_24h_ml_kg_h > 5.0 {
        score += 0.10;
    }
    if patient.fluid_balance.diuresis_ml_kg_h < 1.0 {
        score += 0.15;
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo;
    use chrono::{TimeZone, Utc};

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap()
    }

    #[test]
    fn stable_patient_scores_low() {
        let p = demo::baseline("p1", now());
        assert!(risk_score(&p) < 0.2);
    }

    /// MAP 52 (+0.25), SpO2 88 (+0.20), vasopressor (+0.25), lactate 3.8
    /// (+0.20) rising (+0.15) already saturate the clamp; the demo patient
    /// also carries ventilation, tachycardia and fever on top.
    #[test]
    fn shocked_patient_saturates_at_one() {
        let p = demo::septic_shock("p1", now());
        assert_eq!(risk_score(&p), 1.0);
    }

    #[test]
    fn lactate_trend_fires_independently_of_level() {
        let mut p = demo::septic_shock("p1", now());
        // Drop the lactate below the level threshold but keep it rising.
        p.lab_results[0].value = 1.8;
        let with_trend = risk_score(&p);
        p.lab_results[0].trend = None;
        let without_trend = risk_score(&p);
        assert!((with_trend - without_trend - 0.15).abs() < 1e-9);
    }

    #[test]
    fn missing_labs_disable_lactate_rules() {
        let mut p = demo::baseline("p1", now());
        p.lab_results.clear();
        let base = risk_score(&p);
        assert!(base < 0.2);
    }

    #[test]
    fn score_never_exceeds_bounds() {
        let mut p = demo::septic_shock("p1", now());
        p.fluid_balance.balance_24h_ml_kg_h = 9.0;
        p.fluid_balance.diuresis_ml_kg_h = 0.2;
        let s = risk_score(&p);
        assert!((0.0..=1.0).contains(&s));
        assert_eq!(s, 1.0);
    }
}
