//! SOFA-like severity score on a 0..24 scale.
//!
//! Independent axis from the composite risk score: tiers instead of
//! weighted increments. Renal, hepatic and coagulation components are not
//! modeled (the snapshot carries no creatinine/bilirubin/platelet fields),
//! which is a known scope limitation of this axis.

use crate::models::lab::latest_of_kind;
use crate::models::{LabKind, PatientSnapshot};

const SEVERITY_MAX: u8 = 24;

/// Bounded severity score in [0, 24].
pub fn severity_score(patient: &PatientSnapshot) -> u8 {
    let mut score: u8 = 0;

    score += respiratory_component(patient);
    score += cardiovascular_component(patient);
    score += neurologic_component(patient);
    score += lactate_adjustment(patient);

    score.min(SEVERITY_MAX)
}

fn respiratory_component(patient: &PatientSnapshot) -> u8 {
    if let Some(pf) = patient.ventilation.as_ref().and_then(|v| v.pao2_fio2) {
        return match pf {
            x if x < 100.0 => 4,
            x if x < 200.0 => 3,
            x if x < 300.0 => 2,
            x if x < 400.0 => 1,
            _ => 0,
        };
    }
    if patient.vital_signs.spo2_pct < 92.0 {
        2
    } else {
        0
    }
}

fn cardiovascular_component(patient: &PatientSnapshot) -> u8 {
    if patient.has_active_vasopressor() {
        3
    } else if patient.vital_signs.map_mmhg < 70.0 {
        1
    } else {
        0
    }
}

fn neurologic_component(patient: &PatientSnapshot) -> u8 {
    match patient.vital_signs.glasgow_coma_scale {
        Some(gcs) if gcs < 6 => 4,
        Some(gcs) if gcs < 10 => 3,
        Some(gcs) if gcs < 13 => 2,
        Some(gcs) if gcs < 15 => 1,
        _ => 0,
    }
}

/// Mutually exclusive tiers; only the higher one applies.
fn lactate_adjustment(patient: &PatientSnapshot) -> u8 {
    match latest_of_kind(&patient.lab_results, LabKind::Lactate) {
        Some(l) if l.value >= 4.0 => 2,
        Some(l) if l.value >= 3.0 => 1,
        _ => 0,
    }
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
    fn stable_patient_scores_zero() {
        let p = demo::baseline("p1", now());
        assert_eq!(severity_score(&p), 0);
    }

    #[test]
    fn septic_shock_composes_all_axes() {
        let p = demo::septic_shock("p1", now());
        // P/F 145 → 3, vasopressor → 3, GCS 15 → 0, lactate 3.8 → 1
        assert_eq!(severity_score(&p), 7);
    }

    #[test]
    fn spo2_fallback_when_no_blood_gas() {
        let mut p = demo::baseline("p1", now());
        p.vital_signs.spo2_pct = 89.0;
        assert_eq!(severity_score(&p), 2);
    }

    #[test]
    fn pf_ratio_overrides_spo2_fallback() {
        let mut p = demo::septic_shock("p1", now());
        p.ventilation.as_mut().unwrap().pao2_fio2 = Some(95.0);
        p.medications.clear();
        p.lab_results.clear();
        assert_eq!(severity_score(&p), 4);
    }

    #[test]
    fn lactate_tiers_are_exclusive() {
        let mut p = demo::septic_shock("p1", now());
        p.lab_results[0].value = 4.5;
        // 4.5 takes the +2 tier, not +2+1
        let with_high = severity_score(&p);
        p.lab_results[0].value = 3.5;
        let with_mid = severity_score(&p);
        assert_eq!(with_high - with_mid, 1);
    }

    #[test]
    fn gcs_tiers() {
        let mut p = demo::baseline("p1", now());
        for (gcs, expected) in [(5u8, 4u8), (9, 3), (12, 2), (14, 1), (15, 0)] {
            p.vital_signs.glasgow_coma_scale = Some(gcs);
            assert_eq!(severity_score(&p), expected, "gcs {gcs}");
        }
    }

    #[test]
    fn clamped_to_twenty_four() {
        let mut p = demo::septic_shock("p1", now());
        p.vital_signs.glasgow_coma_scale = Some(4);
        p.lab_results[0].value = 6.0;
        p.ventilation.as_mut().unwrap().pao2_fio2 = Some(80.0);
        let s = severity_score(&p);
        assert!(s <= 24);
    }
}
