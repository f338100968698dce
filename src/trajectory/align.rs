//! Snapshot/trajectory consistency adjustment.
//!
//! The live snapshot and the generated trajectory are produced by
//! different paths and can disagree. Alignment nudges a small set of
//! "current" fields toward the most recent simulated day so the two views
//! never tell contradictory stories. Aligning twice is a no-op.

use crate::models::PatientSnapshot;

use super::generator::DailyStatus;

/// Post-discharge clamps applied to the live snapshot.
const DISCHARGED_RISK_24H: (f64, f64) = (0.02, 0.10);
const DISCHARGED_RISK_7D: (f64, f64) = (0.02, 0.15);
const MODERATE_RISK_24H: (f64, f64) = (0.15, 0.35);
const MODERATE_RISK_7D: (f64, f64) = (0.20, 0.45);

/// Align the snapshot with the latest generated day. Only two situations
/// alter anything: a trajectory that has reached discharge, and a
/// stable/improving low-risk trajectory contradicted by a still-high live
/// risk. Everything else passes through untouched.
pub fn align(patient: &PatientSnapshot, latest: Option<&DailyStatus>) -> PatientSnapshot {
    let mut aligned = patient.clone();
    let Some(latest) = latest else {
        return aligned;
    };

    if latest.global_status.is_discharged() {
        // Risk is derived proportionally from the trajectory's own value,
        // then clamped into the discharged band.
        aligned.risk_mortality_24h = latest
            .risk_score
            .clamp(DISCHARGED_RISK_24H.0, DISCHARGED_RISK_24H.1);
        aligned.risk_mortality_7d =
            (latest.risk_score * 1.5).clamp(DISCHARGED_RISK_7D.0, DISCHARGED_RISK_7D.1);
        for med in &mut aligned.medications {
            if med.is_active_vasopressor() {
                med.active = false;
            }
        }
        aligned.ventilation = None;
        let vitals = &mut aligned.vital_signs;
        vitals.map_mmhg = vitals.map_mmhg.max(65.0);
        vitals.spo2_pct = vitals.spo2_pct.max(94.0);
        vitals.heart_rate_bpm = vitals.heart_rate_bpm.clamp(60.0, 150.0);
        vitals.temperature_c = vitals.temperature_c.clamp(36.0, 38.5);
        return aligned;
    }

    let trajectory_calm = matches!(
        latest.global_status,
        crate::models::GlobalStatus::Improving | crate::models::GlobalStatus::Stable
    ) && latest.risk_score < 0.3;
    if trajectory_calm && aligned.risk_mortality_24h > 0.5 {
        aligned.risk_mortality_24h = latest
            .risk_score
            .clamp(MODERATE_RISK_24H.0, MODERATE_RISK_24H.1);
        aligned.risk_mortality_7d =
            (latest.risk_score + 0.1).clamp(MODERATE_RISK_7D.0, MODERATE_RISK_7D.1);
    }

    aligned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{demo, GlobalStatus};
    use crate::trajectory::generator::HemodynamicSupport;
    use chrono::{TimeZone, Utc};

    fn latest(status: GlobalStatus, risk: f64) -> DailyStatus {
        DailyStatus {
            icu_day: 30,
            date: Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap(),
            global_status: status,
            risk_score: risk,
            ventilation_support: None,
            hemodynamic_support: HemodynamicSupport::none(),
            notable_events: Vec::new(),
            daily_summary: String::new(),
        }
    }

    #[test]
    fn discharged_trajectory_forces_snapshot_calm() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let patient = demo::septic_shock("p1", now);
        let day = latest(GlobalStatus::DischargedIcu, 0.08);
        let aligned = align(&patient, Some(&day));
        assert!(aligned.risk_mortality_24h <= 0.10);
        assert!(aligned.risk_mortality_7d <= 0.15);
        assert!(!aligned.has_active_vasopressor());
        assert!(aligned.ventilation.is_none());
        assert!(aligned.vital_signs.map_mmhg >= 65.0);
        assert!(aligned.vital_signs.spo2_pct >= 94.0);
        assert!(aligned.vital_signs.heart_rate_bpm <= 150.0);
        assert!(aligned.vital_signs.temperature_c <= 38.5);
    }

    #[test]
    fn calm_trajectory_lowers_contradictory_live_risk() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let mut patient = demo::baseline("p2", now);
        patient.risk_mortality_24h = 0.7;
        patient.risk_mortality_7d = 0.8;
        let day = latest(GlobalStatus::Improving, 0.2);
        let aligned = align(&patient, Some(&day));
        assert!((0.15..=0.35).contains(&aligned.risk_mortality_24h));
        assert!((0.20..=0.45).contains(&aligned.risk_mortality_7d));
    }

    #[test]
    fn consistent_views_pass_through_unchanged() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let patient = demo::septic_shock("p1", now);
        let day = latest(GlobalStatus::Critical, 0.8);
        assert_eq!(align(&patient, Some(&day)), patient);
        assert_eq!(align(&patient, None), patient);
    }

    #[test]
    fn alignment_is_idempotent() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        for (status, risk) in [
            (GlobalStatus::DischargedIcu, 0.08),
            (GlobalStatus::Improving, 0.2),
            (GlobalStatus::Critical, 0.8),
        ] {
            let patient = demo::septic_shock("p1", now);
            let day = latest(status, risk);
            let once = align(&patient, Some(&day));
            let twice = align(&once, Some(&day));
            assert_eq!(once, twice);
        }
    }
}
