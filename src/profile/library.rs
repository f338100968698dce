//! Built-in authored profiles.
//!
//! A small demo set used by tests and by embedders that have no authoring
//! layer of their own. Phase content mirrors typical pediatric ICU courses:
//! septic bronchiolitis, bacterial pneumonia with effusion, and severe
//! traumatic brain injury.

use crate::models::{GlobalStatus, TrendDirection};

use super::{ClinicalProfile, KeyEvent, Phase};

fn phase(
    day_start: u32,
    day_end: u32,
    global_status: GlobalStatus,
    risk: (f64, f64),
    description: &str,
) -> Phase {
    Phase {
        day_start,
        day_end,
        global_status,
        risk_min: risk.0,
        risk_max: risk.1,
        has_ventilation: false,
        fio2_trend: None,
        has_vasopressor: false,
        vasopressor_dose_trend: None,
        lactate_trend: None,
        crp_trend: None,
        description: description.into(),
    }
}

/// Viral bronchiolitis progressing to septic shock, slow wean, day-12
/// discharge.
pub fn septic_bronchiolitis(patient_id: &str) -> ClinicalProfile {
    ClinicalProfile {
        patient_id: patient_id.into(),
        diagnosis_primary: "Acute viral bronchiolitis with severe respiratory failure".into(),
        phases: vec![
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Up),
                has_vasopressor: true,
                vasopressor_dose_trend: Some(TrendDirection::Up),
                lactate_trend: Some(TrendDirection::Up),
                crp_trend: Some(TrendDirection::Up),
                ..phase(
                    1,
                    2,
                    GlobalStatus::Critical,
                    (0.75, 0.85),
                    "Progressive respiratory worsening, escalating FiO2/PEEP and norepinephrine",
                )
            },
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Down),
                has_vasopressor: true,
                vasopressor_dose_trend: Some(TrendDirection::Down),
                lactate_trend: Some(TrendDirection::Down),
                crp_trend: Some(TrendDirection::Down),
                ..phase(
                    3,
                    6,
                    GlobalStatus::Severe,
                    (0.60, 0.75),
                    "Hemodynamic stabilization, slow oxygenation recovery, lactate falling",
                )
            },
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Down),
                lactate_trend: Some(TrendDirection::Down),
                crp_trend: Some(TrendDirection::Down),
                ..phase(
                    7,
                    10,
                    GlobalStatus::Stable,
                    (0.40, 0.60),
                    "Progressive ventilatory wean, vasopressor withdrawn, labs normalizing",
                )
            },
            phase(
                11,
                12,
                GlobalStatus::Improving,
                (0.20, 0.40),
                "Discharge preparation, wean completed",
            ),
            phase(
                13,
                30,
                GlobalStatus::DischargedIcu,
                (0.10, 0.20),
                "ICU discharge",
            ),
        ],
        discharge_day: 12,
        key_events: vec![
            KeyEvent {
                day: 1,
                description:
                    "Admitted in septic shock, intubated, norepinephrine started at 0.8 mcg/kg/min"
                        .into(),
            },
            KeyEvent {
                day: 2,
                description: "Ventilatory support escalated (FiO2 80%, PEEP 10 cmH2O)".into(),
            },
            KeyEvent {
                day: 3,
                description: "First hemodynamic stabilization, norepinephrine weaning begun".into(),
            },
            KeyEvent {
                day: 6,
                description: "Ventilatory wean started, FiO2 down to 60%".into(),
            },
            KeyEvent {
                day: 9,
                description: "Vasopressor withdrawn, lactate below 2.0".into(),
            },
            KeyEvent {
                day: 11,
                description: "Extubated, transitioned to nasal cannula oxygen".into(),
            },
            KeyEvent {
                day: 12,
                description: "ICU discharge".into(),
            },
        ],
    }
}

/// Severe bacterial pneumonia with pleural effusion; fast responder,
/// day-5 discharge.
pub fn pneumonia_with_effusion(patient_id: &str) -> ClinicalProfile {
    ClinicalProfile {
        patient_id: patient_id.into(),
        diagnosis_primary: "Severe bacterial pneumonia with pleural effusion".into(),
        phases: vec![
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Stable),
                crp_trend: Some(TrendDirection::Up),
                ..phase(
                    1,
                    2,
                    GlobalStatus::Severe,
                    (0.55, 0.65),
                    "Severe pneumonia with effusion, empiric antibiotics started",
                )
            },
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Down),
                crp_trend: Some(TrendDirection::Down),
                ..phase(
                    3,
                    4,
                    GlobalStatus::Stable,
                    (0.40, 0.55),
                    "Rapid response to antibiotics and drainage, CRP falling sharply",
                )
            },
            Phase {
                crp_trend: Some(TrendDirection::Down),
                ..phase(
                    5,
                    5,
                    GlobalStatus::Improving,
                    (0.25, 0.40),
                    "Discharge preparation",
                )
            },
            phase(
                6,
                30,
                GlobalStatus::DischargedIcu,
                (0.10, 0.25),
                "ICU discharge",
            ),
        ],
        discharge_day: 5,
        key_events: vec![
            KeyEvent {
                day: 1,
                description: "Admitted with severe pneumonia, ceftriaxone and clindamycin started"
                    .into(),
            },
            KeyEvent {
                day: 2,
                description: "Pleural effusion drained with good respiratory response".into(),
            },
            KeyEvent {
                day: 3,
                description: "CRP falling sharply, marked clinical improvement".into(),
            },
            KeyEvent {
                day: 4,
                description: "Ventilatory wean, FiO2 reduced".into(),
            },
            KeyEvent {
                day: 5,
                description: "ICU discharge".into(),
            },
        ],
    }
}

/// Severe TBI: deep sedation then staged neurologic wean, day-15 discharge.
pub fn severe_tbi(patient_id: &str) -> ClinicalProfile {
    ClinicalProfile {
        patient_id: patient_id.into(),
        diagnosis_primary: "Severe traumatic brain injury".into(),
        phases: vec![
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Stable),
                lactate_trend: Some(TrendDirection::Stable),
                ..phase(
                    1,
                    3,
                    GlobalStatus::Critical,
                    (0.60, 0.70),
                    "Deep sedation, ICP monitoring, intracranial hypertension risk",
                )
            },
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Down),
                ..phase(
                    4,
                    8,
                    GlobalStatus::Stable,
                    (0.40, 0.60),
                    "ICP stable, sedation wean started",
                )
            },
            Phase {
                has_ventilation: true,
                fio2_trend: Some(TrendDirection::Down),
                ..phase(
                    9,
                    12,
                    GlobalStatus::Stable,
                    (0.30, 0.45),
                    "Neurologically stable, ventilatory wean in progress",
                )
            },
            phase(
                13,
                15,
                GlobalStatus::Improving,
                (0.20, 0.35),
                "Discharge preparation, full neurologic assessment",
            ),
            phase(
                16,
                30,
                GlobalStatus::DischargedIcu,
                (0.10, 0.25),
                "ICU discharge",
            ),
        ],
        discharge_day: 15,
        key_events: vec![
            KeyEvent {
                day: 1,
                description: "Admitted with severe TBI, GCS 7, intubated under deep sedation"
                    .into(),
            },
            KeyEvent {
                day: 2,
                description: "Head CT: cerebral edema without acute intracranial hypertension"
                    .into(),
            },
            KeyEvent {
                day: 4,
                description: "ICP stable, sedation wean started".into(),
            },
            KeyEvent {
                day: 9,
                description: "Sedation reduced, neurologic response improving".into(),
            },
            KeyEvent {
                day: 12,
                description: "Ventilatory wean, FiO2 reduced".into(),
            },
            KeyEvent {
                day: 15,
                description: "ICU discharge".into(),
            },
        ],
    }
}

/// The demo registry contents: p1/p2/p4 with authored courses.
pub fn builtin_profiles() -> Vec<ClinicalProfile> {
    vec![
        septic_bronchiolitis("p1"),
        pneumonia_with_effusion("p2"),
        severe_tbi("p4"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_all_validate() {
        for profile in builtin_profiles() {
            assert!(
                profile.validate().is_ok(),
                "profile {} failed validation",
                profile.patient_id
            );
        }
    }

    #[test]
    fn phases_cover_through_day_thirty() {
        for profile in builtin_profiles() {
            assert!(profile.coverage_end() >= 30);
            assert!(profile.discharge_day <= profile.coverage_end());
        }
    }

    #[test]
    fn discharge_key_event_lands_on_discharge_day() {
        for profile in builtin_profiles() {
            let last = profile.key_events.last().unwrap();
            assert_eq!(last.day, profile.discharge_day);
            assert!(last.description.to_lowercase().contains("discharge"));
        }
    }
}
