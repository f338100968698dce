//! Derivation of discrete timeline events from the simulated trajectory
//! plus the raw medication and lab records.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::models::PatientSnapshot;
use crate::trajectory::DailyStatus;

use super::guard::{is_discharge_worded, HighRiskDischargeGuard};
use super::types::{EventSeverity, EventType, TimelineEvent};

static VENTILATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ventilat|fio2|peep|intubat|extubat|oxygen|wean|cannula").expect("static regex")
});
static VASOPRESSOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)vasopressor|norepinephrine|epinephrine|dopamine|milrinone|vasoactive")
        .expect("static regex")
});
static DETERIORATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)deteriorat|worsening|piora").expect("static regex"));
static CRITICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)critical|cr[ií]tico|shock|choque").expect("static regex"));
static IMAGING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)x-ray|radiograph|tomograph|\bct\b|ultrasound|imaging").expect("static regex")
});
static RESPIRATORY_DIAGNOSIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pneumonia|bronchiolitis|respiratory|pulmonary|asthma|effusion")
        .expect("static regex")
});
static NEURO_DIAGNOSIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)trauma|brain|encephalopathy|neurolog|seizure|tbi").expect("static regex")
});

/// Keyword classification of a notable-event text.
fn classify(text: &str) -> (EventType, EventSeverity) {
    if IMAGING_RE.is_match(text) {
        (EventType::Imaging, EventSeverity::Normal)
    } else if VASOPRESSOR_RE.is_match(text) {
        (EventType::Therapy, EventSeverity::Critical)
    } else if VENTILATION_RE.is_match(text) {
        let severity = if CRITICAL_RE.is_match(text) {
            EventSeverity::Critical
        } else {
            EventSeverity::Warning
        };
        (EventType::Therapy, severity)
    } else if DETERIORATION_RE.is_match(text) || CRITICAL_RE.is_match(text) {
        (EventType::Note, EventSeverity::Critical)
    } else {
        (EventType::Note, EventSeverity::Normal)
    }
}

/// Build the full timeline, newest-first. Ids are deterministic, so the
/// same snapshot and trajectory always produce the same list.
pub fn timeline(
    patient: &PatientSnapshot,
    trajectory: &[DailyStatus],
    now: DateTime<Utc>,
) -> Vec<TimelineEvent> {
    let guard = HighRiskDischargeGuard::for_patient(patient);
    let total_days = trajectory.len() as u32;
    let mut events = Vec::new();

    events.push(TimelineEvent {
        id: format!("{}-admission", patient.id),
        event_type: EventType::Admission,
        title: "ICU admission".into(),
        description: Some(patient.diagnosis_primary.clone()),
        timestamp: patient.admission_time(now),
        severity: EventSeverity::Normal,
        related_exam_id: None,
    });

    for med in patient.medications.iter().filter(|m| m.active) {
        let severity = if med.is_active_vasopressor() {
            EventSeverity::Critical
        } else {
            EventSeverity::Warning
        };
        events.push(TimelineEvent {
            id: format!("{}-therapy-{}", patient.id, med.id),
            event_type: EventType::Therapy,
            title: format!("{} started", med.name),
            description: Some(format!("{} {}", med.dose, med.unit)),
            timestamp: med.started_at,
            severity,
            related_exam_id: None,
        });
    }

    for lab in patient.lab_results.iter().filter(|l| l.critical) {
        let arrow = match lab.trend {
            Some(crate::models::LabTrend::Rising) => "↑",
            Some(crate::models::LabTrend::Falling) => "↓",
            _ => "→",
        };
        let unit = lab.unit.as_deref().unwrap_or("");
        events.push(TimelineEvent {
            id: format!("{}-lab-{}", patient.id, lab.id),
            event_type: EventType::Lab,
            title: lab.name.clone(),
            description: Some(format!("{} {} {}", lab.value, unit, arrow)),
            timestamp: lab.collected_at,
            severity: EventSeverity::Critical,
            related_exam_id: None,
        });
    }

    for day in trajectory {
        for (idx, text) in day.notable_events.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            // Recent discharge narratives for high-risk patients are
            // dropped outright, not reclassified.
            if guard.is_high_risk()
                && guard.in_recent_window(day.icu_day, total_days)
                && is_discharge_worded(text)
            {
                continue;
            }
            let (event_type, severity) = classify(text);
            let related_exam_id = (event_type == EventType::Imaging)
                .then(|| format!("{}-exam-day{}", patient.id, day.icu_day));
            events.push(TimelineEvent {
                id: format!("{}-day{}-{}", patient.id, day.icu_day, idx),
                event_type,
                title: text.clone(),
                description: None,
                timestamp: day.date,
                severity,
                related_exam_id,
            });
        }
    }

    events.extend(diagnosis_imaging(patient, now));

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(a.id.cmp(&b.id)));
    events
}

/// Admission imaging implied by the primary diagnosis.
fn diagnosis_imaging(patient: &PatientSnapshot, now: DateTime<Utc>) -> Vec<TimelineEvent> {
    let mut events = Vec::new();
    let admission = patient.admission_time(now);
    if RESPIRATORY_DIAGNOSIS_RE.is_match(&patient.diagnosis_primary) {
        events.push(TimelineEvent {
            id: format!("{}-img-cxr", patient.id),
            event_type: EventType::Imaging,
            title: "Chest X-ray".into(),
            description: Some(format!("Admission imaging: {}", patient.diagnosis_primary)),
            timestamp: admission,
            severity: EventSeverity::Normal,
            related_exam_id: Some(format!("{}-exam-cxr", patient.id)),
        });
    }
    if NEURO_DIAGNOSIS_RE.is_match(&patient.diagnosis_primary) {
        events.push(TimelineEvent {
            id: format!("{}-img-hct", patient.id),
            event_type: EventType::Imaging,
            title: "Head CT".into(),
            description: Some(format!("Admission imaging: {}", patient.diagnosis_primary)),
            timestamp: admission,
            severity: EventSeverity::Normal,
            related_exam_id: Some(format!("{}-exam-hct", patient.id)),
        });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo;
    use crate::profile::library;
    use crate::trajectory;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap()
    }

    #[test]
    fn classification_by_keyword() {
        assert_eq!(
            classify("Norepinephrine weaning begun"),
            (EventType::Therapy, EventSeverity::Critical)
        );
        assert_eq!(
            classify("Ventilatory wean started, FiO2 down to 60%"),
            (EventType::Therapy, EventSeverity::Warning)
        );
        assert_eq!(
            classify("Piora clínica importante"),
            (EventType::Note, EventSeverity::Critical)
        );
        assert_eq!(
            classify("Head CT without acute findings"),
            (EventType::Imaging, EventSeverity::Normal)
        );
    }

    #[test]
    fn timeline_is_newest_first_and_carries_all_sources() {
        let patient = demo::septic_shock("p1", now());
        let profile = library::septic_bronchiolitis("p1");
        let days = trajectory::generate(&patient, Some(&profile), now());
        let events = timeline(&patient, &days, now());

        for pair in events.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert!(events.iter().any(|e| e.event_type == EventType::Admission));
        assert!(events
            .iter()
            .any(|e| e.event_type == EventType::Therapy && e.title.contains("Norepinephrine")));
        assert!(events
            .iter()
            .any(|e| e.event_type == EventType::Lab && e.title == "Lactate"));
        assert!(events
            .iter()
            .any(|e| e.event_type == EventType::Imaging && e.related_exam_id.is_some()));
    }

    #[test]
    fn high_risk_patient_shows_no_recent_discharge_event() {
        let patient = demo::septic_shock("p1", now());
        assert!(patient.risk_mortality_24h > 0.6);
        let mut profile = library::septic_bronchiolitis("p1");
        profile.key_events.push(crate::profile::KeyEvent {
            day: 25,
            description: "Alta da UTI".into(),
        });
        let days = trajectory::generate(&patient, Some(&profile), now());
        let events = timeline(&patient, &days, now());
        let recent_cutoff = days.len() as u32 - 14;
        for event in &events {
            if is_discharge_worded(&event.title) {
                let day = days
                    .iter()
                    .find(|d| d.date == event.timestamp)
                    .map(|d| d.icu_day)
                    .unwrap_or(0);
                assert!(day <= recent_cutoff, "recent discharge event surfaced");
            }
        }
    }

    #[test]
    fn synthesis_is_idempotent() {
        let patient = demo::recovering("p2", now());
        let profile = library::pneumonia_with_effusion("p2");
        let days = trajectory::generate(&patient, Some(&profile), now());
        assert_eq!(timeline(&patient, &days, now()), timeline(&patient, &days, now()));
    }
}
