//! Recent-events summary: the short list a bedside card renders.

use chrono::{DateTime, Duration, Utc};

use crate::config;

use super::guard::is_discharge_worded;
use super::types::{TimelineEvent, TimelineSummary};

/// Filter the full timeline down to the recent window and rank it.
///
/// The window is wall-clock based: events within the last
/// `SUMMARY_WINDOW_DAYS` calendar days of `now`, never future-dated ones.
/// For high-risk patients, discharge-worded events older than a day are
/// dropped from the window as well. The survivors are ordered by severity,
/// then recency, and capped. An empty result is reported explicitly via
/// `is_fallback` so callers render a "no recent events" state.
pub fn summarize(
    events: &[TimelineEvent],
    high_risk: bool,
    now: DateTime<Utc>,
) -> TimelineSummary {
    let window_start = now - Duration::days(config::SUMMARY_WINDOW_DAYS);
    let stale_discharge_cutoff = now - Duration::days(1);

    let mut recent: Vec<TimelineEvent> = events
        .iter()
        .filter(|e| e.timestamp >= window_start && e.timestamp <= now)
        .filter(|e| {
            !(high_risk
                && is_discharge_worded(&e.title)
                && e.timestamp < stale_discharge_cutoff)
        })
        .cloned()
        .collect();

    recent.sort_by(|a, b| {
        b.severity
            .rank()
            .cmp(&a.severity.rank())
            .then(b.timestamp.cmp(&a.timestamp))
    });
    recent.truncate(config::SUMMARY_MAX_EVENTS);

    TimelineSummary {
        is_fallback: recent.is_empty(),
        events: recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::types::{EventSeverity, EventType};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap()
    }

    fn event(id: &str, title: &str, age_hours: i64, severity: EventSeverity) -> TimelineEvent {
        TimelineEvent {
            id: id.into(),
            event_type: EventType::Note,
            title: title.into(),
            description: None,
            timestamp: now() - Duration::hours(age_hours),
            severity,
            related_exam_id: None,
        }
    }

    #[test]
    fn old_and_future_events_fall_outside_the_window() {
        let events = vec![
            event("a", "Ventilatory wean", 12, EventSeverity::Warning),
            event("b", "Old event", 24 * 8, EventSeverity::Critical),
            event("c", "Future event", -24, EventSeverity::Critical),
        ];
        let summary = summarize(&events, false, now());
        assert_eq!(summary.events.len(), 1);
        assert_eq!(summary.events[0].id, "a");
        assert!(!summary.is_fallback);
    }

    #[test]
    fn ranked_by_severity_then_recency_and_capped() {
        let events = vec![
            event("a", "note 1", 2, EventSeverity::Normal),
            event("b", "note 2", 40, EventSeverity::Critical),
            event("c", "note 3", 4, EventSeverity::Critical),
            event("d", "note 4", 6, EventSeverity::Warning),
            event("e", "note 5", 8, EventSeverity::Normal),
            event("f", "note 6", 10, EventSeverity::Normal),
            event("g", "note 7", 1, EventSeverity::Normal),
        ];
        let summary = summarize(&events, false, now());
        assert_eq!(summary.events.len(), 5);
        assert_eq!(summary.events[0].id, "c");
        assert_eq!(summary.events[1].id, "b");
        assert_eq!(summary.events[2].id, "d");
    }

    #[test]
    fn high_risk_drops_stale_discharge_wording() {
        let events = vec![
            event("a", "ICU discharge planned", 30, EventSeverity::Normal),
            event("b", "ICU discharge planned", 6, EventSeverity::Normal),
        ];
        let high = summarize(&events, true, now());
        assert_eq!(high.events.len(), 1);
        assert_eq!(high.events[0].id, "b");
        let low = summarize(&events, false, now());
        assert_eq!(low.events.len(), 2);
    }

    #[test]
    fn empty_window_reports_fallback() {
        let events = vec![event("a", "Old event", 24 * 30, EventSeverity::Critical)];
        let summary = summarize(&events, false, now());
        assert!(summary.is_fallback);
        assert!(summary.events.is_empty());
    }
}
