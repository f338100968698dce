//! Short historical series for vitals and labs.
//!
//! The engine has no stored measurement history, so bedside charts are
//! backfilled with synthetic series: evenly spaced points ending exactly at
//! the live value, shaped by a trend, with per-patient wobble derived from
//! a hash of the seed rather than an RNG.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LabKind, LabTrend, PatientSnapshot, TrendDirection};
use crate::models::lab::latest_of_kind;

use super::interpolate::{lerp, seed_fraction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

const VITALS_WINDOW_HOURS: i64 = 24;
const VITALS_POINTS: usize = 9;
const LAB_WINDOW_HOURS: i64 = 72;
const LAB_POINTS: usize = 7;
const WOBBLE_SPAN: f64 = 0.04;

/// Synthesize a series of `points` values over the trailing `hours`,
/// ending exactly at `end_value` at `now`. The same seed always produces
/// the same series.
pub fn trend_series(
    seed: &str,
    end_value: f64,
    trend: TrendDirection,
    hours: i64,
    points: usize,
    now: DateTime<Utc>,
) -> Vec<SeriesPoint> {
    let start_value = match trend {
        TrendDirection::Up => end_value * 0.85,
        TrendDirection::Down => end_value * 1.15,
        TrendDirection::Stable => end_value,
    };
    let step_minutes = (hours * 60) / (points.max(2) as i64 - 1);

    (0..points)
        .map(|i| {
            let progress = i as f64 / (points - 1) as f64;
            let base = lerp(start_value, end_value, progress);
            // The live point is anchored; earlier points wobble a little.
            let value = if i == points - 1 {
                end_value
            } else {
                let wobble =
                    (seed_fraction(&format!("{seed}-{i}")) - 0.5) * WOBBLE_SPAN * end_value;
                (base + wobble).max(0.0)
            };
            SeriesPoint {
                timestamp: now - Duration::minutes(step_minutes * (points - 1 - i) as i64),
                value: (value * 100.0).round() / 100.0,
            }
        })
        .collect()
}

/// Trailing 24 hours of vitals and, when ventilated, support settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSeries {
    pub heart_rate_bpm: Vec<SeriesPoint>,
    pub respiratory_rate: Vec<SeriesPoint>,
    pub map_mmhg: Vec<SeriesPoint>,
    pub spo2_pct: Vec<SeriesPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fio2_pct: Option<Vec<SeriesPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peep_cmh2o: Option<Vec<SeriesPoint>>,
}

pub fn vitals_series_24h(patient: &PatientSnapshot, now: DateTime<Utc>) -> VitalsSeries {
    let v = &patient.vital_signs;
    let hr_trend = if v.heart_rate_bpm > 150.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Stable
    };
    let map_trend = if v.map_mmhg < 55.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };
    let spo2_trend = if v.spo2_pct < 92.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    let series = |suffix: &str, value: f64, trend: TrendDirection| {
        trend_series(
            &format!("{}-{suffix}", patient.id),
            value,
            trend,
            VITALS_WINDOW_HOURS,
            VITALS_POINTS,
            now,
        )
    };

    VitalsSeries {
        heart_rate_bpm: series("hr", v.heart_rate_bpm, hr_trend),
        respiratory_rate: series("rr", v.respiratory_rate, TrendDirection::Stable),
        map_mmhg: series("map", v.map_mmhg, map_trend),
        spo2_pct: series("spo2", v.spo2_pct, spo2_trend),
        fio2_pct: patient
            .ventilation
            .as_ref()
            .map(|vent| series("fio2", vent.fio2_pct, TrendDirection::Stable)),
        peep_cmh2o: patient
            .ventilation
            .as_ref()
            .map(|vent| series("peep", vent.peep_cmh2o, TrendDirection::Stable)),
    }
}

/// Trailing 72 hours of the three labs the bedside chart tracks. Missing
/// results fall back to unremarkable baseline values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabSeries {
    pub lactate: Vec<SeriesPoint>,
    pub crp: Vec<SeriesPoint>,
    pub creatinine: Vec<SeriesPoint>,
}

pub fn lab_series_72h(patient: &PatientSnapshot, now: DateTime<Utc>) -> LabSeries {
    let lab = |suffix: &str, kind: LabKind, default: f64| {
        let (value, trend) = match latest_of_kind(&patient.lab_results, kind) {
            Some(result) => (result.value, lab_trend_direction(result.trend)),
            None => (default, TrendDirection::Stable),
        };
        trend_series(
            &format!("{}-{suffix}", patient.id),
            value,
            trend,
            LAB_WINDOW_HOURS,
            LAB_POINTS,
            now,
        )
    };

    LabSeries {
        lactate: lab("lactate", LabKind::Lactate, 1.2),
        crp: lab("crp", LabKind::Crp, 8.0),
        creatinine: lab("creatinine", LabKind::RenalFunction, 0.5),
    }
}

fn lab_trend_direction(trend: Option<LabTrend>) -> TrendDirection {
    match trend {
        Some(LabTrend::Rising) => TrendDirection::Up,
        Some(LabTrend::Falling) => TrendDirection::Down,
        Some(LabTrend::Stable) | None => TrendDirection::Stable,
    }
}
