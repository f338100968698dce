//! The engine facade: one object owning the roster, the profile registry,
//! the trajectory cache and the clock, exposing every derived view.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::census::{self, UnitCensus};
use crate::clock::{Clock, SystemClock};
use crate::deterioration::{self, DeteriorationResult};
use crate::error::EngineError;
use crate::models::{demo, GlobalStatus, PatientSnapshot};
use crate::profile::library;
use crate::profile::registry::{ProfileRegistry, StaticProfileRegistry};
use crate::scoring;
use crate::timeline::{self, guard, TimelineEvent, TimelineSummary};
use crate::trajectory::{self, DailyStatus, LabSeries, TrajectoryCache, VitalsSeries};

/// Default window, in simulated days, for the recent-trajectory view.
pub const DEFAULT_RECENT_DAYS: u32 = 14;

pub struct ClinicalEngine {
    roster: Vec<PatientSnapshot>,
    registry: Arc<dyn ProfileRegistry>,
    cache: TrajectoryCache,
    clock: Arc<dyn Clock>,
}

impl ClinicalEngine {
    pub fn new(
        mut roster: Vec<PatientSnapshot>,
        registry: Arc<dyn ProfileRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        roster.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            roster,
            registry,
            cache: TrajectoryCache::new(),
            clock,
        }
    }

    /// A ready-to-use engine over the demo roster and the built-in
    /// profiles, on the system clock.
    pub fn demo() -> Self {
        let now = Utc::now();
        let mut tbi = demo::baseline("p4", now);
        tbi.diagnosis_primary = "Severe traumatic brain injury".into();
        tbi.icu_day_count = 5;
        tbi.risk_mortality_24h = 0.5;
        tbi.risk_mortality_7d = 0.55;
        tbi.vital_signs.glasgow_coma_scale = Some(9);
        let roster = vec![
            demo::septic_shock("p1", now),
            demo::recovering("p2", now),
            demo::baseline("p3", now),
            tbi,
        ];
        Self::new(
            roster,
            Arc::new(StaticProfileRegistry::new(library::builtin_profiles())),
            Arc::new(SystemClock),
        )
    }

    fn snapshot(&self, patient_id: &str) -> Result<&PatientSnapshot, EngineError> {
        self.roster
            .iter()
            .find(|p| p.id == patient_id)
            .ok_or_else(|| EngineError::PatientNotFound {
                id: patient_id.to_string(),
            })
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The roster, ordered by patient id.
    pub fn patients(&self) -> &[PatientSnapshot] {
        &self.roster
    }

    pub fn risk_score(&self, patient_id: &str) -> Result<f64, EngineError> {
        Ok(scoring::risk_score(self.snapshot(patient_id)?))
    }

    pub fn severity_score(&self, patient_id: &str) -> Result<u8, EngineError> {
        Ok(scoring::severity_score(self.snapshot(patient_id)?))
    }

    /// The full simulated trajectory, memoized per patient.
    pub fn daily_status(&self, patient_id: &str) -> Result<Arc<Vec<DailyStatus>>, EngineError> {
        let patient = self.snapshot(patient_id)?;
        let now = self.now();
        Ok(self.cache.get_or_compute(patient_id, || {
            trajectory::generate(patient, self.registry.lookup(patient_id), now)
        }))
    }

    /// The trailing `days` simulated days, with the high-risk
    /// discharge-suppression guard applied.
    pub fn recent_daily_status(
        &self,
        patient_id: &str,
        days: u32,
    ) -> Result<Vec<DailyStatus>, EngineError> {
        let patient = self.snapshot(patient_id)?;
        let high_risk = guard::HighRiskDischargeGuard::for_patient(patient).is_high_risk();
        let full = self.daily_status(patient_id)?;
        let tail_start = full.len().saturating_sub(days as usize);
        let mut recent: Vec<DailyStatus> = full[tail_start..].to_vec();
        if high_risk {
            for day in &mut recent {
                suppress_discharge_narrative(day);
            }
        }
        Ok(recent)
    }

    pub fn latest_daily_status(
        &self,
        patient_id: &str,
    ) -> Result<Option<DailyStatus>, EngineError> {
        Ok(self.daily_status(patient_id)?.last().cloned())
    }

    /// The live snapshot, nudged into agreement with the trajectory tail.
    pub fn aligned_snapshot(&self, patient_id: &str) -> Result<PatientSnapshot, EngineError> {
        let latest = self.latest_daily_status(patient_id)?;
        Ok(trajectory::align(self.snapshot(patient_id)?, latest.as_ref()))
    }

    pub fn timeline(&self, patient_id: &str) -> Result<Vec<TimelineEvent>, EngineError> {
        let patient = self.snapshot(patient_id)?;
        let full = self.daily_status(patient_id)?;
        Ok(timeline::timeline(patient, &full, self.now()))
    }

    pub fn timeline_summary(&self, patient_id: &str) -> Result<TimelineSummary, EngineError> {
        let patient = self.snapshot(patient_id)?;
        let high_risk = guard::HighRiskDischargeGuard::for_patient(patient).is_high_risk();
        let events = self.timeline(patient_id)?;
        Ok(timeline::summarize(&events, high_risk, self.now()))
    }

    /// Deteriorated patients across the roster, worst first.
    pub fn deteriorated_patients(&self) -> Vec<DeteriorationResult> {
        deterioration::detect_all(&self.roster)
    }

    pub fn vitals_series_24h(&self, patient_id: &str) -> Result<VitalsSeries, EngineError> {
        Ok(trajectory::vitals_series_24h(
            self.snapshot(patient_id)?,
            self.now(),
        ))
    }

    pub fn lab_series_72h(&self, patient_id: &str) -> Result<LabSeries, EngineError> {
        Ok(trajectory::lab_series_72h(
            self.snapshot(patient_id)?,
            self.now(),
        ))
    }

    pub fn census(&self) -> UnitCensus {
        census::unit_census(&self.roster)
    }

    pub fn admissions_last_24h(&self) -> Vec<&PatientSnapshot> {
        census::admissions_last_24h(&self.roster, self.now())
    }

    pub fn admissions_count_last_24h(&self) -> usize {
        self.admissions_last_24h().len()
    }

    pub fn predicted_discharges_next_24h(&self) -> Vec<&PatientSnapshot> {
        self.roster
            .iter()
            .filter(|p| match self.daily_status(&p.id) {
                Ok(days) => census::discharge_ready(p, &days),
                Err(_) => false,
            })
            .collect()
    }

    pub fn predicted_discharges_count_next_24h(&self) -> usize {
        self.predicted_discharges_next_24h().len()
    }
}

/// Rewrite one recent simulated day so a high-risk patient never shows a
/// discharge narrative: discharged days become continued monitoring.
fn suppress_discharge_narrative(day: &mut DailyStatus) {
    if day.global_status.is_discharged() {
        day.global_status = GlobalStatus::Stable;
        day.risk_score = day.risk_score.max(0.35);
    }
    if guard::is_discharge_worded(&day.daily_summary) {
        day.daily_summary = "Continued ICU monitoring and support".into();
    }
}
