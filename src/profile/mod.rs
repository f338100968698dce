//! Authored clinical profiles: the expected multi-day course for a
//! patient, written as ordered phases. A profile is optional; most
//! patients have none and get the heuristic trajectory instead.

pub mod library;
pub mod registry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{GlobalStatus, TrendDirection};

/// One contiguous segment of the expected course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Inclusive ICU-day range covered by this phase.
    pub day_start: u32,
    pub day_end: u32,
    pub global_status: GlobalStatus,
    /// Expected risk band; interpolated max→min as the phase progresses.
    pub risk_min: f64,
    pub risk_max: f64,
    pub has_ventilation: bool,
    pub fio2_trend: Option<TrendDirection>,
    pub has_vasopressor: bool,
    pub vasopressor_dose_trend: Option<TrendDirection>,
    pub lactate_trend: Option<TrendDirection>,
    pub crp_trend: Option<TrendDirection>,
    pub description: String,
}

impl Phase {
    pub fn contains_day(&self, day: u32) -> bool {
        (self.day_start..=self.day_end).contains(&day)
    }

    /// Span in days; a single-day phase has span 1, so progress math never
    /// divides by zero.
    pub fn span(&self) -> u32 {
        self.day_end - self.day_start + 1
    }
}

/// An authored event expected on a specific ICU day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEvent {
    pub day: u32,
    pub description: String,
}

/// The authored expected trajectory for one patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalProfile {
    pub patient_id: String,
    pub diagnosis_primary: String,
    pub phases: Vec<Phase>,
    /// Expected ICU discharge day.
    pub discharge_day: u32,
    pub key_events: Vec<KeyEvent>,
}

/// Why an authored profile cannot be trusted. Never escapes to engine
/// callers; the generator logs it and falls back to the heuristic path.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile has no phases")]
    Empty,
    #[error("Phase day range inverted: {start}..{end}")]
    InvertedDayRange { start: u32, end: u32 },
    #[error("Phase risk range inverted: {min}..{max}")]
    InvertedRiskRange { min: f64, max: f64 },
    #[error("Coverage gap between day {previous_end} and day {next_start}")]
    CoverageGap { previous_end: u32, next_start: u32 },
    #[error("Phases start at day {0}, expected day 1")]
    LateStart(u32),
    #[error("Discharge day {discharge_day} outside phase coverage ending at {coverage_end}")]
    DischargeOutsideCoverage {
        discharge_day: u32,
        coverage_end: u32,
    },
}

impl ClinicalProfile {
    /// Last day any phase covers.
    pub fn coverage_end(&self) -> u32 {
        self.phases.iter().map(|p| p.day_end).max().unwrap_or(0)
    }

    pub fn phase_for_day(&self, day: u32) -> Option<&Phase> {
        self.phases.iter().find(|p| p.contains_day(day))
    }

    /// Nearest phase ending before `day` (freeze-forward source).
    pub fn phase_before_day(&self, day: u32) -> Option<&Phase> {
        self.phases
            .iter()
            .filter(|p| p.day_end < day)
            .max_by_key(|p| p.day_end)
    }

    /// Structural validation: phases sorted and contiguous from day 1,
    /// ranges not inverted, discharge day covered.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let first = self.phases.first().ok_or(ProfileError::Empty)?;
        if first.day_start != 1 {
            return Err(ProfileError::LateStart(first.day_start));
        }

        let mut previous_end: Option<u32> = None;
        for phase in &self.phases {
            if phase.day_start > phase.day_end {
                return Err(ProfileError::InvertedDayRange {
                    start: phase.day_start,
                    end: phase.day_end,
                });
            }
            if phase.risk_min > phase.risk_max {
                return Err(ProfileError::InvertedRiskRange {
                    min: phase.risk_min,
                    max: phase.risk_max,
                });
            }
            if let Some(prev) = previous_end {
                if phase.day_start != prev + 1 {
                    return Err(ProfileError::CoverageGap {
                        previous_end: prev,
                        next_start: phase.day_start,
                    });
                }
            }
            previous_end = Some(phase.day_end);
        }

        let coverage_end = self.coverage_end();
        if self.discharge_day > coverage_end {
            return Err(ProfileError::DischargeOutsideCoverage {
                discharge_day: self.discharge_day,
                coverage_end,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GlobalStatus;

    fn phase(start: u32, end: u32, status: GlobalStatus, min: f64, max: f64) -> Phase {
        Phase {
            day_start: start,
            day_end: end,
            global_status: status,
            risk_min: min,
            risk_max: max,
            has_ventilation: false,
            fio2_trend: None,
            has_vasopressor: false,
            vasopressor_dose_trend: None,
            lactate_trend: None,
            crp_trend: None,
            description: "test phase".into(),
        }
    }

    fn profile(phases: Vec<Phase>, discharge_day: u32) -> ClinicalProfile {
        ClinicalProfile {
            patient_id: "p1".into(),
            diagnosis_primary: "test".into(),
            phases,
            discharge_day,
            key_events: Vec::new(),
        }
    }

    #[test]
    fn contiguous_profile_validates() {
        let p = profile(
            vec![
                phase(1, 2, GlobalStatus::Critical, 0.7, 0.85),
                phase(3, 6, GlobalStatus::Severe, 0.5, 0.7),
                phase(7, 30, GlobalStatus::DischargedIcu, 0.1, 0.2),
            ],
            6,
        );
        assert!(p.validate().is_ok());
    }

    #[test]
    fn gap_is_rejected() {
        let p = profile(
            vec![
                phase(1, 2, GlobalStatus::Critical, 0.7, 0.85),
                phase(4, 6, GlobalStatus::Severe, 0.5, 0.7),
            ],
            6,
        );
        assert_eq!(
            p.validate(),
            Err(ProfileError::CoverageGap {
                previous_end: 2,
                next_start: 4
            })
        );
    }

    #[test]
    fn inverted_risk_range_is_rejected() {
        let p = profile(vec![phase(1, 6, GlobalStatus::Severe, 0.7, 0.5)], 6);
        assert!(matches!(
            p.validate(),
            Err(ProfileError::InvertedRiskRange { .. })
        ));
    }

    #[test]
    fn discharge_beyond_coverage_is_rejected() {
        let p = profile(vec![phase(1, 6, GlobalStatus::Severe, 0.5, 0.7)], 12);
        assert!(matches!(
            p.validate(),
            Err(ProfileError::DischargeOutsideCoverage { .. })
        ));
    }

    #[test]
    fn single_day_phase_has_span_one() {
        let p = phase(5, 5, GlobalStatus::Improving, 0.2, 0.3);
        assert_eq!(p.span(), 1);
        assert!(p.contains_day(5));
        assert!(!p.contains_day(6));
    }

    #[test]
    fn phase_before_day_finds_nearest_predecessor() {
        let p = profile(
            vec![
                phase(1, 2, GlobalStatus::Critical, 0.7, 0.85),
                phase(3, 6, GlobalStatus::Severe, 0.5, 0.7),
            ],
            6,
        );
        assert_eq!(p.phase_before_day(10).unwrap().day_end, 6);
        assert!(p.phase_before_day(1).is_none());
    }
}
