//! Engine tunables.
//!
//! Thresholds and window sizes shared across modules. The risk-rule weights
//! themselves live next to the rules that apply them; only values consulted
//! from more than one module are promoted here.

pub const ENGINE_NAME: &str = "vigia";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum number of simulated ICU days in any generated trajectory.
pub const MIN_TRAJECTORY_DAYS: u32 = 30;

/// Live 24h mortality risk above which a patient counts as high-risk for
/// the discharge-suppression guard.
pub const HIGH_RISK_GUARD_THRESHOLD: f64 = 0.6;

/// Simulated-day window the discharge guard protects (most recent days).
pub const GUARD_WINDOW_DAYS: u32 = 14;

/// Calendar-day window for the timeline summary.
pub const SUMMARY_WINDOW_DAYS: i64 = 5;

/// Maximum events returned by the timeline summary.
pub const SUMMARY_MAX_EVENTS: usize = 5;

/// Trailing window for deterioration lab relevance, in hours.
pub const DETERIORATION_LAB_WINDOW_HOURS: i64 = 6;

/// Score at or above which a patient qualifies as deteriorated.
pub const DETERIORATION_THRESHOLD: f64 = 0.30;

/// Census high-risk cut-off (standardized high band starts at 0.61).
pub const CENSUS_HIGH_RISK_THRESHOLD: f64 = 0.61;

/// Physiologic FiO2 bounds used when interpolating ventilation support, %.
pub const FIO2_MIN_PCT: f64 = 21.0;
pub const FIO2_MAX_PCT: f64 = 100.0;

pub fn default_log_filter() -> String {
    format!("warn,{}=info", ENGINE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_cargo() {
        assert_eq!(ENGINE_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn default_filter_scopes_crate() {
        assert!(default_log_filter().contains("vigia=info"));
    }

    #[test]
    fn guard_window_fits_min_trajectory() {
        assert!(GUARD_WINDOW_DAYS < MIN_TRAJECTORY_DAYS);
    }
}
