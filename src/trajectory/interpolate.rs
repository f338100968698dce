//! Pure interpolation helpers shared by the profile and fallback paths.

use crate::models::TrendDirection;

/// Linear interpolation between two values. `progress` is clamped to [0,1].
pub fn lerp(start: f64, end: f64, progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    start + (end - start) * p
}

/// Position of `day` inside a phase, in [0,1).
///
/// The denominator is the phase span in days, so a single-day phase
/// (start == end) yields progress 0 without dividing by zero.
pub fn phase_progress(day: u32, day_start: u32, day_end: u32) -> f64 {
    let span = day_end.saturating_sub(day_start) + 1;
    f64::from(day.saturating_sub(day_start)) / f64::from(span)
}

/// Scale an anchor value along a declared trend as a phase progresses.
///
/// `up` walks from 80% to 120% of the anchor, `down` the reverse,
/// `stable` holds the anchor.
pub fn trend_value(anchor: f64, trend: TrendDirection, progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    match trend {
        TrendDirection::Up => anchor * (0.8 + 0.4 * p),
        TrendDirection::Down => anchor * (1.2 - 0.4 * p),
        TrendDirection::Stable => anchor,
    }
}

/// Deterministic FNV-1a hash of a seed string. Replaces randomness wherever
/// per-patient variation is needed: the same seed always yields the same
/// value.
pub fn seed_hash(seed: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in seed.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// A deterministic value in [0,1) derived from a seed string.
pub fn seed_fraction(seed: &str) -> f64 {
    (seed_hash(seed) % 10_000) as f64 / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(0.8, 0.6, 0.0), 0.8);
        assert_eq!(lerp(0.8, 0.6, 1.0), 0.6);
        assert!((lerp(0.8, 0.6, 0.5) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn lerp_clamps_progress() {
        assert_eq!(lerp(1.0, 0.0, 2.0), 0.0);
        assert_eq!(lerp(1.0, 0.0, -1.0), 1.0);
    }

    #[test]
    fn single_day_phase_has_zero_progress() {
        assert_eq!(phase_progress(5, 5, 5), 0.0);
    }

    #[test]
    fn progress_stays_below_one_inside_phase() {
        // Day 4 of phase [1,4]: 3/4.
        assert!((phase_progress(4, 1, 4) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn trend_scaling() {
        assert!((trend_value(40.0, TrendDirection::Up, 0.0) - 32.0).abs() < 1e-9);
        assert!((trend_value(40.0, TrendDirection::Up, 1.0) - 48.0).abs() < 1e-9);
        assert!((trend_value(40.0, TrendDirection::Down, 1.0) - 32.0).abs() < 1e-9);
        assert_eq!(trend_value(40.0, TrendDirection::Stable, 0.7), 40.0);
    }

    #[test]
    fn seed_fraction_is_stable_and_bounded() {
        let a = seed_fraction("p1-day-2");
        let b = seed_fraction("p1-day-2");
        assert_eq!(a, b);
        assert!((0.0..1.0).contains(&a));
        assert_ne!(seed_fraction("p1-day-2"), seed_fraction("p1-day-3"));
    }
}
