//! Trajectory simulation: per-day clinical states, memoization, and the
//! consistency alignment between the live snapshot and the simulated past.

pub mod align;
pub mod cache;
pub mod fallback;
pub mod generator;
pub mod interpolate;
pub mod series;

pub use align::align;
pub use cache::TrajectoryCache;
pub use generator::{generate, DailyStatus, HemodynamicSupport, VentilationSupport};
pub use series::{lab_series_72h, vitals_series_24h, LabSeries, SeriesPoint, VitalsSeries};
