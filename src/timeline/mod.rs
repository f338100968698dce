//! Derived event timeline: discrete, severity-tagged events synthesized
//! from the simulated trajectory and the raw clinical records.

pub mod guard;
pub mod summary;
pub mod synthesize;
pub mod types;

pub use guard::HighRiskDischargeGuard;
pub use summary::summarize;
pub use synthesize::timeline;
pub use types::{EventSeverity, EventType, TimelineEvent, TimelineSummary};
