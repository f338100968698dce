//! Instantaneous scoring: composite risk, SOFA-like severity, and bedside
//! calculators. All pure functions over a snapshot.

pub mod calculators;
pub mod risk;
pub mod severity;

pub use risk::risk_score;
pub use severity::severity_score;
