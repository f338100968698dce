//! Patient data model: the immutable inputs every other module reads.

pub mod demo;
pub mod enums;
pub mod lab;
pub mod medication;
pub mod patient;
pub mod ventilation;

pub use enums::{
    GlobalStatus, LabKind, LabTrend, MedicationClass, RiskLevel, TrendDirection, VentMode,
};
pub use lab::LabResult;
pub use medication::Medication;
pub use patient::{FluidBalance, PatientSnapshot, VitalSigns};
pub use ventilation::VentilationParams;
