use serde::{Deserialize, Serialize};

use super::enums::VentMode;

/// Mechanical-ventilation parameters. Presence of this record on a snapshot
/// means the patient is on ventilatory support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentilationParams {
    pub mode: VentMode,
    /// Inspired oxygen fraction, percent (21-100).
    pub fio2_pct: f64,
    /// Positive end-expiratory pressure, cmH2O.
    pub peep_cmh2o: f64,
    pub support_pressure_cmh2o: Option<f64>,
    /// Tidal volume, mL/kg.
    pub tidal_volume_ml_kg: Option<f64>,
    pub respiratory_rate: f64,
    /// PaO2/FiO2 ratio when a blood gas is available.
    pub pao2_fio2: Option<f64>,
}
