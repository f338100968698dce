use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::MedicationClass;

/// An administered or prescribed medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub class: MedicationClass,
    /// Numeric dose in the unit below (mg/kg or mcg/kg/min depending on class).
    pub dose: f64,
    pub unit: String,
    pub days_of_use: u32,
    pub started_at: DateTime<Utc>,
    pub active: bool,
}

impl Medication {
    pub fn is_active_vasopressor(&self) -> bool {
        self.active && self.class == MedicationClass::Vasopressor
    }
}

/// Sum of all active vasopressor doses (0.0 when none are running).
pub fn total_vasopressor_dose(medications: &[Medication]) -> f64 {
    medications
        .iter()
        .filter(|m| m.is_active_vasopressor())
        .map(|m| m.dose)
        .sum()
}
