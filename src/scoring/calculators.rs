//! Pediatric bedside calculators.
//!
//! Pure arithmetic helpers shared by presentation code. Unlike the rest of
//! the engine these reject invalid numeric input with a typed error rather
//! than silently skipping a rule: a nonsensical weight in a dose
//! calculation must never produce a plausible-looking number.

use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfusionDose {
    pub dose_mcg_min: f64,
    pub ml_per_hour: f64,
}

/// Weight-based continuous infusion: mcg/min and pump rate in mL/h.
pub fn drug_infusion_dose(
    weight_kg: f64,
    dose_mcg_kg_min: f64,
    concentration_mg_ml: f64,
) -> Result<InfusionDose, CalculatorError> {
    if weight_kg <= 0.0 || dose_mcg_kg_min < 0.0 || concentration_mg_ml <= 0.0 {
        return Err(CalculatorError::InvalidInput {
            calculation: "drug_infusion_dose",
            detail: format!(
                "weight={weight_kg} dose={dose_mcg_kg_min} concentration={concentration_mg_ml}"
            ),
        });
    }

    let dose_mcg_min = weight_kg * dose_mcg_kg_min;
    let concentration_mcg_ml = concentration_mg_ml * 1000.0;
    let ml_per_hour = dose_mcg_min / concentration_mcg_ml * 60.0;

    Ok(InfusionDose {
        dose_mcg_min: round2(dose_mcg_min),
        ml_per_hour: round2(ml_per_hour),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceFluids {
    pub ml_per_day: f64,
    pub ml_per_hour: f64,
}

/// Holliday-Segar maintenance fluids (100/50/20 rule).
pub fn maintenance_fluids(weight_kg: f64) -> Result<MaintenanceFluids, CalculatorError> {
    if weight_kg <= 0.0 {
        return Err(CalculatorError::InvalidInput {
            calculation: "maintenance_fluids",
            detail: format!("weight={weight_kg}"),
        });
    }

    let ml_per_day = if weight_kg <= 10.0 {
        weight_kg * 100.0
    } else if weight_kg <= 20.0 {
        1000.0 + (weight_kg - 10.0) * 50.0
    } else {
        1500.0 + (weight_kg - 20.0) * 20.0
    };

    Ok(MaintenanceFluids {
        ml_per_day: ml_per_day.round(),
        ml_per_hour: round2(ml_per_day / 24.0),
    })
}

/// Schwartz creatinine clearance estimate, mL/min/1.73m².
///
/// `k` defaults to 0.55 for children; adolescents use 0.7.
pub fn schwartz_clearance(
    height_cm: f64,
    serum_creatinine_mg_dl: f64,
    k: f64,
) -> Result<f64, CalculatorError> {
    if height_cm <= 0.0 || serum_creatinine_mg_dl <= 0.0 || k <= 0.0 {
        return Err(CalculatorError::InvalidInput {
            calculation: "schwartz_clearance",
            detail: format!("height={height_cm} creatinine={serum_creatinine_mg_dl} k={k}"),
        });
    }
    Ok(round2(k * height_cm / serum_creatinine_mg_dl))
}

pub const SCHWARTZ_K_CHILD: f64 = 0.55;
pub const SCHWARTZ_K_ADOLESCENT: f64 = 0.7;

/// Mosteller body-surface area, m².
pub fn body_surface_area(weight_kg: f64, height_cm: f64) -> Result<f64, CalculatorError> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return Err(CalculatorError::InvalidInput {
            calculation: "body_surface_area",
            detail: format!("weight={weight_kg} height={height_cm}"),
        });
    }
    let bsa = (weight_kg * height_cm / 3600.0).sqrt();
    Ok(round4(bsa))
}

/// Total dose in mg for a BSA-normalized prescription.
pub fn dose_by_bsa(bsa_m2: f64, dose_mg_m2: f64) -> Result<f64, CalculatorError> {
    if bsa_m2 <= 0.0 || dose_mg_m2 < 0.0 {
        return Err(CalculatorError::InvalidInput {
            calculation: "dose_by_bsa",
            detail: format!("bsa={bsa_m2} dose={dose_mg_m2}"),
        });
    }
    Ok(round2(bsa_m2 * dose_mg_m2))
}
