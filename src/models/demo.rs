//! Demo snapshots for tests, examples and embedding without a data layer.
//!
//! All values are parameterized on `now` so derived views stay
//! reproducible under a fixed clock.

use chrono::{DateTime, Duration, Utc};

use super::enums::{LabKind, LabTrend, MedicationClass, VentMode};
use super::lab::LabResult;
use super::medication::Medication;
use super::patient::{FluidBalance, PatientSnapshot, VitalSigns};
use super::ventilation::VentilationParams;

/// A hemodynamically stable patient with no support devices.
pub fn baseline(id: &str, now: DateTime<Utc>) -> PatientSnapshot {
    PatientSnapshot {
        id: id.to_string(),
        bed: format!("ICU {id}"),
        name: "Demo Patient".into(),
        age_years: 4.0,
        weight_kg: 16.0,
        diagnosis_primary: "Moderate viral bronchiolitis".into(),
        icu_day_count: 3,
        risk_mortality_24h: 0.2,
        risk_mortality_7d: 0.25,
        last_updated: now,
        vital_signs: VitalSigns {
            temperature_c: 36.8,
            heart_rate_bpm: 110.0,
            respiratory_rate: 24.0,
            systolic_mmhg: 98.0,
            diastolic_mmhg: 55.0,
            map_mmhg: 72.0,
            spo2_pct: 97.0,
            glasgow_coma_scale: Some(15),
        },
        fluid_balance: FluidBalance {
            intake_24h_ml_kg_h: 3.2,
            output_24h_ml_kg_h: 2.9,
            balance_24h_ml_kg_h: 0.3,
            intake_total_ml: 1230.0,
            output_total_ml: 1110.0,
            diuresis_ml_kg_h: 2.1,
        },
        medications: Vec::new(),
        ventilation: None,
        lab_results: Vec::new(),
    }
}

/// A patient in septic shock: hypotensive, hypoxic, on norepinephrine and
/// mechanical ventilation, lactate rising.
pub fn septic_shock(id: &str, now: DateTime<Utc>) -> PatientSnapshot {
    let mut p = baseline(id, now);
    p.diagnosis_primary = "Septic shock of pulmonary focus".into();
    p.icu_day_count = 2;
    p.risk_mortality_24h = 0.78;
    p.risk_mortality_7d = 0.86;
    p.vital_signs.map_mmhg = 52.0;
    p.vital_signs.spo2_pct = 88.0;
    p.vital_signs.heart_rate_bpm = 162.0;
    p.vital_signs.temperature_c = 38.9;
    p.fluid_balance.diuresis_ml_kg_h = 0.7;
    p.medications = vec![
        Medication {
            id: format!("{id}-nora"),
            name: "Norepinephrine".into(),
            class: MedicationClass::Vasopressor,
            dose: 0.8,
            unit: "mcg/kg/min".into(),
            days_of_use: 2,
            started_at: now - Duration::days(2),
            active: true,
        },
        Medication {
            id: format!("{id}-ceftx"),
            name: "Ceftriaxone".into(),
            class: MedicationClass::Antibiotic,
            dose: 100.0,
            unit: "mg/kg/day".into(),
            days_of_use: 2,
            started_at: now - Duration::days(2),
            active: true,
        },
    ];
    p.ventilation = Some(VentilationParams {
        mode: VentMode::Cmv,
        fio2_pct: 70.0,
        peep_cmh2o: 10.0,
        support_pressure_cmh2o: None,
        tidal_volume_ml_kg: Some(6.0),
        respiratory_rate: 28.0,
        pao2_fio2: Some(145.0),
    });
    p.lab_results = vec![
        LabResult {
            id: format!("{id}-lac"),
            kind: LabKind::Lactate,
            name: "Lactate".into(),
            value: 3.8,
            unit: Some("mmol/L".into()),
            reference: Some("< 2.0".into()),
            trend: Some(LabTrend::Rising),
            critical: true,
            collected_at: now - Duration::hours(2),
        },
        LabResult {
            id: format!("{id}-crp"),
            kind: LabKind::Crp,
            name: "C-reactive protein".into(),
            value: 180.0,
            unit: Some("mg/L".into()),
            reference: Some("< 3.0".into()),
            trend: Some(LabTrend::Rising),
            critical: true,
            collected_at: now - Duration::hours(3),
        },
    ];
    p
}

/// A patient past the worst of the course: weaned supports, low-normal labs.
pub fn recovering(id: &str, now: DateTime<Utc>) -> PatientSnapshot {
    let mut p = baseline(id, now);
    p.diagnosis_primary = "Severe bacterial pneumonia, resolving".into();
    p.icu_day_count = 9;
    p.risk_mortality_24h = 0.18;
    p.risk_mortality_7d = 0.22;
    p.lab_results = vec![LabResult {
        id: format!("{id}-crp"),
        kind: LabKind::Crp,
        name: "C-reactive protein".into(),
        value: 22.0,
        unit: Some("mg/L".into()),
        reference: Some("< 3.0".into()),
        trend: Some(LabTrend::Falling),
        critical: false,
        collected_at: now - Duration::hours(6),
    }];
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn septic_shock_carries_support_devices() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let p = septic_shock("p1", now);
        assert!(p.on_ventilation());
        assert!(p.has_active_vasopressor());
        assert!(p.risk_mortality_24h > 0.6);
    }

    #[test]
    fn baseline_is_unsupported() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0).unwrap();
        let p = baseline("p2", now);
        assert!(!p.on_ventilation());
        assert!(!p.has_active_vasopressor());
    }
}
