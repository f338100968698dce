use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Invalid value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}
pub(crate) use str_enum;

str_enum!(GlobalStatus {
    Critical => "critical",
    Severe => "severe",
    Stable => "stable",
    Improving => "improving",
    DischargedIcu => "discharged_icu",
});

impl GlobalStatus {
    pub fn is_discharged(self) -> bool {
        self == GlobalStatus::DischargedIcu
    }
}

str_enum!(TrendDirection {
    Up => "up",
    Down => "down",
    Stable => "stable",
});

str_enum!(LabTrend {
    Rising => "rising",
    Stable => "stable",
    Falling => "falling",
});

str_enum!(MedicationClass {
    Vasopressor => "vasopressor",
    Antibiotic => "antibiotic",
    Sedative => "sedative",
    Diuretic => "diuretic",
    Other => "other",
});

str_enum!(LabKind {
    Lactate => "lactate",
    Crp => "crp",
    BloodGas => "blood_gas",
    Cbc => "cbc",
    RenalFunction => "renal_function",
    HepaticFunction => "hepatic_function",
    Procalcitonin => "procalcitonin",
    Other => "other",
});

str_enum!(VentMode {
    Cmv => "cmv",
    Simv => "simv",
    Psv => "psv",
    Cpap => "cpap",
    Bipap => "bipap",
    Hfov => "hfov",
});

str_enum!(RiskLevel {
    High => "high",
    Moderate => "moderate",
    Low => "low",
});

impl RiskLevel {
    /// Band a composite mortality risk score.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            RiskLevel::High
        } else if score >= 0.4 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}
