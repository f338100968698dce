use thiserror::Error;

/// Errors surfaced to engine callers.
///
/// Malformed authored profiles are deliberately NOT here: the generator
/// logs them and falls back to the heuristic path for that patient.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown patient id: {id}")]
    PatientNotFound { id: String },
}

/// Errors from the bedside calculators (the only place non-positive
/// numeric input is rejected rather than treated as "rule does not fire").
#[derive(Debug, Error, PartialEq)]
pub enum CalculatorError {
    #[error("Invalid input for {calculation}: {detail}")]
    InvalidInput {
        calculation: &'static str,
        detail: String,
    },
}
