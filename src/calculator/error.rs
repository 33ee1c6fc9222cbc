//! Error types raised by the calculator engine.
//!
//! None of these cross the display boundary: the engine recovers from every
//! one of them locally and shows [`ERROR_SENTINEL`] instead.

use thiserror::Error;

/// What the display shows after a failed operation.
pub const ERROR_SENTINEL: &str = "Err";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("factorial needs a non-negative integer, got {value}")]
    InvalidFactorialOperand { value: f64 },

    #[error("{operation} is undefined for {value}")]
    DomainError { operation: &'static str, value: f64 },

    #[error("display text '{text}' is not a number")]
    InvalidDisplay { text: String },

    #[error("unknown key '{token}'{}", suggestion_hint(.suggestion))]
    UnknownToken {
        token: String,
        suggestion: Option<&'static str>,
    },

    #[error("{operation} is only available in scientific mode")]
    OperationDisabled { operation: &'static str },
}

impl CalcError {
    /// Short machine-friendly name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "division_by_zero",
            Self::InvalidFactorialOperand { .. } => "invalid_factorial_operand",
            Self::DomainError { .. } => "domain_error",
            Self::InvalidDisplay { .. } => "invalid_display",
            Self::UnknownToken { .. } => "unknown_token",
            Self::OperationDisabled { .. } => "operation_disabled",
        }
    }
}

fn suggestion_hint(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}
