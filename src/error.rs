//! Error types for the planner core.

use std::fmt;

use thiserror::Error;

/// Result type for planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors that abort a planning request. Recoverable shortfalls are reported
/// as [`crate::plan::PlanWarning`]s on the variants instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// Request parameters failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Planner options failed validation.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// A place carries a non-finite coordinate.
    #[error("invalid coordinate for {id}: ({lat}, {lon})")]
    InvalidCoordinate { id: String, lat: f64, lon: f64 },

    /// The travel estimator returned a negative or non-finite estimate.
    #[error("invalid travel estimate {from} -> {to}: {km} km, {minutes} min")]
    InvalidEstimate {
        from: String,
        to: String,
        km: f64,
        minutes: f64,
    },
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation, in check order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid planner params: {}", join_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Names of the offending fields.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field.as_str()).collect()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.field == name)
    }
}

/// Rejected [`crate::solver::PlannerOptions`] fields, in check order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid planner options: {}", join_fields(.fields))]
pub struct OptionsError {
    pub fields: Vec<FieldError>,
}

impl OptionsError {
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.field == name)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
