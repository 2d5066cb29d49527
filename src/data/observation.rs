//! Input records for the heat map.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, ObservationError};

/// One `(row label, column label, value)` triple.
///
/// Values are nominally percentages in `0..=100` but this is not enforced;
/// anything finite is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(alias = "row")]
    pub row_label: String,
    #[serde(alias = "column")]
    pub column_label: String,
    pub value: f64,
}

impl Observation {
    pub fn new<R, C>(row_label: R, column_label: C, value: f64) -> Self
    where
        R: Into<String>,
        C: Into<String>,
    {
        Self {
            row_label: row_label.into(),
            column_label: column_label.into(),
            value,
        }
    }

    /// Reject records that cannot be plotted. Out-of-range finite values pass.
    pub fn validate(&self) -> Result<(), ObservationError> {
        if self.row_label.is_empty() {
            return Err(ObservationError::EmptyRowLabel);
        }
        if self.column_label.is_empty() {
            return Err(ObservationError::EmptyColumnLabel);
        }
        if !self.value.is_finite() {
            return Err(ObservationError::NonFiniteValue { value: self.value });
        }
        Ok(())
    }
}

/// Validate a whole sequence, reporting the first offending input position.
pub fn validate_all(observations: &[Observation]) -> Result<(), GridError> {
    for (position, obs) in observations.iter().enumerate() {
        obs.validate()
            .map_err(|source| GridError::InvalidObservation { position, source })?;
    }
    Ok(())
}
