//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::axis_index::Axis;

/// A single observation that cannot be placed on the grid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ObservationError {
    #[error("row label is empty")]
    EmptyRowLabel,
    #[error("column label is empty")]
    EmptyColumnLabel,
    #[error("value {value} is not a finite number")]
    NonFiniteValue { value: f64 },
}

/// Failure while building a [`crate::data::grid::HeatGrid`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("observation #{position} is invalid: {source}")]
    InvalidObservation {
        position: usize,
        #[source]
        source: ObservationError,
    },
    /// The axis indices were not built from the same sequence that is being projected.
    #[error("{axis} label `{label}` of observation #{position} is missing from its axis index")]
    MissingLabel {
        axis: Axis,
        label: String,
        position: usize,
    },
}

/// Failure while reading or writing observation and settings files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported file format `{extension}` (expected .json, .yaml or .yml)")]
    UnsupportedFormat { extension: String },
}
