//! Mapping from sparse labeled observations to a dense categorical grid.
//!
//! The mapper is a pure function of the observation sequence: it validates the
//! records, builds one [`AxisIndex`] per axis and projects every observation to a
//! [`PlotPoint`]. Output order always matches input order; duplicates are kept.

use crate::data::axis_index::{Axis, AxisDomain, AxisIndex};
use crate::data::observation::{validate_all, Observation};
use crate::data::severity::{classify, SeverityBand};
use crate::error::GridError;

/// Identifier of a plot point: its position in the input sequence.
pub type PointId = usize;

/// A positioned observation ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub id: PointId,
    pub row_position: usize,
    pub column_position: usize,
    pub value: f64,
    pub row_label: String,
    pub column_label: String,
}

impl PlotPoint {
    pub fn severity(&self) -> SeverityBand {
        classify(self.value)
    }

    /// Plot-space coordinates: columns on x, rows on y.
    pub fn xy(&self) -> [f64; 2] {
        [self.column_position as f64, self.row_position as f64]
    }

    /// Hover text: row label, column label and the value as a whole percentage.
    pub fn tooltip(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.row_label,
            self.column_label,
            format_percent(self.value)
        )
    }
}

/// Format a score as a whole-number percentage, e.g. `42.5 -> "43%"`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// Project observations onto positions using the given indices.
///
/// A lookup miss means the indices were built from a different sequence and is
/// reported as [`GridError::MissingLabel`] instead of dropping the point.
pub fn project(
    observations: &[Observation],
    rows: &AxisIndex,
    columns: &AxisIndex,
) -> Result<Vec<PlotPoint>, GridError> {
    observations
        .iter()
        .enumerate()
        .map(|(id, obs)| {
            let row_position =
                rows.position(&obs.row_label)
                    .ok_or_else(|| GridError::MissingLabel {
                        axis: Axis::Row,
                        label: obs.row_label.clone(),
                        position: id,
                    })?;
            let column_position =
                columns
                    .position(&obs.column_label)
                    .ok_or_else(|| GridError::MissingLabel {
                        axis: Axis::Column,
                        label: obs.column_label.clone(),
                        position: id,
                    })?;
            Ok(PlotPoint {
                id,
                row_position,
                column_position,
                value: obs.value,
                row_label: obs.row_label.clone(),
                column_label: obs.column_label.clone(),
            })
        })
        .collect()
}

/// Per-band point counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn get(&self, band: SeverityBand) -> usize {
        match band {
            SeverityBand::High => self.high,
            SeverityBand::Medium => self.medium,
            SeverityBand::Low => self.low,
        }
    }
}

/// The full mapper output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatGrid {
    rows: AxisIndex,
    columns: AxisIndex,
    points: Vec<PlotPoint>,
}

impl HeatGrid {
    pub fn build(observations: &[Observation]) -> Result<Self, GridError> {
        validate_all(observations)?;
        let rows = AxisIndex::build(observations.iter().map(|o| o.row_label.as_str()));
        let columns = AxisIndex::build(observations.iter().map(|o| o.column_label.as_str()));
        let points = project(observations, &rows, &columns)?;
        log::debug!(
            "built heat grid: {} points, {} rows, {} columns",
            points.len(),
            rows.len(),
            columns.len()
        );
        Ok(Self {
            rows,
            columns,
            points,
        })
    }

    pub fn rows(&self) -> &AxisIndex {
        &self.rows
    }

    pub fn columns(&self) -> &AxisIndex {
        &self.columns
    }

    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub fn point(&self, id: PointId) -> Option<&PlotPoint> {
        self.points.get(id)
    }

    pub fn row_domain(&self) -> AxisDomain {
        self.rows.domain()
    }

    pub fn column_domain(&self) -> AxisDomain {
        self.columns.domain()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for p in &self.points {
            match p.severity() {
                SeverityBand::High => counts.high += 1,
                SeverityBand::Medium => counts.medium += 1,
                SeverityBand::Low => counts.low += 1,
            }
        }
        counts
    }
}
