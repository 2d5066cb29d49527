//! riskgrid crate root: re-exports and module wiring.
//!
//! Maps sparse `(row label, column label, value)` observations onto a dense
//! categorical grid and renders it as a risk heat map with egui/eframe:
//! - `data`: pure mapping logic (axis indices, projection, severity, selection)
//! - `sink`: channel for feeding observation sets into the UI
//! - `events`: subscription to hover, data and export events
//! - `config` / `color_scheme` / `persistence`: configuration and stored settings
//! - `panel` / `app`: egui rendering and the native window

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod panel;
pub mod persistence;
pub mod sink;

pub use app::{run_heatmap, run_heatmap_with_observations, HeatMapApp};
pub use color_scheme::{ColorScheme, CustomColorScheme};
pub use config::{Controllers, FeatureFlags, HeatMapConfig, PointStyleConfig};
pub use data::axis_index::{Axis, AxisDomain, AxisIndex};
pub use data::grid::{project, HeatGrid, PlotPoint, PointId};
pub use data::observation::Observation;
pub use data::selection::{transition, PointerEvent, SelectionState};
pub use data::severity::{classify, SeverityBand, SeverityPalette};
pub use error::{GridError, ObservationError, PersistenceError};
pub use events::{EventController, EventFilter, EventKind, HeatMapEvent};
pub use panel::{GridState, HeatMapPanel};
pub use sink::{channel, HeatMapCommand, HeatMapSink};
