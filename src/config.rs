//! Configuration types for the heat map UI.

use serde::{Deserialize, Serialize};

use crate::events::EventController;

pub use crate::color_scheme::{ColorScheme, CustomColorScheme};

// ─────────────────────────────────────────────────────────────────────────────
// Feature flags
// ─────────────────────────────────────────────────────────────────────────────

/// Toggle individual UI features on or off. All default to enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Show the top menu bar (open, export, colour scheme).
    pub top_bar: bool,
    /// Show the severity legend.
    pub legend: bool,
    /// Show a tooltip for the active point.
    pub tooltips: bool,
    /// Label axis ticks with row/column labels.
    pub axis_labels: bool,
    /// Show the plot grid.
    pub grid: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            top_bar: true,
            legend: true,
            tooltips: true,
            axis_labels: true,
            grid: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point style
// ─────────────────────────────────────────────────────────────────────────────

/// Marker appearance and hover behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointStyleConfig {
    /// Marker radius in points. Default: `14.0`.
    pub radius: f32,
    /// Opacity of the active point. Default: `1.0`.
    pub active_opacity: f32,
    /// Opacity of every other point. Default: `0.7`.
    pub inactive_opacity: f32,
    /// Width of the highlight border around the active point. Default: `2.0`.
    pub border_width: f32,
    /// Pointer distance (screen points) within which a marker counts as hovered.
    pub hit_radius: f32,
}

impl Default for PointStyleConfig {
    fn default() -> Self {
        Self {
            radius: 14.0,
            active_opacity: 1.0,
            inactive_opacity: 0.7,
            border_width: 2.0,
            hit_radius: 14.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controllers
// ─────────────────────────────────────────────────────────────────────────────

/// Optional programmatic controllers attached to the heat map.
#[derive(Clone, Default)]
pub struct Controllers {
    pub event: Option<EventController>,
}

// ─────────────────────────────────────────────────────────────────────────────
// HeatMapConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the heat map.
#[derive(Clone)]
pub struct HeatMapConfig {
    /// Native window title.
    pub title: String,
    /// Optional headline rendered inside the UI.
    pub headline: Option<String>,
    /// Optional subheadline below the headline.
    pub subheadline: Option<String>,
    pub native_options: Option<eframe::NativeOptions>,

    /// Name shown next to the row (y) axis.
    pub row_axis_name: Option<String>,
    /// Name shown next to the column (x) axis.
    pub column_axis_name: Option<String>,
    /// Text shown instead of the plot when there are no observations.
    pub empty_message: String,

    pub features: FeatureFlags,
    pub point_style: PointStyleConfig,
    pub color_scheme: ColorScheme,
    pub controllers: Controllers,
}

impl Default for HeatMapConfig {
    fn default() -> Self {
        Self {
            title: "Risk Heat Map".to_string(),
            headline: None,
            subheadline: None,
            native_options: None,
            row_axis_name: None,
            column_axis_name: None,
            empty_message: "No data".to_string(),
            features: FeatureFlags::default(),
            point_style: PointStyleConfig::default(),
            color_scheme: ColorScheme::default(),
            controllers: Controllers::default(),
        }
    }
}
