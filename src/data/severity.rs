//! Severity bands used to colour heat map cells.
//!
//! Polarity is inverted on purpose: a low compliance score is a high risk.

use egui::Color32;

/// Inclusive upper bound of the high-severity band.
pub const HIGH_SEVERITY_MAX: f64 = 33.0;
/// Inclusive upper bound of the medium-severity band.
pub const MEDIUM_SEVERITY_MAX: f64 = 66.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityBand {
    High,
    Medium,
    Low,
}

impl SeverityBand {
    /// Bands in legend order, most severe first.
    pub fn all() -> [SeverityBand; 3] {
        [SeverityBand::High, SeverityBand::Medium, SeverityBand::Low]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityBand::High => "High risk",
            SeverityBand::Medium => "Medium risk",
            SeverityBand::Low => "Low risk",
        }
    }

    /// Score range covered by the band, for legends.
    pub fn range_label(&self) -> String {
        match self {
            SeverityBand::High => format!("≤ {HIGH_SEVERITY_MAX}"),
            SeverityBand::Medium => format!("{HIGH_SEVERITY_MAX}–{MEDIUM_SEVERITY_MAX}"),
            SeverityBand::Low => format!("> {MEDIUM_SEVERITY_MAX}"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityBand::High => "high",
            SeverityBand::Medium => "medium",
            SeverityBand::Low => "low",
        }
    }
}

/// Classify a score. Values outside `0..=100` go through the same comparisons.
pub fn classify(value: f64) -> SeverityBand {
    if value <= HIGH_SEVERITY_MAX {
        SeverityBand::High
    } else if value <= MEDIUM_SEVERITY_MAX {
        SeverityBand::Medium
    } else {
        SeverityBand::Low
    }
}

/// Display colour for each band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityPalette {
    pub high: Color32,
    pub medium: Color32,
    pub low: Color32,
}

impl Default for SeverityPalette {
    fn default() -> Self {
        Self {
            high: Color32::from_rgb(239, 68, 68),
            medium: Color32::from_rgb(245, 158, 11),
            low: Color32::from_rgb(34, 197, 94),
        }
    }
}

impl SeverityPalette {
    pub fn color_for(&self, band: SeverityBand) -> Color32 {
        match band {
            SeverityBand::High => self.high,
            SeverityBand::Medium => self.medium,
            SeverityBand::Low => self.low,
        }
    }
}
