//! Colour schemes for the heat map UI.
//!
//! A scheme sets the egui visuals and supplies the severity palette used for
//! plot points and the legend.

use eframe::egui::{Color32, Context, Visuals};

use crate::data::severity::SeverityPalette;

/// Visual theme, including user-defined custom schemes.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
    /// Solarized Dark.
    SolarizedDark,
    /// Nord: blue-grey dark theme.
    Nord,
    /// Pure-black background with maximally-saturated band colours.
    HighContrast,
    Custom(CustomColorScheme),
}

/// User-defined custom color scheme.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomColorScheme {
    /// Visuals for egui context (falls back to dark).
    pub visuals: Option<Visuals>,
    pub palette: SeverityPalette,
    /// Optional label for UI display.
    pub label: Option<String>,
}

impl ColorScheme {
    /// All built-in schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Dark,
            ColorScheme::Light,
            ColorScheme::SolarizedDark,
            ColorScheme::Nord,
            ColorScheme::HighContrast,
        ]
    }

    pub fn label(&self) -> String {
        match self {
            ColorScheme::Dark => "Dark".to_string(),
            ColorScheme::Light => "Light".to_string(),
            ColorScheme::SolarizedDark => "Solarized Dark".to_string(),
            ColorScheme::Nord => "Nord".to_string(),
            ColorScheme::HighContrast => "High Contrast".to_string(),
            ColorScheme::Custom(custom) => {
                custom.label.clone().unwrap_or_else(|| "Custom".to_string())
            }
        }
    }

    /// Look up a built-in scheme by its [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<ColorScheme> {
        Self::all().iter().find(|s| s.label() == label).cloned()
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
            ColorScheme::Light => ctx.set_visuals(Visuals::light()),
            ColorScheme::SolarizedDark => {
                let mut v = Visuals::dark();
                let base03 = Color32::from_rgb(0, 43, 54);
                let base02 = Color32::from_rgb(7, 54, 66);
                let base01 = Color32::from_rgb(88, 110, 117);
                let base0 = Color32::from_rgb(131, 148, 150);
                v.panel_fill = base03;
                v.window_fill = base02;
                v.extreme_bg_color = base03;
                v.faint_bg_color = base02;
                v.override_text_color = Some(base0);
                v.widgets.noninteractive.bg_fill = base02;
                v.widgets.inactive.bg_fill = base02;
                v.widgets.hovered.bg_fill = base01;
                ctx.set_visuals(v);
            }
            ColorScheme::Nord => {
                let mut v = Visuals::dark();
                let polar0 = Color32::from_rgb(46, 52, 64);
                let polar1 = Color32::from_rgb(59, 66, 82);
                let snow0 = Color32::from_rgb(216, 222, 233);
                v.panel_fill = polar0;
                v.window_fill = polar1;
                v.extreme_bg_color = polar0;
                v.faint_bg_color = polar1;
                v.override_text_color = Some(snow0);
                v.widgets.noninteractive.bg_fill = polar1;
                v.widgets.hovered.bg_fill = Color32::from_rgb(76, 86, 106);
                ctx.set_visuals(v);
            }
            ColorScheme::HighContrast => {
                let mut v = Visuals::dark();
                v.panel_fill = Color32::BLACK;
                v.window_fill = Color32::from_rgb(10, 10, 10);
                v.extreme_bg_color = Color32::BLACK;
                v.faint_bg_color = Color32::from_rgb(20, 20, 20);
                v.override_text_color = Some(Color32::WHITE);
                ctx.set_visuals(v);
            }
            ColorScheme::Custom(custom) => {
                ctx.set_visuals(custom.visuals.clone().unwrap_or_else(Visuals::dark));
            }
        }
    }

    /// Severity band colours for this scheme.
    pub fn severity_palette(&self) -> SeverityPalette {
        match self {
            ColorScheme::Dark | ColorScheme::Light => SeverityPalette::default(),
            ColorScheme::SolarizedDark => SeverityPalette {
                high: Color32::from_rgb(220, 50, 47),
                medium: Color32::from_rgb(181, 137, 0),
                low: Color32::from_rgb(133, 153, 0),
            },
            ColorScheme::Nord => SeverityPalette {
                high: Color32::from_rgb(191, 97, 106),
                medium: Color32::from_rgb(235, 203, 139),
                low: Color32::from_rgb(163, 190, 140),
            },
            ColorScheme::HighContrast => SeverityPalette {
                high: Color32::from_rgb(255, 0, 0),
                medium: Color32::from_rgb(255, 255, 0),
                low: Color32::from_rgb(0, 255, 0),
            },
            ColorScheme::Custom(custom) => custom.palette,
        }
    }

    /// Border colour for the highlighted (active) point.
    pub fn highlight_color(&self) -> Color32 {
        match self {
            ColorScheme::Light => Color32::from_rgb(17, 24, 39),
            ColorScheme::Custom(custom) => custom
                .visuals
                .as_ref()
                .map(|v| v.strong_text_color())
                .unwrap_or(Color32::WHITE),
            _ => Color32::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::severity::SeverityBand;

    #[test]
    fn every_builtin_palette_distinguishes_bands() {
        for scheme in ColorScheme::all() {
            let p = scheme.severity_palette();
            let colors: Vec<Color32> = SeverityBand::all()
                .iter()
                .map(|b| p.color_for(*b))
                .collect();
            assert_ne!(colors[0], colors[1], "{}", scheme.label());
            assert_ne!(colors[1], colors[2], "{}", scheme.label());
            assert_ne!(colors[0], colors[2], "{}", scheme.label());
        }
    }

    #[test]
    fn label_round_trips_for_builtins() {
        for scheme in ColorScheme::all() {
            let parsed = ColorScheme::from_label(&scheme.label());
            assert_eq!(parsed.as_ref(), Some(scheme));
        }
        assert_eq!(ColorScheme::from_label("Custom"), None);
    }
}
