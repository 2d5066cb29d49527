//! Loading and saving observation sets and view settings.
//!
//! Observations are read from JSON or YAML depending on the file extension.
//! View settings are stored as JSON through a serializable mirror type, since
//! [`HeatMapConfig`] carries values that cannot derive serde traits.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ColorScheme, FeatureFlags, HeatMapConfig, PointStyleConfig};
use crate::data::observation::Observation;
use crate::error::PersistenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

fn format_for(path: &Path) -> Result<FileFormat, PersistenceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => Ok(FileFormat::Json),
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        _ => Err(PersistenceError::UnsupportedFormat { extension: ext }),
    }
}

fn read_to_string(path: &Path) -> Result<String, PersistenceError> {
    std::fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_string(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    std::fs::write(path, contents).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse observations from a string in the given format.
pub fn parse_observations_json(s: &str) -> Result<Vec<Observation>, PersistenceError> {
    Ok(serde_json::from_str(s)?)
}

pub fn parse_observations_yaml(s: &str) -> Result<Vec<Observation>, PersistenceError> {
    Ok(serde_yaml::from_str(s)?)
}

/// Load an observation sequence from a `.json`, `.yaml` or `.yml` file.
pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>, PersistenceError> {
    let path = path.as_ref();
    let format = format_for(path)?;
    let text = read_to_string(path)?;
    let observations = match format {
        FileFormat::Json => parse_observations_json(&text)?,
        FileFormat::Yaml => parse_observations_yaml(&text)?,
    };
    log::info!(
        "loaded {} observations from {}",
        observations.len(),
        path.display()
    );
    Ok(observations)
}

pub fn save_observations<P: AsRef<Path>>(
    path: P,
    observations: &[Observation],
) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let text = match format_for(path)? {
        FileFormat::Json => serde_json::to_string_pretty(observations)?,
        FileFormat::Yaml => serde_yaml::to_string(observations)?,
    };
    write_string(path, &text)
}

// ---------- View settings ----------

/// Serializable subset of [`HeatMapConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettingsSerde {
    /// Label of a built-in colour scheme; custom schemes are not persisted.
    pub color_scheme: Option<String>,
    pub features: FeatureFlags,
    pub point_style: PointStyleConfig,
}

impl From<&HeatMapConfig> for ViewSettingsSerde {
    fn from(cfg: &HeatMapConfig) -> Self {
        let color_scheme = match &cfg.color_scheme {
            ColorScheme::Custom(_) => None,
            other => Some(other.label()),
        };
        Self {
            color_scheme,
            features: cfg.features.clone(),
            point_style: cfg.point_style.clone(),
        }
    }
}

impl ViewSettingsSerde {
    /// Apply stored settings. Unknown scheme labels leave the scheme unchanged.
    pub fn apply_to(self, cfg: &mut HeatMapConfig) {
        if let Some(label) = &self.color_scheme {
            match ColorScheme::from_label(label) {
                Some(scheme) => cfg.color_scheme = scheme,
                None => log::warn!("ignoring unknown colour scheme `{label}` in settings"),
            }
        }
        cfg.features = self.features;
        cfg.point_style = self.point_style;
    }
}

pub fn save_settings<P: AsRef<Path>>(path: P, cfg: &HeatMapConfig) -> Result<(), PersistenceError> {
    let text = serde_json::to_string_pretty(&ViewSettingsSerde::from(cfg))?;
    write_string(path.as_ref(), &text)
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ViewSettingsSerde, PersistenceError> {
    let text = read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}
