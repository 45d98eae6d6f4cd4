//! Launch configuration models and loaders.
//!
//! A configuration file describes the launch vector, the atmosphere and the
//! integration step. The format follows the file extension: JSON, YAML or TOML.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use range_core::constants::{DEFAULT_ANGLE_STEP_DEG, DEFAULT_GRAVITY_M_S2};
use range_core::{KinematicVector, SimulationParams};
use range_search::{RotationScheme, SearchOptions};
use range_trajectory::DensityModel;
use serde::Deserialize;
use thiserror::Error;

/// Launch velocity components as written in configuration files.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct VelocityConfig {
    pub x: f64,
    pub y: f64,
}

/// Raw launch configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LaunchConfig {
    pub v0: VelocityConfig,
    pub b2_per_mass: f64,
    pub p: f64,
    pub y0: f64,
    pub time_step: f64,
    #[serde(default = "default_gravity")]
    pub g: f64,
    #[serde(default = "default_angle_step")]
    pub angle_step: f64,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub density: DensityConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationConfig {
    #[default]
    Rederive,
    Matrix,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DensityConfig {
    #[default]
    Barometric,
    Uniform,
}

fn default_gravity() -> f64 {
    DEFAULT_GRAVITY_M_S2
}

fn default_angle_step() -> f64 {
    DEFAULT_ANGLE_STEP_DEG
}

/// Validated runtime inputs for one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchSetup {
    pub params: SimulationParams,
    pub density: DensityModel,
    pub search: SearchOptions,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported configuration format '{0}' (expected json, yaml, yml or toml)")]
    UnsupportedFormat(String),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Load and validate a launch configuration.
pub fn load_setup<P: AsRef<Path>>(path: P) -> Result<LaunchSetup, ConfigLoadError> {
    load_config(path)?.try_into()
}

/// Parse a configuration file without validating its values.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LaunchConfig, ConfigLoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(reader)?)
        }
        "yaml" | "yml" => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_yaml::from_reader(reader)?)
        }
        "toml" => {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        }
        other => Err(ConfigLoadError::UnsupportedFormat(other.to_string())),
    }
}

impl LaunchConfig {
    /// Check value ranges. Positive `g` and `time_step` guarantee the integrator reaches the ground.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let finite = [
            ("v0.x", self.v0.x),
            ("v0.y", self.v0.y),
            ("b2_per_mass", self.b2_per_mass),
            ("p", self.p),
            ("y0", self.y0),
            ("time_step", self.time_step),
            ("g", self.g),
            ("angle_step", self.angle_step),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigLoadError::Invalid {
                field,
                reason: "must be a finite number",
            });
        }

        let positive = [
            ("time_step", self.time_step),
            ("p", self.p),
            ("y0", self.y0),
            ("g", self.g),
            ("angle_step", self.angle_step),
        ];
        if let Some(&(field, _)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ConfigLoadError::Invalid {
                field,
                reason: "must be positive",
            });
        }
        // Output files are tagged with the whole-degree angle.
        if self.angle_step < 1.0 {
            return Err(ConfigLoadError::Invalid {
                field: "angle_step",
                reason: "must be at least 1 degree so every evaluated angle gets its own file",
            });
        }

        if self.b2_per_mass < 0.0 {
            return Err(ConfigLoadError::Invalid {
                field: "b2_per_mass",
                reason: "must not be negative",
            });
        }
        if self.v0.x <= 0.0 {
            return Err(ConfigLoadError::Invalid {
                field: "v0.x",
                reason: "launch vector must point forward (x > 0)",
            });
        }
        Ok(())
    }
}

impl From<RotationConfig> for RotationScheme {
    fn from(value: RotationConfig) -> Self {
        match value {
            RotationConfig::Rederive => RotationScheme::Rederive,
            RotationConfig::Matrix => RotationScheme::Matrix,
        }
    }
}

impl From<DensityConfig> for DensityModel {
    fn from(value: DensityConfig) -> Self {
        match value {
            DensityConfig::Barometric => DensityModel::Barometric,
            DensityConfig::Uniform => DensityModel::Uniform,
        }
    }
}

impl TryFrom<LaunchConfig> for LaunchSetup {
    type Error = ConfigLoadError;

    fn try_from(value: LaunchConfig) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(LaunchSetup {
            params: SimulationParams {
                g: value.g,
                p: value.p,
                y0: value.y0,
                b2_per_mass: value.b2_per_mass,
                time_step: value.time_step,
                v0: KinematicVector::new(value.v0.x, value.v0.y),
            },
            density: value.density.into(),
            search: SearchOptions {
                angle_step_deg: value.angle_step,
                rotation: value.rotation.into(),
            },
        })
    }
}
