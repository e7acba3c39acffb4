//! Configuration types: the start-up [`Settings`] and the sparse per-frame
//! [`ConfigDelta`].
//!
//! Both deserialize from YAML. Every `Settings` field has a default, so an
//! empty document is a valid configuration:
//!
//! ```yaml
//! width: 800              # box width, canvas pixels
//! height: 800
//! particle_count: 200
//! radius: 5.0
//! mass: 2.656e-26         # 16 u
//! temperature: 100.0      # kelvin
//! color: "#73c875"
//! simulation_speed: 0.01  # timestep multiplier
//! growth: exact           # or "inclusive"
//! seed: 42                # omit for a random seed
//! ```
//!
//! A delta only carries the fields that changed. The UI's camelCase names are
//! accepted too:
//!
//! ```yaml
//! canvasWidth: 640
//! canvasHeight: 480
//! temperature: 300.0
//! isPaused: true
//! ```

use crate::core::color::ColorRgb;
use crate::core::particle::ParticleSpec;
use crate::core::sim::GrowthPolicy;
use crate::core::thermo::ATOMIC_MASS_UNIT;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Smallest accepted canvas dimension for a resize.
pub const CANVAS_MIN: u32 = 200;
/// Largest accepted canvas dimension for a resize.
pub const CANVAS_MAX: u32 = 1000;
pub const PARTICLE_COUNT_MIN: usize = 1;
pub const PARTICLE_COUNT_MAX: usize = 1000;

/// Initial state of a simulation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub particle_count: usize,
    pub radius: f64,
    pub mass: f64,
    pub temperature: f64,
    pub color: String,
    pub simulation_speed: f64,
    pub growth: GrowthPolicy,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            particle_count: 200,
            radius: 5.0,
            mass: 16.0 * ATOMIC_MASS_UNIT,
            temperature: 100.0,
            color: "#73c875".to_string(),
            simulation_speed: 0.01,
            growth: GrowthPolicy::Exact,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Ambient particle attributes described by these settings.
    ///
    /// Errors:
    /// - `Error::InvalidColor` if `color` is not a hex color.
    pub fn ambient(&self) -> Result<ParticleSpec> {
        Ok(ParticleSpec {
            radius: self.radius,
            mass: self.mass,
            temperature: self.temperature,
            color: ColorRgb::from_hex(&self.color)?,
        })
    }
}

/// Sparse configuration change; only `Some` fields trigger an update.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigDelta {
    #[serde(alias = "canvasWidth")]
    pub canvas_width: Option<u32>,
    #[serde(alias = "canvasHeight")]
    pub canvas_height: Option<u32>,
    #[serde(alias = "particleCount", alias = "particles")]
    pub particle_count: Option<usize>,
    pub mass: Option<f64>,
    pub temperature: Option<f64>,
    #[serde(alias = "colorHex")]
    pub color: Option<String>,
    #[serde(alias = "simulationSpeed")]
    pub simulation_speed: Option<f64>,
    #[serde(alias = "isPaused")]
    pub is_paused: Option<bool>,
}

impl ConfigDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_bounds(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = Some(width);
        self.canvas_height = Some(height);
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = Some(count);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    pub fn with_simulation_speed(mut self, speed: f64) -> Self {
        self.simulation_speed = Some(speed);
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.is_paused = Some(paused);
        self
    }
}
