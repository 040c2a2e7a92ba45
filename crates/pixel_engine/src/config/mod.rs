//! Configuration system
//!
//! Serializable settings for the simulation and for mover presets, loadable
//! from TOML or RON files.

pub use serde::{Serialize, Deserialize};

use crate::physics::Mask;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            Self::from_toml_str(&contents)
        } else if path.ends_with(".ron") {
            Self::from_ron_str(&contents)
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Parse configuration from TOML text
    fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from RON text
    fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Fixed-step simulation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation steps per second
    pub tick_rate: u32,
    /// Upper bound on steps run for a single rendered frame
    pub max_steps_per_frame: u32,
}

impl SimulationConfig {
    /// Length of one simulation step in seconds
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_steps_per_frame: 5,
        }
    }
}

impl Config for SimulationConfig {}

/// Preset for building a [`crate::ecs::components::Mover`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    /// Vertical acceleration in pixels per second squared
    pub gravity: f32,
    /// Horizontal deceleration while grounded, pixels per second squared
    pub friction: f32,
    /// Masks the mover's collider is tested against
    pub collides_with: Vec<Mask>,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            friction: 0.0,
            collides_with: vec![Mask::Solid],
        }
    }
}

impl Config for MoverConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mover_config_from_toml() {
        let config = MoverConfig::from_toml_str(
            r#"
            gravity = -500.0
            friction = 200.0
            collides_with = ["solid", "npc"]
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.gravity, -500.0);
        assert_eq!(config.friction, 200.0);
        assert_eq!(config.collides_with, vec![Mask::Solid, Mask::Npc]);
    }

    #[test]
    fn test_mover_config_from_ron_uses_defaults() {
        let config = MoverConfig::from_ron_str("(gravity: -10.0)").expect("valid ron");

        assert_eq!(config.gravity, -10.0);
        assert_eq!(config.friction, 0.0);
        assert_eq!(config.collides_with, vec![Mask::Solid]);
    }

    #[test]
    fn test_simulation_config_defaults() {
        let config = SimulationConfig::from_toml_str("tick_rate = 30").expect("valid toml");
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.max_steps_per_frame, 5);
        assert!((config.fixed_dt() - 1.0 / 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_mask_is_a_parse_error() {
        let result = MoverConfig::from_toml_str(r#"collides_with = ["lava"]"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SimulationConfig::default().save_to_file("settings.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
