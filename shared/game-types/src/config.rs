//! Game configuration
//!
//! Loaded from JSON. Every field has a default, so a partial file (or `{}`)
//! is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{camera, collectible, movement};

/// Whether a failed frustum test suppresses the terrain draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullMode {
    /// Skip the draw call when the terrain is outside the frustum
    #[default]
    Enforce,
    /// Compute the test and log it, but always draw
    Report,
}

/// Terrain settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grayscale heightmap image
    pub heightmap_path: String,
    /// Ground texture (optional)
    pub texture_path: Option<String>,
    /// World height of a white sample
    pub height_scale: f32,
    /// Terrain grid width in vertices
    pub world_width: u32,
    /// Terrain grid depth in vertices
    pub world_height: u32,
    /// Texture tiling across the terrain
    pub texture_repeat: f32,
    pub cull_mode: CullMode,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap_path: "images/height-map.png".to_string(),
            texture_path: Some("images/grass.png".to_string()),
            height_scale: 10.0,
            world_width: 256,
            world_height: 256,
            texture_repeat: 10.0,
            cull_mode: CullMode::Enforce,
        }
    }
}

/// Camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Orbit distance from the player
    pub distance: f32,
    /// Minimum height above terrain
    pub clearance: f32,
    pub mouse_sensitivity: f32,
    /// Free-look fly speed
    pub movement_speed: f32,
    /// Upper bound for scroll zoom (degrees)
    pub max_zoom: f32,
    /// Flip vertical mouse look
    pub invert_pitch: bool,
    /// Per-event mouse delta clamp
    pub max_mouse_delta: f32,
    /// Look-at raise per unit of vertical mouse delta
    pub dynamic_offset_scale: f32,
    pub max_dynamic_offset: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: camera::FOLLOW_DISTANCE,
            clearance: camera::CLEARANCE,
            mouse_sensitivity: camera::SENSITIVITY,
            movement_speed: camera::SPEED,
            max_zoom: camera::ZOOM,
            invert_pitch: false,
            max_mouse_delta: 50.0,
            dynamic_offset_scale: 0.05,
            max_dynamic_offset: 5.0,
            near: camera::NEAR,
            far: camera::FAR,
        }
    }
}

/// Round rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Seconds to collect everything
    pub countdown_secs: f32,
    /// Number of collectibles per round
    pub collectible_count: usize,
    pub pickup_radius: f32,
    /// Base player speed (units per second)
    pub player_speed: f32,
    pub boost_duration: f32,
    pub boost_multiplier: f32,
    pub spin_rate_degrees: f32,
    pub turn_smoothing: f32,
    /// Height of collectibles above the ground
    pub collectible_hover: f32,
    /// Re-randomize collectible positions on restart
    pub reshuffle_on_restart: bool,
    pub seed: u64,
    pub player_model: String,
    pub collectible_model: String,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 30.0,
            collectible_count: 5,
            pickup_radius: collectible::PICKUP_RANGE,
            player_speed: movement::PLAYER_SPEED,
            boost_duration: movement::BOOST_DURATION,
            boost_multiplier: movement::BOOST_MULTIPLIER,
            spin_rate_degrees: movement::SPIN_RATE_DEGREES,
            turn_smoothing: movement::TURN_SMOOTHING,
            collectible_hover: collectible::HOVER_HEIGHT,
            reshuffle_on_restart: false,
            seed: 12345,
            player_model: "models/cat/cat.obj".to_string(),
            collectible_model: "models/coin/coin.obj".to_string(),
        }
    }
}

/// A decoration scatter request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSpec {
    pub type_name: String,
    /// Model variants; one is picked at random per instance
    pub models: Vec<String>,
    pub count: usize,
    pub min_height: f32,
    pub max_height: f32,
    /// Minimum spacing, enforced only when `spaced` is set
    pub spread: f32,
    /// Uniform model scale
    pub scale: f32,
    pub spaced: bool,
}

impl Default for ScatterSpec {
    fn default() -> Self {
        Self {
            type_name: String::new(),
            models: Vec::new(),
            count: 0,
            min_height: 0.0,
            max_height: f32::MAX,
            spread: 0.0,
            scale: 1.0,
            spaced: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub terrain: TerrainConfig,
    pub camera: CameraConfig,
    pub gameplay: GameplayConfig,
    pub scatter: Vec<ScatterSpec>,
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.camera.distance > 0.0) {
            return Err(ConfigError::invalid("camera.distance must be positive"));
        }
        if !(self.camera.max_zoom >= 1.0 && self.camera.max_zoom.is_finite()) {
            return Err(ConfigError::invalid("camera.max_zoom must be at least 1"));
        }
        // Both are upper bounds of a clamp, which panics when the bound is
        // negative or NaN
        if !(self.camera.max_mouse_delta >= 0.0 && self.camera.max_mouse_delta.is_finite()) {
            return Err(ConfigError::invalid("camera.max_mouse_delta must be a finite value >= 0"));
        }
        if !(self.camera.max_dynamic_offset >= 0.0 && self.camera.max_dynamic_offset.is_finite()) {
            return Err(ConfigError::invalid("camera.max_dynamic_offset must be a finite value >= 0"));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(ConfigError::invalid("camera planes must satisfy 0 < near < far"));
        }
        if !(self.gameplay.countdown_secs > 0.0) {
            return Err(ConfigError::invalid("gameplay.countdown_secs must be positive"));
        }
        if !(0.0..=1.0).contains(&self.gameplay.turn_smoothing) {
            return Err(ConfigError::invalid("gameplay.turn_smoothing must be within [0, 1]"));
        }
        for spec in &self.scatter {
            if spec.type_name.is_empty() {
                return Err(ConfigError::invalid("scatter entries need a type_name"));
            }
            if spec.min_height > spec.max_height {
                log::warn!(
                    "scatter '{}': min_height {} exceeds max_height {}, nothing will be placed",
                    spec.type_name,
                    spec.min_height,
                    spec.max_height
                );
            }
        }
        Ok(())
    }
}
