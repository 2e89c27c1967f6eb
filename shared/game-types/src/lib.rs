//! Game Types
//!
//! Pure data types and game logic shared between the renderer and the client:
//! the heightfield every height query goes through, collectibles, round state,
//! gameplay events and configuration.

pub mod collectible;
pub mod config;
pub mod error;
pub mod events;
pub mod heightfield;
pub mod state;

pub use collectible::{Collectible, CollectibleField};
pub use config::{CameraConfig, CullMode, GameConfig, GameplayConfig, ScatterSpec, TerrainConfig};
pub use error::{AssetError, ConfigError};
pub use events::{EventLog, EventSink, GameEvent};
pub use heightfield::HeightField;
pub use state::{GameState, Outcome};

/// Movement constants
pub mod movement {
    /// Base player speed (units per second)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Speed multiplier while a boost is running
    pub const BOOST_MULTIPLIER: f32 = 3.0;
    /// Boost duration in seconds
    pub const BOOST_DURATION: f32 = 6.0;
    /// Boost spin rate (degrees per second)
    pub const SPIN_RATE_DEGREES: f32 = 720.0;
    /// Fraction of the remaining turn applied each frame
    pub const TURN_SMOOTHING: f32 = 0.1;
    /// Offset between movement heading and the model's forward axis (degrees)
    pub const MODEL_YAW_OFFSET_DEGREES: f32 = -90.0;
}

/// Camera constants
pub mod camera {
    pub const YAW: f32 = 0.0;
    pub const PITCH: f32 = 0.0;
    pub const SPEED: f32 = 20.0;
    pub const SENSITIVITY: f32 = 0.1;
    /// Default zoom (vertical FOV in degrees), also the scroll upper bound
    pub const ZOOM: f32 = 80.0;
    pub const ZOOM_RANGE: f32 = 20.0;
    pub const ZOOM_SPEED: f32 = 2.0;
    pub const PITCH_LIMIT: f32 = 89.0;
    pub const FOLLOW_DISTANCE: f32 = 10.0;
    /// Minimum height of the camera above the terrain in orbit-follow mode
    pub const CLEARANCE: f32 = 2.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 100.0;
}
