//! Game Client Application
//!
//! A timed collect-everything round on heightmap terrain. The client owns
//! the session context ([`GameClient`]) and the per-frame logic: player
//! movement, the orbit camera, decoration scatter and the round state
//! machine. Windowing, GPU upload and audio are external and reached through
//! the [`renderer::DrawSink`], [`renderer::AssetLoader`] and
//! [`game_types::EventSink`] seams.

pub mod camera;
pub mod game_loop;
pub mod input;
pub mod player;
pub mod scatter;
pub mod state_machine;
pub mod terrain;

pub use camera::{CameraMode, CameraMovement, OrbitCamera};
pub use game_loop::GameClient;
pub use input::{InputIntent, InputQueue, Key, KeyState};
pub use player::Player;
pub use scatter::{ObjectScatter, ScatterInstance};
pub use state_machine::{GameStateMachine, Round};
pub use terrain::Terrain;
