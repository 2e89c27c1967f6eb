//! Game Loop
//!
//! The session context. Everything a frame touches lives here and is handed
//! to the tick explicitly; window callbacks only enqueue input.

use game_types::{CollectibleField, EventSink, GameConfig, GameState, HeightField, Outcome};
use log::{info, warn};
use renderer::{AssetLoader, DrawSink, MeshHandle};

use crate::camera::{CameraMode, CameraMovement, OrbitCamera};
use crate::input::{InputQueue, KeyState};
use crate::player::Player;
use crate::state_machine::{GameStateMachine, Round};
use crate::terrain::Terrain;

/// Game client instance
pub struct GameClient {
    config: GameConfig,
    terrain: Terrain,
    player: Player,
    camera: OrbitCamera,
    collectibles: CollectibleField,
    state: GameStateMachine,
    keys: KeyState,
    /// A zoom key moved the FOV and it has not recovered yet
    key_zoomed: bool,
    player_model: Option<MeshHandle>,
    collectible_model: Option<MeshHandle>,
    frame_count: u64,
}

impl GameClient {
    /// Build a session from configuration. The heightmap is read from disk;
    /// if that fails the terrain is flat and the game still runs.
    pub fn new(config: GameConfig, loader: &mut dyn AssetLoader) -> Self {
        let heights = HeightField::load_or_flat(&config.terrain.heightmap_path, config.terrain.height_scale);
        Self::from_heightfield(config, heights, loader)
    }

    /// Build a session around an already loaded heightfield
    pub fn from_heightfield(config: GameConfig, heights: HeightField, loader: &mut dyn AssetLoader) -> Self {
        let rules = &config.gameplay;
        let mut terrain = Terrain::new(heights, &config.terrain, loader, rules.seed);

        for spec in &config.scatter {
            terrain.decorate(spec, loader);
        }

        let mut collectibles = CollectibleField::new(rules.seed.wrapping_add(1));
        collectibles.spawn_random(
            rules.collectible_count,
            "coin",
            terrain.heights(),
            terrain.extent(),
            rules.collectible_hover,
        );

        let player_model = load_model(loader, &rules.player_model);
        let collectible_model = load_model(loader, &rules.collectible_model);

        let player = Player::new(terrain.spawn_point());
        let mut camera = OrbitCamera::new(&config.camera);
        camera.update_follow(player.position, terrain.heights());

        let state = GameStateMachine::new(rules.clone());

        Self {
            config,
            terrain,
            player,
            camera,
            collectibles,
            state,
            keys: KeyState::default(),
            key_zoomed: false,
            player_model,
            collectible_model,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn collectibles(&self) -> &CollectibleField {
        &self.collectibles
    }

    /// Get current game state
    pub fn game_state(&self) -> GameState {
        self.state.state()
    }

    /// Result of the last finished round
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Start the first round
    pub fn start(&mut self, events: &mut dyn EventSink) {
        self.restart(events);
    }

    fn restart(&mut self, events: &mut dyn EventSink) {
        let round = Round {
            player: &mut self.player,
            collectibles: &mut self.collectibles,
            terrain: &self.terrain,
        };
        self.state.restart(round, events);
        self.camera.update_follow(self.player.position, self.terrain.heights());
    }

    /// One frame: drain input, steer the camera, step the round, re-anchor
    /// the camera on the player and fire end-of-round effects once.
    pub fn tick(&mut self, dt: f32, input: &mut InputQueue, events: &mut dyn EventSink) {
        self.frame_count += 1;

        let (pointer, restart) = input.drain_into(&mut self.keys, self.config.camera.max_mouse_delta);
        if pointer.moved {
            self.camera.process_mouse_movement(pointer.dx, pointer.dy);
        }
        if pointer.scroll != 0.0 {
            self.camera.process_mouse_scroll(pointer.scroll);
        }
        // Key zoom springs back once released; scroll zoom stays put
        if self.keys.zoom_in {
            self.camera.zoom_in();
            self.key_zoomed = true;
        } else if self.keys.zoom_out {
            self.camera.zoom_out();
            self.key_zoomed = true;
        } else if self.key_zoomed {
            self.key_zoomed = self.camera.zoom_recover();
        }

        // Restart only between rounds (or before the first one)
        if restart && !self.state.state().is_playing() {
            self.restart(events);
        }

        match self.camera.mode {
            CameraMode::OrbitFollow => {
                let round = Round {
                    player: &mut self.player,
                    collectibles: &mut self.collectibles,
                    terrain: &self.terrain,
                };
                self.state.update(dt, &self.keys, &self.camera, round, events);
                self.camera.update_follow(self.player.position, self.terrain.heights());
            }
            CameraMode::FreeLook => self.fly_camera(dt),
        }

        if let Some(outcome) = self.state.acknowledge_end(&mut self.player, events) {
            info!("Round over: {:?}", outcome);
        }
    }

    fn fly_camera(&mut self, dt: f32) {
        let keys = self.keys;
        let moves = [
            (keys.forward, CameraMovement::Forward),
            (keys.backward, CameraMovement::Backward),
            (keys.left, CameraMovement::Left),
            (keys.right, CameraMovement::Right),
            (keys.up, CameraMovement::Up),
            (keys.down, CameraMovement::Down),
        ];
        for (held, direction) in moves {
            if held {
                self.camera.process_keyboard(direction, dt);
            }
        }
    }

    /// Draw the frame. Returns whether the terrain passed culling.
    pub fn render(&self, sink: &mut dyn DrawSink, aspect: f32) -> bool {
        let view_projection = self.camera.view_projection(aspect);
        let visible = self.terrain.render(&view_projection, sink);

        if let Some(mesh) = self.collectible_model {
            render_collectibles(&self.collectibles, sink, mesh);
        }
        if let Some(mesh) = self.player_model {
            sink.draw_model(mesh, self.player.transform());
        }
        visible
    }

    /// Collected and total pickups
    pub fn score(&self) -> (usize, usize) {
        (self.collectibles.collected_count(), self.collectibles.total_count())
    }

    pub fn time_remaining(&self) -> f32 {
        self.state.countdown()
    }

    /// Countdown as "Xm Ys"
    pub fn timer_display(&self) -> String {
        format_timer(self.time_remaining())
    }
}

fn load_model(loader: &mut dyn AssetLoader, path: &str) -> Option<MeshHandle> {
    match loader.load_model(path) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Model unavailable, it will not be drawn: {}", e);
            None
        }
    }
}

/// Draw every pickup still in play
pub fn render_collectibles(collectibles: &CollectibleField, sink: &mut dyn DrawSink, mesh: MeshHandle) {
    for item in collectibles.uncollected() {
        sink.draw_model(mesh, item.transform());
    }
}

/// Whole minutes and seconds; partial seconds are dropped
pub fn format_timer(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{}m {}s", total / 60, total % 60)
}
