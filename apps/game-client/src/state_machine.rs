//! Round State Machine
//!
//! Runs one timed round: move the player, animate and collect pickups,
//! count the timer down, and decide the outcome.

use game_types::{CollectibleField, EventSink, GameEvent, GameState, GameplayConfig, Outcome};
use log::debug;

use crate::camera::OrbitCamera;
use crate::input::KeyState;
use crate::player::Player;
use crate::terrain::Terrain;

/// Mutable world state a round step touches
pub struct Round<'a> {
    pub player: &'a mut Player,
    pub collectibles: &'a mut CollectibleField,
    pub terrain: &'a Terrain,
}

#[derive(Debug, Clone)]
pub struct GameStateMachine {
    state: GameState,
    countdown: f32,
    rules: GameplayConfig,
    outcome: Option<Outcome>,
}

impl GameStateMachine {
    pub fn new(rules: GameplayConfig) -> Self {
        Self {
            state: GameState::Initializing,
            countdown: rules.countdown_secs,
            rules,
            outcome: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Seconds left in the round (never negative)
    pub fn countdown(&self) -> f32 {
        self.countdown.max(0.0)
    }

    pub fn rules(&self) -> &GameplayConfig {
        &self.rules
    }

    /// Result of the last finished round
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn transition(&mut self, next: GameState) {
        // Only a restart may move backwards
        debug_assert!(
            next == GameState::Initializing || next.rank() >= self.state.rank(),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!("Game state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Advance one tick. Does nothing unless a round is being played.
    pub fn update(&mut self, dt: f32, keys: &KeyState, camera: &OrbitCamera, round: Round<'_>, events: &mut dyn EventSink) {
        if !self.state.is_playing() {
            return;
        }
        let Round {
            player,
            collectibles,
            terrain,
        } = round;

        // Movement relative to the camera, faster while boosted
        let direction = Player::move_direction(keys, camera.front(), camera.right());
        let moving = direction != glam::Vec3::ZERO;
        if moving {
            let modifier = if player.is_boosting() { self.rules.boost_multiplier } else { 1.0 };
            let distance = self.rules.player_speed * modifier * dt;
            player.step(direction, distance, terrain.heights(), terrain.extent());
            if !player.is_boosting() {
                player.turn_toward(direction, self.rules.turn_smoothing);
            }
        }
        if player.set_moving(moving) {
            events.notify(if moving { GameEvent::FootstepStart } else { GameEvent::FootstepStop });
        }

        collectibles.update(dt);

        self.countdown -= dt;

        let picked = collectibles.check_all_collisions(player.position, self.rules.pickup_radius);
        for _ in 0..picked {
            events.notify(GameEvent::Collect);
        }

        if picked > 0 && player.start_boost(self.rules.boost_duration) {
            debug!("Boost started ({}s)", self.rules.boost_duration);
        }
        if player.is_boosting() {
            player.spin(self.rules.spin_rate_degrees, dt);
            if player.tick_boost(dt) {
                debug!("Boost ended");
            }
        }

        if collectibles.all_collected() {
            self.transition(GameState::Won);
        } else if self.countdown <= 0.0 {
            self.transition(GameState::Lost);
        }
    }

    /// Fire the end-of-round notification once, then park in `AudioPlayed`.
    /// Returns the outcome on the tick it is acknowledged.
    pub fn acknowledge_end(&mut self, player: &mut Player, events: &mut dyn EventSink) -> Option<Outcome> {
        let outcome = self.state.outcome()?;

        if player.set_moving(false) {
            events.notify(GameEvent::FootstepStop);
        }
        events.notify(match outcome {
            Outcome::Won => GameEvent::Win,
            Outcome::Lost => GameEvent::Lose,
        });

        self.outcome = Some(outcome);
        self.transition(GameState::AudioPlayed);
        Some(outcome)
    }

    /// Start a fresh round: timer full, pickups back, player at the spawn
    pub fn restart(&mut self, round: Round<'_>, events: &mut dyn EventSink) {
        let Round {
            player,
            collectibles,
            terrain,
        } = round;

        self.transition(GameState::Initializing);
        self.countdown = self.rules.countdown_secs;

        collectibles.uncollect_all();
        if self.rules.reshuffle_on_restart {
            collectibles.reshuffle(terrain.heights(), terrain.extent(), self.rules.collectible_hover);
        }
        player.reset(terrain.spawn_point());

        events.notify(GameEvent::Restart);
        self.transition(GameState::Playing);
    }
}
