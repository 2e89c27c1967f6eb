//! Collectibles - pickups, idle animation, and round tracking

use glam::{Mat4, Vec3};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::heightfield::HeightField;

/// Default pickup range
pub const PICKUP_RANGE: f32 = 2.0;

/// Spin speed (radians per second)
pub const SPIN_SPEED: f32 = 1.5;

/// Bob cycle speed (radians per second)
pub const BOB_SPEED: f32 = 2.0;

/// Bob amplitude (world units)
pub const BOB_AMPLITUDE: f32 = 0.25;

/// Default hover height above the terrain
pub const HOVER_HEIGHT: f32 = 1.0;

/// A single pickup
#[derive(Debug, Clone)]
pub struct Collectible {
    /// Type of collectible (e.g. "coin", "gem")
    pub kind: String,
    /// Spawn point
    pub base_position: Vec3,
    /// Animated position (base + bob)
    pub current_position: Vec3,
    /// Rotation around Y (radians)
    pub rotation: f32,
    /// Bob cycle position (radians)
    pub bob_phase: f32,
    collected: bool,
}

impl Collectible {
    pub fn new(position: Vec3, kind: &str, bob_phase: f32) -> Self {
        let mut collectible = Self {
            kind: kind.to_string(),
            base_position: position,
            current_position: position,
            rotation: 0.0,
            bob_phase,
            collected: false,
        };
        collectible.apply_bob();
        collectible
    }

    /// Advance the idle animation (spin + bob)
    pub fn update(&mut self, dt: f32) {
        self.rotation += dt * SPIN_SPEED;
        if self.rotation > core::f32::consts::TAU {
            self.rotation -= core::f32::consts::TAU;
        }

        self.bob_phase += dt * BOB_SPEED;
        if self.bob_phase > core::f32::consts::TAU {
            self.bob_phase -= core::f32::consts::TAU;
        }

        self.apply_bob();
    }

    /// Whether the player is close enough to pick this up
    pub fn check_collision(&self, player_position: Vec3, radius: f32) -> bool {
        !self.collected && (player_position - self.base_position).length() < radius
    }

    pub fn collect(&mut self) {
        trace!("Collected {} at {:?}", self.kind, self.base_position);
        self.collected = true;
    }

    pub fn uncollect(&mut self) {
        self.collected = false;
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Move the spawn point (used when a round reshuffles pickups)
    pub fn relocate(&mut self, position: Vec3) {
        self.base_position = position;
        self.apply_bob();
    }

    /// Model transform for rendering
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.current_position) * Mat4::from_rotation_y(self.rotation)
    }

    fn apply_bob(&mut self) {
        self.current_position = self.base_position + Vec3::Y * libm::sinf(self.bob_phase) * BOB_AMPLITUDE;
    }
}

/// All pickups for the current round
#[derive(Debug)]
pub struct CollectibleField {
    items: Vec<Collectible>,
    rng: StdRng,
}

impl Default for CollectibleField {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl CollectibleField {
    pub fn new(seed: u64) -> Self {
        Self {
            items: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Add a collectible at an explicit position with a random bob phase
    pub fn add(&mut self, position: Vec3, kind: &str) {
        let phase = self.rng.gen_range(0.0..core::f32::consts::TAU);
        self.items.push(Collectible::new(position, kind, phase));
    }

    /// Spawn `count` collectibles at random positions hovering above the terrain
    pub fn spawn_random(&mut self, count: usize, kind: &str, terrain: &HeightField, extent: (u32, u32), hover: f32) {
        for _ in 0..count {
            let position = self.random_position(terrain, extent, hover);
            self.add(position, kind);
        }
        debug!("Spawned {} {} collectibles ({} total)", count, kind, self.items.len());
    }

    /// Advance every idle animation
    pub fn update(&mut self, dt: f32) {
        for item in &mut self.items {
            item.update(dt);
        }
    }

    /// Collect everything within `radius` of the player. Returns how many were picked up.
    pub fn check_all_collisions(&mut self, player_position: Vec3, radius: f32) -> usize {
        let mut picked = 0;
        for item in &mut self.items {
            if item.check_collision(player_position, radius) {
                item.collect();
                picked += 1;
            }
        }
        picked
    }

    pub fn collected_count(&self) -> usize {
        self.items.iter().filter(|c| c.is_collected()).count()
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn all_collected(&self) -> bool {
        self.collected_count() == self.total_count()
    }

    /// Reset every pickup for a new round; positions are kept
    pub fn uncollect_all(&mut self) {
        for item in &mut self.items {
            item.uncollect();
        }
    }

    /// Move every pickup to a fresh random position
    pub fn reshuffle(&mut self, terrain: &HeightField, extent: (u32, u32), hover: f32) {
        for i in 0..self.items.len() {
            let position = self.random_position(terrain, extent, hover);
            self.items[i].relocate(position);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collectible> {
        self.items.iter()
    }

    pub fn uncollected(&self) -> impl Iterator<Item = &Collectible> {
        self.items.iter().filter(|c| !c.is_collected())
    }

    pub fn get(&self, index: usize) -> Option<&Collectible> {
        self.items.get(index)
    }

    /// Remove every collectible
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("All collectibles cleared");
    }

    fn random_position(&mut self, terrain: &HeightField, extent: (u32, u32), hover: f32) -> Vec3 {
        let (width, height) = extent;
        let x = if width > 1 { self.rng.gen_range(0.0..(width - 1) as f32) } else { 0.0 };
        let z = if height > 1 { self.rng.gen_range(0.0..(height - 1) as f32) } else { 0.0 };
        Vec3::new(x, terrain.height_at(x, z) + hover, z)
    }
}
