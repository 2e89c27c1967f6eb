//! Vertex format definition

use glam::{Vec2, Vec3};

/// A terrain vertex with position, normal, and UV coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    /// Create a vertex with an up-facing normal
    pub const fn pos_uv(position: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal: Vec3::Y,
            uv,
        }
    }
}
