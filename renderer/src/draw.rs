//! Render boundary
//!
//! The GPU renderer and asset loader live outside this workspace. The game
//! hands them opaque handles and model transforms through these traits.

use std::collections::HashSet;

use game_types::AssetError;
use glam::Mat4;

use crate::mesh::Mesh;

/// Opaque handle to an uploaded model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque handle to an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Resolves asset paths to drawable handles
pub trait AssetLoader {
    fn load_model(&mut self, path: &str) -> Result<MeshHandle, AssetError>;
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError>;
}

/// Receives draw calls for one frame
pub trait DrawSink {
    /// Draw the terrain geometry with an optional ground texture
    fn draw_terrain(&mut self, mesh: &Mesh, texture: Option<TextureHandle>, model: Mat4);
    /// Draw a loaded model
    fn draw_model(&mut self, mesh: MeshHandle, model: Mat4);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Terrain {
        triangles: usize,
        texture: Option<TextureHandle>,
        model: Mat4,
    },
    Model {
        mesh: MeshHandle,
        model: Mat4,
    },
}

/// Sink that records draw calls instead of issuing them (headless runs)
#[derive(Debug, Default, Clone)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn terrain_draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Terrain { .. }))
            .count()
    }

    /// Draws of a specific model
    pub fn model_draws(&self, mesh: MeshHandle) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Model { mesh: m, .. } if *m == mesh))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawSink for DrawLog {
    fn draw_terrain(&mut self, mesh: &Mesh, texture: Option<TextureHandle>, model: Mat4) {
        self.calls.push(DrawCall::Terrain {
            triangles: mesh.triangle_count(),
            texture,
            model,
        });
    }

    fn draw_model(&mut self, mesh: MeshHandle, model: Mat4) {
        self.calls.push(DrawCall::Model { mesh, model });
    }
}

/// Loader that hands out sequential handles without touching the disk.
/// Paths marked missing fail with [`AssetError::Missing`].
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u32,
    missing: HashSet<String>,
    loaded: Vec<String>,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later load of `path` fail
    pub fn mark_missing(&mut self, path: &str) {
        self.missing.insert(path.to_string());
    }

    /// Paths loaded successfully, in order; handle `n` is `loaded()[n]`
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    fn allocate(&mut self, path: &str) -> Result<u32, AssetError> {
        if self.missing.contains(path) {
            return Err(AssetError::missing(path));
        }
        let id = self.next;
        self.next += 1;
        self.loaded.push(path.to_string());
        Ok(id)
    }
}

impl AssetLoader for HandleAllocator {
    fn load_model(&mut self, path: &str) -> Result<MeshHandle, AssetError> {
        self.allocate(path).map(MeshHandle)
    }

    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError> {
        self.allocate(path).map(TextureHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_hands_out_sequential_handles() {
        let mut loader = HandleAllocator::new();
        loader.mark_missing("gone.obj");
        assert_eq!(loader.load_model("a.obj").unwrap(), MeshHandle(0));
        assert_eq!(loader.load_texture("b.png").unwrap(), TextureHandle(1));
        assert!(matches!(loader.load_model("gone.obj"), Err(AssetError::Missing { .. })));
        assert_eq!(loader.loaded(), &["a.obj".to_string(), "b.png".to_string()]);
    }

    #[test]
    fn log_counts_draws() {
        let mut log = DrawLog::new();
        log.draw_terrain(&Mesh::new(), None, Mat4::IDENTITY);
        log.draw_model(MeshHandle(3), Mat4::IDENTITY);
        log.draw_model(MeshHandle(3), Mat4::IDENTITY);
        assert_eq!(log.terrain_draws(), 1);
        assert_eq!(log.model_draws(MeshHandle(3)), 2);
        assert_eq!(log.model_draws(MeshHandle(4)), 0);
    }
}
