//! Terrain mesh generation
//!
//! Builds a regular grid mesh whose vertex heights come from a heightfield.
//! One vertex per world-grid coordinate, two triangles per cell.

use game_types::HeightField;
use glam::{Vec2, Vec3};
use log::{debug, warn};

use crate::culling::Aabb;
use crate::mesh::Mesh;
use crate::vertex::Vertex;

/// Margin added to every face of the terrain bounds
pub const BOUNDS_TOLERANCE: f32 = 1.0;

/// Static terrain grid
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    world_width: u32,
    world_height: u32,
    texture_repeat: f32,
    mesh: Mesh,
    bounds: Aabb,
}

impl TerrainMesh {
    /// Generate a `world_width` x `world_height` grid sampled from `heights`.
    ///
    /// Vertices are emitted row-major at `(x, height_at(x, z), z)` with UVs
    /// tiled `texture_repeat` times across the grid. A grid smaller than 2x2
    /// has no cells and yields an empty mesh with zero bounds.
    pub fn generate(heights: &HeightField, world_width: u32, world_height: u32, texture_repeat: f32) -> Self {
        if world_width < 2 || world_height < 2 {
            warn!(
                "Terrain grid {}x{} has no cells, generating empty mesh",
                world_width, world_height
            );
            return Self {
                world_width,
                world_height,
                texture_repeat,
                mesh: Mesh::new(),
                bounds: Aabb::new(Vec3::ZERO, Vec3::ZERO),
            };
        }

        let w = world_width as usize;
        let h = world_height as usize;
        let mut mesh = Mesh::with_capacity(w * h, 6 * (w - 1) * (h - 1));
        let mut bounds = Aabb::empty();

        let u_step = texture_repeat / (w - 1) as f32;
        let v_step = texture_repeat / (h - 1) as f32;

        for z in 0..h {
            for x in 0..w {
                let fx = x as f32;
                let fz = z as f32;
                let position = Vec3::new(fx, heights.height_at(fx, fz), fz);
                bounds.include(position);
                mesh.vertices
                    .push(Vertex::pos_uv(position, Vec2::new(fx * u_step, fz * v_step)));
            }
        }

        for z in 0..h - 1 {
            for x in 0..w - 1 {
                let tl = (z * w + x) as u32;
                let bl = tl + w as u32;

                mesh.indices.extend([tl, bl, tl + 1]);
                mesh.indices.extend([bl, bl + 1, tl + 1]);
            }
        }

        mesh.recalculate_normals();
        let bounds = bounds.padded(BOUNDS_TOLERANCE);

        debug!(
            "Terrain mesh {}x{}: {} vertices, {} triangles, bounds {:?}..{:?}",
            world_width,
            world_height,
            mesh.vertices.len(),
            mesh.triangle_count(),
            bounds.min,
            bounds.max
        );

        Self {
            world_width,
            world_height,
            texture_repeat,
            mesh,
            bounds,
        }
    }

    pub fn world_width(&self) -> u32 {
        self.world_width
    }

    pub fn world_height(&self) -> u32 {
        self.world_height
    }

    pub fn texture_repeat(&self) -> f32 {
        self.texture_repeat
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Bounding box including the tolerance margin
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.mesh.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}
