//! Terrain facade
//!
//! Owns everything static about the level: the heightfield, the grid mesh
//! built from it, the decoration scatter and the ground texture.

use game_types::{CullMode, HeightField, ScatterSpec, TerrainConfig};
use glam::{Mat4, Vec3};
use log::{debug, info, warn};
use renderer::{AssetLoader, DrawSink, Frustum, TerrainMesh, TextureHandle};

use crate::scatter::ObjectScatter;

pub struct Terrain {
    heights: HeightField,
    mesh: TerrainMesh,
    pub scatter: ObjectScatter,
    texture: Option<TextureHandle>,
    cull_mode: CullMode,
}

impl Terrain {
    /// Build the level terrain around an already loaded heightfield.
    /// A missing texture leaves the terrain untextured.
    pub fn new(heights: HeightField, config: &TerrainConfig, loader: &mut dyn AssetLoader, seed: u64) -> Self {
        let mesh = TerrainMesh::generate(&heights, config.world_width, config.world_height, config.texture_repeat);

        let texture = config.texture_path.as_deref().and_then(|path| match loader.load_texture(path) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Terrain texture unavailable: {}", e);
                None
            }
        });

        Self {
            heights,
            mesh,
            scatter: ObjectScatter::new(config.world_width, config.world_height, seed),
            texture,
            cull_mode: config.cull_mode,
        }
    }

    pub fn heights(&self) -> &HeightField {
        &self.heights
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    /// World grid size (x, z)
    pub fn extent(&self) -> (u32, u32) {
        (self.mesh.world_width(), self.mesh.world_height())
    }

    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.heights.height_at(x, z)
    }

    /// The canonical spawn point: grid center, on the ground
    pub fn spawn_point(&self) -> Vec3 {
        let (w, h) = self.extent();
        let x = w as f32 / 2.0;
        let z = h as f32 / 2.0;
        Vec3::new(x, self.height_at(x, z), z)
    }

    /// Register the models of a scatter request and place its decorations.
    /// Returns the number placed.
    pub fn decorate(&mut self, spec: &ScatterSpec, loader: &mut dyn AssetLoader) -> usize {
        for path in &spec.models {
            self.scatter.register_prototype(loader, &spec.type_name, path);
        }
        self.scatter.set_scale(&spec.type_name, spec.scale);

        let placed = if spec.spaced {
            self.scatter.scatter_spaced(
                &self.heights,
                spec.count,
                &spec.type_name,
                spec.min_height,
                spec.max_height,
                spec.spread,
            )
        } else {
            self.scatter.scatter(
                &self.heights,
                spec.count,
                &spec.type_name,
                spec.min_height,
                spec.max_height,
                spec.spread,
            )
        };
        info!("Placed {}/{} '{}' decorations", placed, spec.count, spec.type_name);
        placed
    }

    /// Whether the terrain bounds touch the view frustum
    pub fn is_visible(&self, view_projection: &Mat4) -> bool {
        Frustum::from_view_projection(view_projection).is_box_visible(&self.mesh.bounds())
    }

    /// Draw the ground and its decoration. Returns whether the ground passed
    /// the frustum test; under [`CullMode::Report`] it is drawn either way.
    pub fn render(&self, view_projection: &Mat4, sink: &mut dyn DrawSink) -> bool {
        let visible = self.is_visible(view_projection);
        if !visible {
            debug!("Terrain outside view frustum");
        }

        let draw_ground = visible || self.cull_mode == CullMode::Report;
        if draw_ground && !self.mesh.is_empty() {
            sink.draw_terrain(self.mesh.mesh(), self.texture, Mat4::IDENTITY);
        }

        self.scatter.render_all(sink);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::{DrawLog, HandleAllocator};

    fn config(cull_mode: CullMode) -> TerrainConfig {
        TerrainConfig {
            world_width: 8,
            world_height: 8,
            cull_mode,
            ..TerrainConfig::default()
        }
    }

    fn terrain(cull_mode: CullMode) -> Terrain {
        let heights = HeightField::from_luma8(4, 4, &[128; 16], 10.0).unwrap();
        Terrain::new(heights, &config(cull_mode), &mut HandleAllocator::new(), 1)
    }

    fn looking_at_terrain() -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(4.0, 20.0, 20.0), Vec3::new(4.0, 5.0, 4.0), Vec3::Y);
        Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0) * view
    }

    fn looking_away() -> Mat4 {
        let view = Mat4::look_at_rh(Vec3::new(4.0, 20.0, 20.0), Vec3::new(4.0, 20.0, 40.0), Vec3::Y);
        Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0) * view
    }

    #[test]
    fn visible_terrain_is_drawn_textured() {
        let t = terrain(CullMode::Enforce);
        let mut log = DrawLog::new();
        assert!(t.render(&looking_at_terrain(), &mut log));
        assert_eq!(log.terrain_draws(), 1);
        assert!(matches!(
            log.calls[0],
            renderer::DrawCall::Terrain { texture: Some(_), triangles: 98, .. }
        ));
    }

    #[test]
    fn culled_terrain_skips_draw_when_enforced() {
        let t = terrain(CullMode::Enforce);
        let mut log = DrawLog::new();
        assert!(!t.render(&looking_away(), &mut log));
        assert_eq!(log.terrain_draws(), 0);
    }

    #[test]
    fn report_mode_always_draws() {
        let t = terrain(CullMode::Report);
        let mut log = DrawLog::new();
        assert!(!t.render(&looking_away(), &mut log));
        assert_eq!(log.terrain_draws(), 1);
    }

    #[test]
    fn missing_texture_is_tolerated() {
        let mut loader = HandleAllocator::new();
        loader.mark_missing("images/grass.png");
        let heights = HeightField::from_luma8(4, 4, &[128; 16], 10.0).unwrap();
        let t = Terrain::new(heights, &config(CullMode::Enforce), &mut loader, 1);
        assert!(t.texture().is_none());
        let mut log = DrawLog::new();
        t.render(&looking_at_terrain(), &mut log);
        assert_eq!(log.terrain_draws(), 1);
    }

    #[test]
    fn decorate_from_spec() {
        let mut t = terrain(CullMode::Enforce);
        let mut loader = HandleAllocator::new();
        loader.mark_missing("rock2.obj");
        let spec = ScatterSpec {
            type_name: "rock".to_string(),
            models: vec!["rock1.obj".to_string(), "rock2.obj".to_string()],
            count: 12,
            min_height: 0.0,
            max_height: 100.0,
            ..ScatterSpec::default()
        };
        assert_eq!(t.decorate(&spec, &mut loader), 12);
        assert_eq!(t.scatter.prototype_count("rock"), 1);

        let mut log = DrawLog::new();
        t.render(&looking_at_terrain(), &mut log);
        assert_eq!(log.model_draws(renderer::MeshHandle(0)), 12);
    }

    #[test]
    fn spawn_is_grid_center_on_ground() {
        let t = terrain(CullMode::Enforce);
        let spawn = t.spawn_point();
        assert_eq!((spawn.x, spawn.z), (4.0, 4.0));
        assert_eq!(spawn.y, t.height_at(4.0, 4.0));
        assert_eq!(t.extent(), (8, 8));
    }
}
