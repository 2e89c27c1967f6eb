//! Decoration scatter
//!
//! Places static decoration (trees, rocks, ...) at random spots on the
//! terrain, restricted to a height band. Each type can register several
//! model variants; every instance picks one at random.

use std::collections::HashMap;

use game_types::HeightField;
use glam::{Mat4, Vec2, Vec3};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use renderer::{AssetLoader, DrawSink, MeshHandle};

/// Candidates tried per requested instance when spacing is enforced
const SPACED_ATTEMPTS_PER_OBJECT: usize = 30;

/// Candidates drawn by a spaced scatter of `count` objects
fn candidate_budget(count: usize) -> usize {
    count.saturating_mul(SPACED_ATTEMPTS_PER_OBJECT)
}

/// A placed decoration
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterInstance {
    pub type_name: String,
    /// World position, y snapped to the terrain at placement
    pub position: Vec3,
    /// Variant index into the type's prototypes
    pub prototype_index: usize,
}

#[derive(Debug)]
struct Prototypes {
    meshes: Vec<MeshHandle>,
    scale: f32,
}

/// Decoration registry and placed instances
#[derive(Debug)]
pub struct ObjectScatter {
    width: u32,
    height: u32,
    prototypes: HashMap<String, Prototypes>,
    instances: Vec<ScatterInstance>,
    rng: StdRng,
}

impl ObjectScatter {
    /// Scatter over a `width` x `height` footprint
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            prototypes: HashMap::new(),
            instances: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Load a model variant for `type_name`. A failed load is logged and
    /// skipped; returns whether the variant was added.
    pub fn register_prototype(&mut self, loader: &mut dyn AssetLoader, type_name: &str, path: &str) -> bool {
        match loader.load_model(path) {
            Ok(mesh) => {
                self.register_mesh(type_name, mesh);
                info!("Registered '{}' prototype {}", type_name, path);
                true
            }
            Err(e) => {
                warn!("Skipping '{}' prototype: {}", type_name, e);
                false
            }
        }
    }

    /// Add an already loaded variant
    pub fn register_mesh(&mut self, type_name: &str, mesh: MeshHandle) {
        self.prototypes
            .entry(type_name.to_string())
            .or_insert_with(|| Prototypes {
                meshes: Vec::new(),
                scale: 1.0,
            })
            .meshes
            .push(mesh);
    }

    /// Uniform render scale for every instance of `type_name`
    pub fn set_scale(&mut self, type_name: &str, scale: f32) {
        if let Some(protos) = self.prototypes.get_mut(type_name) {
            protos.scale = scale;
        }
    }

    pub fn prototype_count(&self, type_name: &str) -> usize {
        self.prototypes.get(type_name).map_or(0, |p| p.meshes.len())
    }

    /// Try `count` random spots; keep those whose height lies in
    /// `[min_height, max_height]`. Rejected spots are not retried, so a narrow
    /// band yields fewer objects. `spread` is not enforced here, see
    /// [`ObjectScatter::scatter_spaced`]. Returns the number placed.
    pub fn scatter(
        &mut self,
        heights: &HeightField,
        count: usize,
        type_name: &str,
        min_height: f32,
        max_height: f32,
        _spread: f32,
    ) -> usize {
        let Some(variants) = self.variant_count(type_name) else {
            return 0;
        };

        let mut placed = 0;
        for _ in 0..count {
            let (x, z) = self.random_spot();
            let y = heights.height_at(x, z);
            if y < min_height || y > max_height {
                continue;
            }
            self.push_instance(type_name, Vec3::new(x, y, z), variants);
            placed += 1;
        }

        debug!("Scattered {}/{} '{}' objects", placed, count, type_name);
        placed
    }

    /// Like [`ObjectScatter::scatter`], but no two instances of `type_name`
    /// end up closer than `spread` on the XZ plane. Candidates are checked
    /// against a bucket grid of cell size `spread`, and up to
    /// `30 * count` candidates are drawn. Returns the number placed.
    pub fn scatter_spaced(
        &mut self,
        heights: &HeightField,
        count: usize,
        type_name: &str,
        min_height: f32,
        max_height: f32,
        spread: f32,
    ) -> usize {
        if !(spread > 0.0) {
            return self.scatter(heights, count, type_name, min_height, max_height, spread);
        }
        let Some(variants) = self.variant_count(type_name) else {
            return 0;
        };

        let cell = |p: Vec2| ((p.x / spread) as i32, (p.y / spread) as i32);
        let mut grid: HashMap<(i32, i32), Vec<Vec2>> = HashMap::new();
        for inst in self.instances.iter().filter(|i| i.type_name == type_name) {
            let p = Vec2::new(inst.position.x, inst.position.z);
            grid.entry(cell(p)).or_default().push(p);
        }

        let budget = candidate_budget(count);
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count && attempts < budget {
            attempts += 1;
            let (x, z) = self.random_spot();
            let y = heights.height_at(x, z);
            if y < min_height || y > max_height {
                continue;
            }

            let p = Vec2::new(x, z);
            let (cx, cz) = cell(p);
            let crowded = (cx - 1..=cx + 1)
                .flat_map(|gx| (cz - 1..=cz + 1).map(move |gz| (gx, gz)))
                .filter_map(|key| grid.get(&key))
                .flatten()
                .any(|other| other.distance(p) < spread);
            if crowded {
                continue;
            }

            grid.entry((cx, cz)).or_default().push(p);
            self.push_instance(type_name, Vec3::new(x, y, z), variants);
            placed += 1;
        }

        debug!(
            "Scattered {}/{} '{}' objects with spacing {} ({} candidates)",
            placed, count, type_name, spread, attempts
        );
        placed
    }

    /// Place one object at `(x, z)`, snapped to the terrain
    pub fn add_object(&mut self, heights: &HeightField, x: f32, z: f32, type_name: &str) -> bool {
        let Some(variants) = self.variant_count(type_name) else {
            return false;
        };
        self.push_instance(type_name, Vec3::new(x, heights.height_at(x, z), z), variants);
        true
    }

    pub fn instances(&self) -> &[ScatterInstance] {
        &self.instances
    }

    pub fn instances_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a ScatterInstance> + 'a {
        self.instances.iter().filter(move |i| i.type_name == type_name)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every placed instance (prototypes stay registered)
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Draw every instance with its variant's mesh and the type scale
    pub fn render_all(&self, sink: &mut dyn DrawSink) {
        for inst in &self.instances {
            let Some(protos) = self.prototypes.get(&inst.type_name) else {
                continue;
            };
            let Some(mesh) = protos.meshes.get(inst.prototype_index) else {
                continue;
            };
            let model = Mat4::from_translation(inst.position) * Mat4::from_scale(Vec3::splat(protos.scale));
            sink.draw_model(*mesh, model);
        }
    }

    fn variant_count(&self, type_name: &str) -> Option<usize> {
        match self.prototype_count(type_name) {
            0 => {
                warn!("No prototypes registered for '{}', nothing placed", type_name);
                None
            }
            n => Some(n),
        }
    }

    fn random_spot(&mut self) -> (f32, f32) {
        let x = if self.width > 0 { self.rng.gen_range(0.0..self.width as f32) } else { 0.0 };
        let z = if self.height > 0 { self.rng.gen_range(0.0..self.height as f32) } else { 0.0 };
        (x, z)
    }

    fn push_instance(&mut self, type_name: &str, position: Vec3, variants: usize) {
        let prototype_index = self.rng.gen_range(0..variants);
        self.instances.push(ScatterInstance {
            type_name: type_name.to_string(),
            position,
            prototype_index,
        });
    }
}
