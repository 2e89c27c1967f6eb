//! Terrain geometry and render boundary
//!
//! Builds the terrain grid mesh from a heightfield, culls it against the view
//! frustum, and defines the handles and traits through which the game talks
//! to the (external) GPU renderer and asset loader.

pub mod culling;
pub mod draw;
pub mod math;
pub mod mesh;
pub mod terrain_mesh;
pub mod vertex;

pub use culling::{Aabb, Frustum};
pub use draw::{AssetLoader, DrawCall, DrawLog, DrawSink, HandleAllocator, MeshHandle, TextureHandle};
pub use mesh::Mesh;
pub use terrain_mesh::TerrainMesh;
pub use vertex::Vertex;
