//! Terrain mesh bounds against camera frusta

use game_types::HeightField;
use glam::{Mat4, Vec3};
use renderer::{Frustum, TerrainMesh};

fn hills() -> HeightField {
    let data: Vec<u8> = (0..16u32 * 16)
        .map(|i| {
            let (x, z) = (i % 16, i / 16);
            ((x * 13 + z * 7) % 256) as u8
        })
        .collect();
    HeightField::from_luma8(16, 16, &data, 20.0).unwrap()
}

fn camera(eye: Vec3, target: Vec3) -> Frustum {
    let view = Mat4::look_at_rh(eye, target, Vec3::Y);
    let proj = Mat4::perspective_rh_gl(80f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);
    Frustum::from_view_projection(&(proj * view))
}

#[test]
fn flat_field_mesh_sits_at_mid_height() {
    let field = HeightField::from_luma8(4, 4, &[128; 16], 10.0).unwrap();
    let terrain = TerrainMesh::generate(&field, 4, 4, 10.0);
    assert_eq!(terrain.vertex_count(), 16);
    assert_eq!(terrain.index_count(), 54);
    for v in &terrain.mesh().vertices {
        assert!((v.position.y - 10.0 * 128.0 / 255.0).abs() < 1e-4);
        assert!((v.normal - Vec3::Y).length() < 1e-5);
    }
}

#[test]
fn larger_world_grid_clamps_to_field_edge() {
    let field = hills();
    let terrain = TerrainMesh::generate(&field, 32, 24, 4.0);
    assert_eq!(terrain.vertex_count(), 32 * 24);
    assert_eq!(terrain.index_count(), 6 * 31 * 23);
    let beyond = terrain.mesh().vertices[31].position;
    assert_eq!(beyond.y, field.height_at(15.0, 0.0));
    let bounds = terrain.bounds();
    assert!(bounds.min.y <= field.min_height() && bounds.max.y >= field.max_height());
}

#[test]
fn terrain_visibility_follows_camera() {
    let terrain = TerrainMesh::generate(&hills(), 16, 16, 4.0);
    let bounds = terrain.bounds();

    let overhead = camera(Vec3::new(8.0, 40.0, 30.0), Vec3::new(8.0, 0.0, 8.0));
    assert!(overhead.is_box_visible(&bounds));

    // Standing inside the bounds always sees some of it
    let inside = camera(Vec3::new(8.0, 10.0, 8.0), Vec3::new(30.0, 10.0, 8.0));
    assert!(inside.is_box_visible(&bounds));

    let turned_away = camera(Vec3::new(8.0, 10.0, 40.0), Vec3::new(8.0, 10.0, 80.0));
    assert!(!turned_away.is_box_visible(&bounds));

    let too_far = camera(Vec3::new(8.0, 10.0, 300.0), Vec3::new(8.0, 10.0, 8.0));
    assert!(!too_far.is_box_visible(&bounds));
}
