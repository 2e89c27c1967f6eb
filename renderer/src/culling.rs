//! View Frustum Culling Module
//!
//! Tests bounding volumes against the six planes of the camera frustum so
//! off-screen geometry can skip its draw call.

use glam::{Mat4, Vec3, Vec4};

/// Axis-Aligned Bounding Box for fast culling tests
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Empty box that any point will expand
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    /// Grow the box so it contains `point`
    pub fn include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Expand every face outward by `margin`
    pub fn padded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

/// Signed distance from a normalized plane to a point
#[inline]
fn plane_distance(plane: Vec4, point: Vec3) -> f32 {
    plane.x * point.x + plane.y * point.y + plane.z * point.z + plane.w
}

/// View frustum for culling
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    /// Frustum planes in world space (normal pointing inward)
    /// Order: left, right, bottom, top, near, far
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from view-projection matrix
    /// Uses Gribb-Hartmann method for fast extraction
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [
            row3 + row0, // Left
            row3 - row0, // Right
            row3 + row1, // Bottom
            row3 - row1, // Top
            row3 + row2, // Near
            row3 - row2, // Far
        ];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0001 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Conservative box test: rejected only when all eight corners lie
    /// behind a single plane. Boxes near a frustum corner may pass.
    pub fn is_box_visible(&self, aabb: &Aabb) -> bool {
        is_box_visible(aabb.min, aabb.max, &self.planes)
    }
}

/// Corner test of the box `[min, max]` against six planes
pub fn is_box_visible(min: Vec3, max: Vec3, planes: &[Vec4; 6]) -> bool {
    let corners = Aabb::new(min, max).corners();
    for plane in planes {
        if corners.iter().all(|corner| plane_distance(*plane, *corner) < 0.0) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Camera at the origin looking down -Z
    fn frustum() -> Frustum {
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0);
        Frustum::from_view_projection(&(proj * view))
    }

    /// Unit-radius cube around `center`
    fn cube(center: Vec3) -> Aabb {
        Aabb::new(center - Vec3::ONE, center + Vec3::ONE)
    }

    #[test]
    fn planes_are_normalized() {
        for plane in frustum().planes() {
            assert!((plane.truncate().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn box_in_front_is_visible() {
        let f = frustum();
        assert!(f.is_box_visible(&cube(Vec3::new(0.0, 0.0, -10.0))));
    }

    #[test]
    fn box_behind_or_beside_is_culled() {
        let f = frustum();
        let behind = cube(Vec3::new(0.0, 0.0, 10.0));
        let left = cube(Vec3::new(-50.0, 0.0, -10.0));
        let far = cube(Vec3::new(0.0, 0.0, -500.0));
        assert!(!f.is_box_visible(&behind));
        assert!(!f.is_box_visible(&left));
        assert!(!f.is_box_visible(&far));
    }

    #[test]
    fn straddling_box_is_visible() {
        let f = frustum();
        let big = Aabb::new(Vec3::new(-100.0, -1.0, -50.0), Vec3::new(100.0, 1.0, 50.0));
        assert!(f.is_box_visible(&big));
    }

    #[test]
    fn box_touching_one_plane_is_kept() {
        // Crosses the near plane: some corners behind the camera, some in front
        let f = frustum();
        assert!(f.is_box_visible(&Aabb::new(Vec3::new(-0.5, -0.5, -1.0), Vec3::new(0.5, 0.5, 1.0))));
    }

    #[test]
    fn aabb_growth() {
        let mut aabb = Aabb::empty();
        aabb.include(Vec3::new(1.0, 2.0, 3.0));
        aabb.include(Vec3::new(-1.0, 0.0, 5.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 5.0));
        let padded = aabb.padded(0.5);
        assert_eq!(padded.min, Vec3::new(-1.5, -0.5, 2.5));
        assert_eq!(padded.max, Vec3::new(1.5, 2.5, 5.5));
    }
}
