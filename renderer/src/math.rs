//! Math utilities using glam

use core::f32::consts::{PI, TAU};

use glam::Vec3;

/// Unit direction from yaw and pitch (in radians).
/// Yaw 0 points along +Z, positive pitch points up.
pub fn direction_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let cy = libm::cosf(yaw);
    let sy = libm::sinf(yaw);
    let cp = libm::cosf(pitch);
    let sp = libm::sinf(pitch);

    Vec3::new(sy * cp, sp, cy * cp)
}

/// Wrap an angle into (-PI, PI]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle - TAU * libm::floorf((angle + PI) / TAU);
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Interpolate between two angles along the shorter arc
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    wrap_angle(from + wrap_angle(to - from) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_unit_and_oriented() {
        let d = direction_from_angles(0.0, 0.0);
        assert!((d - Vec3::Z).length() < 1e-6);
        let up = direction_from_angles(1.0, PI / 2.0);
        assert!((up - Vec3::Y).length() < 1e-6);
        for (yaw, pitch) in [(0.3, 0.2), (-2.0, 1.1), (4.0, -0.7)] {
            assert!((direction_from_angles(yaw, pitch).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn wraps_into_half_open_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI / 2.0 - TAU) + PI / 2.0).abs() < 1e-5);
        assert!(wrap_angle(-PI) > 0.0);
    }

    #[test]
    fn angle_lerp_takes_short_way() {
        // From just below +PI to just above -PI: crossing the seam, not the long way round
        let mid = lerp_angle(PI - 0.1, -PI + 0.1, 0.5);
        assert!(mid.abs() > PI - 0.01);
        assert!((lerp_angle(0.0, 1.0, 0.25) - 0.25).abs() < 1e-6);
    }
}
