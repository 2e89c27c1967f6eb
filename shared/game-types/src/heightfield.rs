//! Heightfield sampling
//!
//! A grid of normalized height samples loaded from a grayscale image. Every
//! height query in the game (mesh generation, player snapping, camera
//! clearance, decoration placement) goes through [`HeightField::height_at`].

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};

use crate::error::AssetError;

/// Row-major grid of samples in [0, 1], mapped linearly to [0, scale] world units
#[derive(Debug)]
pub struct HeightField {
    samples: Vec<f32>,
    width: u32,
    height: u32,
    scale: f32,
    /// Set once the "not loaded" warning has been emitted
    warned: AtomicBool,
}

impl HeightField {
    /// Build from 8-bit intensities (0 = lowest, 255 = `scale`)
    pub fn from_luma8(width: u32, height: u32, data: &[u8], scale: f32) -> Result<Self, AssetError> {
        let samples = data.iter().map(|&v| v as f32 / 255.0).collect();
        Self::from_normalized(width, height, samples, scale)
    }

    /// Build from samples already normalized to [0, 1]
    pub fn from_normalized(width: u32, height: u32, samples: Vec<f32>, scale: f32) -> Result<Self, AssetError> {
        if width < 2 || height < 2 {
            return Err(AssetError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(AssetError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            samples,
            width,
            height,
            scale,
            warned: AtomicBool::new(false),
        })
    }

    /// Decode a grayscale heightmap image. Color images are converted to luma.
    pub fn from_image_path(path: impl AsRef<Path>, scale: f32) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let gray = img.into_luma8();
        let (width, height) = gray.dimensions();
        let field = Self::from_luma8(width, height, gray.as_raw(), scale)?;

        info!("Heightmap loaded: {} ({}x{})", path.display(), width, height);
        Ok(field)
    }

    /// Load a heightmap, falling back to flat terrain on failure
    pub fn load_or_flat(path: impl AsRef<Path>, scale: f32) -> Self {
        match Self::from_image_path(path, scale) {
            Ok(field) => field,
            Err(e) => {
                warn!("{e}; continuing with flat terrain");
                Self::unloaded(scale)
            }
        }
    }

    /// A field with no samples. Every query answers 0.
    pub fn unloaded(scale: f32) -> Self {
        Self {
            samples: Vec::new(),
            width: 0,
            height: 0,
            scale,
            warned: AtomicBool::new(false),
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.samples.is_empty()
    }

    /// Sample grid resolution (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// World height of the sample at integer grid coordinates, clamped to the grid
    pub fn sample(&self, ix: i64, iz: i64) -> f32 {
        if !self.is_loaded() {
            self.warn_unloaded();
            return 0.0;
        }
        self.scale * self.normalized(ix, iz)
    }

    /// Bilinear height at a world (x, z). Coordinates outside the grid clamp to the edge.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        if !self.is_loaded() {
            self.warn_unloaded();
            return 0.0;
        }

        // Anything past the edge samples the edge, so pulling far values in to
        // one cell outside the grid keeps the fractions finite.
        let x = if x.is_nan() { 0.0 } else { x.clamp(-1.0, self.width as f32) };
        let z = if z.is_nan() { 0.0 } else { z.clamp(-1.0, self.height as f32) };

        let fx = libm::floorf(x);
        let fz = libm::floorf(z);
        let tx = x - fx;
        let tz = z - fz;
        let ix = fx as i64;
        let iz = fz as i64;

        let h00 = self.normalized(ix, iz);
        let h10 = self.normalized(ix + 1, iz);
        let h01 = self.normalized(ix, iz + 1);
        let h11 = self.normalized(ix + 1, iz + 1);

        let top = h00 + (h10 - h00) * tx;
        let bottom = h01 + (h11 - h01) * tx;
        self.scale * (top + (bottom - top) * tz)
    }

    /// Lowest world height in the field (0 when unloaded)
    pub fn min_height(&self) -> f32 {
        self.samples
            .iter()
            .copied()
            .reduce(f32::min)
            .map_or(0.0, |v| v * self.scale)
    }

    /// Highest world height in the field (0 when unloaded)
    pub fn max_height(&self) -> f32 {
        self.samples
            .iter()
            .copied()
            .reduce(f32::max)
            .map_or(0.0, |v| v * self.scale)
    }

    fn normalized(&self, ix: i64, iz: i64) -> f32 {
        let x = ix.clamp(0, self.width as i64 - 1) as usize;
        let z = iz.clamp(0, self.height as i64 - 1) as usize;
        self.samples[z * self.width as usize + x]
    }

    fn warn_unloaded(&self) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!("Heightmap not loaded; height queries return 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn ramp() -> HeightField {
        // 4x3 grid, value = x * 10 + z * 50
        let mut data = Vec::new();
        for z in 0..3u8 {
            for x in 0..4u8 {
                data.push(x * 10 + z * 50);
            }
        }
        HeightField::from_luma8(4, 3, &data, 255.0).unwrap()
    }

    #[test]
    fn flat_mid_gray_field() {
        let field = HeightField::from_luma8(4, 4, &[128; 16], 10.0).unwrap();
        let expected = 10.0 * (128.0 / 255.0);
        assert!(approx(field.height_at(1.5, 1.5), expected));
        assert!(approx(field.height_at(0.0, 3.0), expected));
        assert!(approx(expected, 5.0196));
    }

    #[test]
    fn grid_points_return_exact_samples() {
        let field = ramp();
        for z in 0..3 {
            for x in 0..4 {
                let stored = (x * 10 + z * 50) as f32;
                assert_eq!(field.height_at(x as f32, z as f32), field.sample(x, z));
                assert!(approx(field.sample(x, z), stored));
            }
        }
    }

    #[test]
    fn interpolates_inside_cell() {
        let field = ramp();
        assert!(approx(field.height_at(0.5, 0.0), 5.0));
        assert!(approx(field.height_at(0.0, 0.5), 25.0));
        assert!(approx(field.height_at(1.5, 1.5), 15.0 + 75.0));
    }

    #[test]
    fn clamps_to_edge_outside_domain() {
        let field = ramp();
        let cases = [(-3.0, 1.0), (10.0, 1.2), (2.5, -7.0), (1.0, 99.0), (-5.0, -5.0), (1e9, 1e9)];
        for (x, z) in cases {
            let cx = f32::clamp(x, 0.0, 3.0);
            let cz = f32::clamp(z, 0.0, 2.0);
            assert!(approx(field.height_at(x, z), field.height_at(cx, cz)), "({x}, {z})");
        }
        assert!(field.height_at(f32::INFINITY, f32::NEG_INFINITY).is_finite());
    }

    #[test]
    fn continuous_across_cell_edges() {
        let field = ramp();
        let eps = 1e-3;
        for z in [0.25, 0.75, 1.5] {
            for edge in [1.0, 2.0] {
                let below = field.height_at(edge - eps, z);
                let above = field.height_at(edge + eps, z);
                assert!((below - above).abs() < 0.1, "jump at x={edge}, z={z}");
            }
        }
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(matches!(
            HeightField::from_luma8(1, 4, &[0; 4], 1.0),
            Err(AssetError::InvalidDimensions { width: 1, height: 4 })
        ));
        assert!(matches!(
            HeightField::from_luma8(2, 2, &[0; 3], 1.0),
            Err(AssetError::SampleCount { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn missing_image_degrades_to_flat() {
        let field = HeightField::load_or_flat("does/not/exist.png", 10.0);
        assert!(!field.is_loaded());
        assert_eq!(field.height_at(3.0, 4.0), 0.0);
        assert_eq!(field.max_height(), 0.0);
    }

    #[test]
    fn extremes_are_scaled() {
        let field = ramp();
        assert_eq!(field.min_height(), 0.0);
        assert!(approx(field.max_height(), 130.0));
    }
}
