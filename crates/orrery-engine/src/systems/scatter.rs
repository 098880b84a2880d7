//! Procedural scatter fields: a flat annulus of small bodies and a cube of points.
//!
//! Generation is infallible. Bounds are validated by the caller's config layer.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// Annulus on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeltSpec {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Upper bound for a body's visual size.
    pub size_cap: f32,
}

impl Default for BeltSpec {
    fn default() -> Self {
        Self {
            count: 500,
            inner_radius: 16.0,
            outer_radius: 20.0,
            size_cap: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeltSample {
    pub position: Vec3,
    /// In (0, size_cap].
    pub size: f32,
}

/// Scatter `spec.count` bodies uniformly in angle and radius.
pub fn scatter_belt(rng: &mut impl Rng, spec: &BeltSpec) -> Vec<BeltSample> {
    let span = spec.outer_radius - spec.inner_radius;
    (0..spec.count)
        .map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let radius = spec.inner_radius + rng.random::<f32>() * span;
            // 1 - U[0,1) keeps the size strictly positive
            let size = spec.size_cap * (1.0 - rng.random::<f32>());
            BeltSample {
                position: Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius),
                size,
            }
        })
        .collect()
}

/// `count` points with each axis uniform in [-half_extent, half_extent).
pub fn scatter_cube(rng: &mut impl Rng, count: usize, half_extent: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * 2.0 * half_extent,
                (rng.random::<f32>() - 0.5) * 2.0 * half_extent,
                (rng.random::<f32>() - 0.5) * 2.0 * half_extent,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn belt_bodies_stay_in_annulus() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let spec = BeltSpec::default();
        let belt = scatter_belt(&mut rng, &spec);
        assert_eq!(belt.len(), 500);
        for s in &belt {
            let r = (s.position.x * s.position.x + s.position.z * s.position.z).sqrt();
            assert!(r >= spec.inner_radius - 1e-4 && r <= spec.outer_radius + 1e-4, "r = {r}");
            assert_eq!(s.position.y, 0.0);
            assert!(s.size > 0.0 && s.size <= spec.size_cap);
        }
    }

    #[test]
    fn belt_covers_all_quadrants() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let belt = scatter_belt(&mut rng, &BeltSpec::default());
        let mut quadrants = [false; 4];
        for s in &belt {
            let q = (s.position.x >= 0.0) as usize * 2 + (s.position.z >= 0.0) as usize;
            quadrants[q] = true;
        }
        assert!(quadrants.iter().all(|&q| q));
    }

    #[test]
    fn stars_stay_in_cube() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let stars = scatter_cube(&mut rng, 10_000, 1000.0);
        assert_eq!(stars.len(), 10_000);
        for p in &stars {
            for c in p.to_array() {
                assert!((-1000.0..=1000.0).contains(&c), "coord = {c}");
            }
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = scatter_cube(&mut ChaCha8Rng::seed_from_u64(3), 16, 10.0);
        let b = scatter_cube(&mut ChaCha8Rng::seed_from_u64(3), 16, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let spec = BeltSpec { count: 0, ..Default::default() };
        assert!(scatter_belt(&mut rng, &spec).is_empty());
        assert!(scatter_cube(&mut rng, 0, 5.0).is_empty());
    }
}
