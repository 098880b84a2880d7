/// Circular orbit math, pure functions with no engine state.
///
/// Angles are computed in f64 and reduced to [0, 2π) before the f32
/// conversion, so epoch-millisecond timestamps keep full precision.

use std::f64::consts::TAU;

use glam::Vec3;

/// Default angular rate of the innermost body, in radians per millisecond.
pub const BASE_RATE: f64 = 0.0001;

/// Orbit angle of body `index` at time `t_ms`.
/// Body `i` turns `i + 1` times as fast as the base rate.
pub fn angle_at(t_ms: f64, base_rate: f64, index: usize) -> f64 {
    (t_ms * base_rate * (index + 1) as f64).rem_euclid(TAU)
}

/// Position on the XZ plane at `distance` from the origin.
pub fn position_at(t_ms: f64, base_rate: f64, index: usize, distance: f32) -> Vec3 {
    let angle = angle_at(t_ms, base_rate, index);
    Vec3::new(
        (angle.cos() as f32) * distance,
        0.0,
        (angle.sin() as f32) * distance,
    )
}
