/// Body registry: the sun and the nine orbiting bodies with their visual
/// properties and circular orbit radii.
///
/// Sizes and distances are picked for readability, not to scale.

use orrery_engine::Color;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 3.0;
pub const SUN_COLOR: Color = Color::from_hex(0xffff00);
pub const SUN_SEGMENTS: u32 = 64;

// ── Orbiting bodies ──────────────────────────────────────────────────

/// Sphere tessellation for every orbiting body.
pub const BODY_SEGMENTS: u32 = 32;

/// One entry of the registry. Immutable for the lifetime of the program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBody {
    pub name: &'static str,
    pub color: Color,
    pub radius: f32,
    /// Orbit radius around the origin.
    pub distance: f32,
}

impl OrbitBody {
    const fn new(name: &'static str, hex: u32, radius: f32, distance: f32) -> Self {
        Self {
            name,
            color: Color::from_hex(hex),
            radius,
            distance,
        }
    }
}

pub const BODY_COUNT: usize = 9;

/// Innermost first. The index into this table drives the angular rate.
pub const BODIES: [OrbitBody; BODY_COUNT] = [
    OrbitBody::new("Mercury", 0xaaaaaa, 0.3, 6.0),
    OrbitBody::new("Venus", 0xffcc00, 0.9, 8.0),
    OrbitBody::new("Earth", 0x0000ff, 1.0, 10.0),
    OrbitBody::new("Mars", 0xff0000, 0.7, 12.0),
    OrbitBody::new("Jupiter", 0xff8800, 2.0, 15.0),
    OrbitBody::new("Saturn", 0xffdd99, 1.8, 18.0),
    OrbitBody::new("Uranus", 0x00ffff, 1.5, 21.0),
    OrbitBody::new("Neptune", 0x0000ff, 1.4, 24.0),
    OrbitBody::new("Pluto", 0x999999, 0.2, 27.0),
];
