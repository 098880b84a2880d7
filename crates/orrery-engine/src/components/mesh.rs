use glam::Vec3;
use serde::Deserialize;

/// Linear RGB color, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "u32")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Geometry descriptor for a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere. `segments` is a tessellation hint for the host renderer.
    Sphere { radius: f32, segments: u32 },
    /// Unconnected points drawn as a single cloud.
    Points { positions: Vec<Vec3> },
}

impl Geometry {
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::Sphere { radius, segments }
    }

    pub fn points(positions: Vec<Vec3>) -> Self {
        Self::Points { positions }
    }

    /// Sphere radius, or `None` for point clouds.
    pub fn radius(&self) -> Option<f32> {
        match self {
            Self::Sphere { radius, .. } => Some(*radius),
            Self::Points { .. } => None,
        }
    }
}

/// Unlit material descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Flat color, no lighting.
    Basic { color: Color },
    /// Screen-space points of a fixed pixel size.
    Points { color: Color, size: f32 },
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self::Basic { color }
    }

    pub fn points(color: Color, size: f32) -> Self {
        Self::Points { color, size }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Basic { color } | Self::Points { color, .. } => *color,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::Basic { color: Color::WHITE }
    }
}
