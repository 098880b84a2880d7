/// App configuration, parsed from the JSON string handed to `game_init`.
///
/// Every field has a default, so `{}` (or no JSON at all) reproduces the
/// stock scene. Values are checked by [`OrreryConfig::validate`] before use.

use chrono::NaiveDate;
use orrery_engine::{CameraConfig, Color, GameConfig};
use serde::Deserialize;

use crate::bodies::BODY_COUNT;
use crate::orbit::BASE_RATE;

/// Upper bounds on scene sizes. The frame buffer is sized from these counts.
pub const MAX_BELT_COUNT: usize = 100_000;
pub const MAX_STAR_COUNT: usize = 1_000_000;
pub const MAX_MARKERS: usize = 10_000;

/// The feed endpoint refuses ranges longer than this.
pub const MAX_FEED_DAYS: i64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("camera far plane {far} must lie beyond near plane {near}")]
    CameraRange { near: f32, far: f32 },
    #[error("{field} is {value}, at most {max} allowed")]
    TooMany { field: &'static str, value: usize, max: usize },
    #[error("belt radii must satisfy 0 <= inner <= outer, got {inner}..{outer}")]
    BeltRadii { inner: f32, outer: f32 },
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    Date(String),
    #[error("date range {start}..{end} must run forward and span at most 7 days")]
    DateRange { start: NaiveDate, end: NaiveDate },
    #[error("API key may only contain ASCII letters, digits, '-' and '_'")]
    ApiKey,
    #[error("endpoint must be an http(s) URL without a query, got {0:?}")]
    Endpoint(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BeltConfig {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Largest body radius; each body gets a size in (0, size_cap].
    pub size_cap: f32,
    pub color: Color,
    pub segments: u32,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            count: 500,
            inner_radius: 16.0,
            outer_radius: 20.0,
            size_cap: 0.1,
            color: Color::from_hex(0x777777),
            segments: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    /// Stars fill the cube [-half_extent, half_extent)³.
    pub half_extent: f32,
    pub color: Color,
    /// Point size in pixels.
    pub size: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            half_extent: 1000.0,
            color: Color::WHITE,
            size: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NeoConfig {
    /// Skip the request entirely when false.
    pub enabled: bool,
    pub endpoint: String,
    pub start_date: String,
    pub end_date: String,
    pub api_key: String,
    /// Records past this count get no marker.
    pub max_markers: usize,
    pub marker_radius: f32,
    pub marker_segments: u32,
    /// Markers land in the cube [-spread, spread)³.
    pub spread: f32,
    pub hazardous_color: Color,
    pub safe_color: Color,
}

impl Default for NeoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.nasa.gov/neo/rest/v1/feed".into(),
            start_date: "2024-10-01".into(),
            end_date: "2024-10-07".into(),
            api_key: "DEMO_KEY".into(),
            max_markers: 512,
            marker_radius: 0.2,
            marker_segments: 32,
            spread: 10.0,
            hazardous_color: Color::RED,
            safe_color: Color::GREEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub seed: u64,
    /// Angular rate of the innermost body in rad/ms.
    pub base_rate: f64,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub camera: CameraConfig,
    pub belt: BeltConfig,
    pub stars: StarConfig,
    pub neo: NeoConfig,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            base_rate: BASE_RATE,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            camera: CameraConfig::default(),
            belt: BeltConfig::default(),
            stars: StarConfig::default(),
            neo: NeoConfig::default(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn at_most(field: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooMany { field, value, max })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ConfigError::Date(value.to_string()))
}

impl OrreryConfig {
    /// Parse and validate in one step.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("base_rate", self.base_rate)?;
        positive("viewport_width", self.viewport_width as f64)?;
        positive("viewport_height", self.viewport_height as f64)?;
        positive("camera.fov_deg", self.camera.fov_deg as f64)?;
        positive("camera.near", self.camera.near as f64)?;
        if !(self.camera.far > self.camera.near && self.camera.far.is_finite()) {
            return Err(ConfigError::CameraRange {
                near: self.camera.near,
                far: self.camera.far,
            });
        }
        at_most("belt.count", self.belt.count, MAX_BELT_COUNT)?;
        at_most("stars.count", self.stars.count, MAX_STAR_COUNT)?;
        at_most("neo.max_markers", self.neo.max_markers, MAX_MARKERS)?;

        let belt = &self.belt;
        if !(belt.inner_radius >= 0.0 && belt.inner_radius <= belt.outer_radius) {
            return Err(ConfigError::BeltRadii {
                inner: belt.inner_radius,
                outer: belt.outer_radius,
            });
        }
        positive("belt.size_cap", belt.size_cap as f64)?;
        positive("stars.half_extent", self.stars.half_extent as f64)?;
        positive("stars.size", self.stars.size as f64)?;

        let neo = &self.neo;
        positive("neo.marker_radius", neo.marker_radius as f64)?;
        positive("neo.spread", neo.spread as f64)?;

        let start = parse_date(&neo.start_date)?;
        let end = parse_date(&neo.end_date)?;
        let span = (end - start).num_days();
        if !(0..MAX_FEED_DAYS).contains(&span) {
            return Err(ConfigError::DateRange { start, end });
        }

        if neo.api_key.is_empty()
            || !neo.api_key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ConfigError::ApiKey);
        }

        let scheme_ok = neo.endpoint.starts_with("https://") || neo.endpoint.starts_with("http://");
        if !scheme_ok || neo.endpoint.contains('?') {
            return Err(ConfigError::Endpoint(neo.endpoint.clone()));
        }
        Ok(())
    }

    /// Engine settings derived from this config. Buffer capacities cover
    /// the sun, every registry body, the belt, and marker headroom.
    pub fn game_config(&self) -> GameConfig {
        let max_meshes = (1 + BODY_COUNT)
            .saturating_add(self.belt.count)
            .saturating_add(self.neo.max_markers);
        GameConfig {
            camera: self.camera,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            max_meshes,
            max_point_batches: 1,
            max_points: self.stars.count,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default_scene() {
        let config = OrreryConfig::from_json("{}").unwrap();
        assert_eq!(config, OrreryConfig::default());
        assert_eq!(config.belt.count, 500);
        assert_eq!(config.stars.count, 10_000);
        assert_eq!(config.neo.api_key, "DEMO_KEY");
        assert_eq!(config.base_rate, 0.0001);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = OrreryConfig::from_json(
            r#"{"belt": {"count": 50, "color": 3355443}, "neo": {"api_key": "abc-123"}}"#,
        )
        .unwrap();
        assert_eq!(config.belt.count, 50);
        assert_eq!(config.belt.color, Color::from_hex(0x333333));
        assert_eq!(config.belt.outer_radius, 20.0);
        assert_eq!(config.neo.api_key, "abc-123");
        assert_eq!(config.neo.start_date, "2024-10-01");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(OrreryConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn inverted_belt_is_rejected() {
        let mut config = OrreryConfig::default();
        config.belt.inner_radius = 25.0;
        assert!(matches!(config.validate(), Err(ConfigError::BeltRadii { .. })));
    }

    #[test]
    fn zero_size_cap_is_rejected() {
        let mut config = OrreryConfig::default();
        config.belt.size_cap = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "belt.size_cap", .. })
        ));
    }

    #[test]
    fn dates_are_checked() {
        let mut config = OrreryConfig::default();
        config.neo.start_date = "2024-13-01".into();
        assert!(matches!(config.validate(), Err(ConfigError::Date(_))));

        let mut config = OrreryConfig::default();
        config.neo.end_date = "2024-09-30".into();
        assert!(matches!(config.validate(), Err(ConfigError::DateRange { .. })));

        let mut config = OrreryConfig::default();
        config.neo.end_date = "2024-10-08".into();
        assert!(matches!(config.validate(), Err(ConfigError::DateRange { .. })));

        let mut config = OrreryConfig::default();
        config.neo.end_date = config.neo.start_date.clone();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn api_key_charset_is_checked() {
        let mut config = OrreryConfig::default();
        config.neo.api_key = "key&admin=1".into();
        assert!(matches!(config.validate(), Err(ConfigError::ApiKey)));
        config.neo.api_key = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::ApiKey)));
    }

    #[test]
    fn endpoint_must_be_http() {
        let mut config = OrreryConfig::default();
        config.neo.endpoint = "ftp://example.test/feed".into();
        assert!(matches!(config.validate(), Err(ConfigError::Endpoint(_))));
    }

    #[test]
    fn game_config_has_room_for_the_scene() {
        let config = OrreryConfig::default();
        let game = config.game_config();
        assert_eq!(game.max_meshes, 1 + 9 + 500 + 512);
        assert_eq!(game.max_points, 10_000);
        assert_eq!(game.seed, 42);
        assert_eq!(game.camera.fov_deg, 75.0);
    }

    #[test]
    fn oversized_counts_are_rejected() {
        let err = OrreryConfig::from_json(r#"{"belt": {"count": 18446744073709551615}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::TooMany { field: "belt.count", max: MAX_BELT_COUNT, .. }));

        let mut config = OrreryConfig::default();
        config.stars.count = MAX_STAR_COUNT + 1;
        assert!(matches!(config.validate(), Err(ConfigError::TooMany { field: "stars.count", .. })));

        config.stars.count = MAX_STAR_COUNT;
        config.belt.count = MAX_BELT_COUNT;
        config.neo.max_markers = MAX_MARKERS;
        assert!(config.validate().is_ok());
        assert_eq!(config.game_config().max_meshes, 1 + 9 + MAX_BELT_COUNT + MAX_MARKERS);
    }

    #[test]
    fn unchecked_counts_saturate_instead_of_overflowing() {
        let mut config = OrreryConfig::default();
        config.belt.count = usize::MAX;
        assert_eq!(config.game_config().max_meshes, usize::MAX);
    }

    #[test]
    fn far_plane_must_lie_beyond_near() {
        let mut config = OrreryConfig::default();
        config.camera.far = config.camera.near;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::CameraRange { .. }));
        assert!(err.to_string().contains("far plane"));
    }

    #[test]
    fn marker_cap_feeds_mesh_capacity() {
        let config = OrreryConfig::from_json(r#"{"neo": {"max_markers": 20}}"#).unwrap();
        assert_eq!(config.game_config().max_meshes, 1 + 9 + 500 + 20);
    }
}
