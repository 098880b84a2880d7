/// Near-Earth-object feed: request URL, payload parsing, marker placement.
///
/// Marker positions are random inside a small cube around the sun. The
/// feed's own orbital data is not used.

use std::collections::BTreeMap;
use std::fmt::Write;

use orrery_engine::{scatter_cube, EngineContext, FetchError, SceneObject};
use serde::Deserialize;

use crate::config::NeoConfig;

pub const NEO_TAG: &str = "neo";

#[derive(Debug, thiserror::Error)]
pub enum NeoError {
    #[error("NEO request failed: {0}")]
    Network(FetchError),
    #[error("NEO feed answered HTTP {0}")]
    Status(u16),
    #[error("NEO feed is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<FetchError> for NeoError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status(code) => Self::Status(code),
            other => Self::Network(other),
        }
    }
}

/// One object from the feed. Only the hazard flag matters for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeoRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
}

/// `{"near_earth_objects": {"YYYY-MM-DD": [record, ...], ...}, ...}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeoFeed {
    #[serde(default)]
    pub near_earth_objects: BTreeMap<String, Vec<NeoRecord>>,
}

impl NeoFeed {
    pub fn parse(body: &str) -> Result<Self, NeoError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Every record, date buckets in ascending order.
    pub fn records(&self) -> impl Iterator<Item = &NeoRecord> {
        self.near_earth_objects.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.near_earth_objects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCounts {
    pub hazardous: usize,
    pub safe: usize,
}

impl MarkerCounts {
    pub fn total(&self) -> usize {
        self.hazardous + self.safe
    }
}

/// Percent-encode a query value, keeping RFC 3986 unreserved characters.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// `GET {endpoint}?start_date=..&end_date=..&api_key=..`
pub fn feed_url(config: &NeoConfig) -> String {
    format!(
        "{}?start_date={}&end_date={}&api_key={}",
        config.endpoint,
        encode_component(&config.start_date),
        encode_component(&config.end_date),
        encode_component(&config.api_key),
    )
}

/// Add one sphere per record, up to `max_markers`: red when hazardous,
/// green otherwise.
pub fn place_markers(ctx: &mut EngineContext, config: &NeoConfig, feed: &NeoFeed) -> MarkerCounts {
    let mut counts = MarkerCounts::default();
    if feed.is_empty() {
        log::info!("NEO feed has no objects for {} .. {}", config.start_date, config.end_date);
        return counts;
    }
    let total = feed.len();
    if total > config.max_markers {
        log::warn!("NEO feed has {total} objects, showing the first {}", config.max_markers);
    }
    let positions = scatter_cube(&mut ctx.rng, total.min(config.max_markers), config.spread);

    for (record, position) in feed.records().zip(positions) {
        let color = if record.is_potentially_hazardous_asteroid {
            counts.hazardous += 1;
            config.hazardous_color
        } else {
            counts.safe += 1;
            config.safe_color
        };
        log::debug!(
            "NEO {} ({}): hazardous={}",
            record.name.as_deref().unwrap_or("?"),
            record.id.as_deref().unwrap_or("?"),
            record.is_potentially_hazardous_asteroid
        );
        let id = ctx.next_id();
        ctx.scene.add(
            SceneObject::sphere(id, config.marker_radius, config.marker_segments, color)
                .with_tag(NEO_TAG)
                .with_position(position),
        );
    }
    counts
}

/// Turn a fetch reply into markers. On any error the scene is left untouched.
pub fn apply_reply(
    ctx: &mut EngineContext,
    config: &NeoConfig,
    body: Result<String, FetchError>,
) -> Result<MarkerCounts, NeoError> {
    let feed = NeoFeed::parse(&body?)?;
    Ok(place_markers(ctx, config, &feed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::Color;

    const THREE_RECORDS: &str = r#"{
        "links": {"self": "ignored"},
        "element_count": 3,
        "near_earth_objects": {
            "2024-10-02": [
                {"id": "2", "name": "B", "is_potentially_hazardous_asteroid": false}
            ],
            "2024-10-01": [
                {"id": "1", "name": "A", "is_potentially_hazardous_asteroid": true,
                 "estimated_diameter": {"meters": {"estimated_diameter_max": 120.5}}},
                {"id": "3", "name": "C", "is_potentially_hazardous_asteroid": false}
            ]
        }
    }"#;

    #[test]
    fn url_carries_dates_and_key() {
        let url = feed_url(&NeoConfig::default());
        assert_eq!(
            url,
            "https://api.nasa.gov/neo/rest/v1/feed?start_date=2024-10-01&end_date=2024-10-07&api_key=DEMO_KEY"
        );
    }

    #[test]
    fn query_values_are_encoded() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("x-y_z.~"), "x-y_z.~");
    }

    #[test]
    fn buckets_are_read_in_date_order() {
        let feed = NeoFeed::parse(THREE_RECORDS).unwrap();
        let ids: Vec<_> = feed.records().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["1", "3", "2"]);
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn three_records_make_one_red_two_green() {
        let mut ctx = EngineContext::new();
        let config = NeoConfig::default();
        let counts = apply_reply(&mut ctx, &config, Ok(THREE_RECORDS.to_string())).unwrap();
        assert_eq!(counts, MarkerCounts { hazardous: 1, safe: 2 });

        let markers: Vec<_> = ctx.scene.iter().filter(|o| o.tag == NEO_TAG).collect();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers.iter().filter(|m| m.color() == Color::RED).count(), 1);
        assert_eq!(markers.iter().filter(|m| m.color() == Color::GREEN).count(), 2);
        for marker in markers {
            assert_eq!(marker.geometry.radius(), Some(0.2));
            assert!(marker.position.abs().max_element() <= 10.0);
        }
    }

    #[test]
    fn fetch_failure_adds_nothing() {
        let mut ctx = EngineContext::new();
        let config = NeoConfig::default();

        let err = apply_reply(&mut ctx, &config, Err(FetchError::Network("offline".into()))).unwrap_err();
        assert!(matches!(err, NeoError::Network(_)));
        let err = apply_reply(&mut ctx, &config, Err(FetchError::Status(429))).unwrap_err();
        assert!(matches!(err, NeoError::Status(429)));
        assert!(ctx.scene.is_empty());
    }

    #[test]
    fn bad_payload_adds_nothing() {
        let mut ctx = EngineContext::new();
        let config = NeoConfig::default();
        let err = apply_reply(&mut ctx, &config, Ok("<html>rate limited</html>".into())).unwrap_err();
        assert!(matches!(err, NeoError::Parse(_)));
        assert!(ctx.scene.is_empty());
    }

    #[test]
    fn markers_stop_at_the_configured_cap() {
        let mut ctx = EngineContext::new();
        let config = NeoConfig { max_markers: 2, ..NeoConfig::default() };
        let counts = apply_reply(&mut ctx, &config, Ok(THREE_RECORDS.to_string())).unwrap();
        // Date order: the hazardous "1" and safe "3" come first
        assert_eq!(counts, MarkerCounts { hazardous: 1, safe: 1 });
        assert_eq!(ctx.scene.len(), 2);
    }

    #[test]
    fn empty_feed_adds_nothing() {
        let mut ctx = EngineContext::new();
        let counts = apply_reply(&mut ctx, &NeoConfig::default(), Ok("{}".into())).unwrap();
        assert_eq!(counts.total(), 0);
        assert!(ctx.scene.is_empty());
    }

    #[test]
    fn missing_fields_default() {
        let feed = NeoFeed::parse(r#"{"near_earth_objects": {"2024-10-01": [{}]}}"#).unwrap();
        let record = feed.records().next().unwrap();
        assert!(!record.is_potentially_hazardous_asteroid);
        assert!(NeoFeed::parse("{}").unwrap().is_empty());
    }
}
