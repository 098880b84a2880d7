/// Solar System: sun, nine bodies on circular orbits, asteroid belt,
/// starfield, and markers for this week's near-Earth objects.
///
/// Orbit-style camera (drag to rotate, right-drag to pan, wheel to zoom)
/// is handled by the runner; this game only moves bodies.

use orrery_engine::{EngineContext, FetchReply, Game, GameConfig, InputQueue, RequestId};

use crate::assembly::{self, OrbitHandles};
use crate::bodies::BODIES;
use crate::config::OrreryConfig;
use crate::neo;
use crate::orbit;

pub struct SolarSystem {
    config: OrreryConfig,
    handles: Option<OrbitHandles>,
    neo_request: Option<RequestId>,
}

impl SolarSystem {
    pub fn new(config: OrreryConfig) -> Self {
        Self {
            config,
            handles: None,
            neo_request: None,
        }
    }

    /// Move every registry body to its position at `t_ms`.
    fn place_bodies(&self, ctx: &mut EngineContext, t_ms: f64) {
        let Some(handles) = &self.handles else {
            return;
        };
        for (index, body) in BODIES.iter().enumerate() {
            let Some(id) = handles.body(index) else {
                continue;
            };
            let position = orbit::position_at(t_ms, self.config.base_rate, index, body.distance);
            if !ctx.scene.set_position(id, position) {
                log::warn!("{} ({id:?}) is missing from the scene", body.name);
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new(OrreryConfig::default())
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        self.config.game_config()
    }

    fn configure(&mut self, json: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.config = OrreryConfig::from_json(json)?;
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.handles = Some(assembly::add_bodies(ctx));
        let belt = assembly::add_belt(ctx, &self.config.belt);
        assembly::add_stars(ctx, &self.config.stars);
        log::info!(
            "scene assembled: {} bodies, {belt} belt objects, {} stars",
            BODIES.len(),
            self.config.stars.count
        );

        if self.config.neo.enabled {
            let url = neo::feed_url(&self.config.neo);
            log::info!("requesting NEO feed {} .. {}", self.config.neo.start_date, self.config.neo.end_date);
            self.neo_request = Some(ctx.fetch(url));
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, _input: &InputQueue) {
        let now = ctx.clock.now_ms();
        self.place_bodies(ctx, now);
    }

    fn on_fetch(&mut self, ctx: &mut EngineContext, reply: FetchReply) {
        if self.neo_request != Some(reply.id) {
            log::warn!("unexpected fetch reply {:?}", reply.id);
            return;
        }
        self.neo_request = None;

        match neo::apply_reply(ctx, &self.config.neo, reply.body) {
            Ok(counts) => log::info!(
                "placed {} NEO markers ({} potentially hazardous)",
                counts.total(),
                counts.hazardous
            ),
            Err(e) => log::error!("failed to load NEO data: {e}"),
        }
    }
}
