use std::error::Error;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::api::fetch::{FetchReply, FetchRequest};
use crate::api::types::{ObjectId, RequestId};
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{CameraConfig, PerspectiveCamera};
use crate::renderer::controls::OrbitControls;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub camera: CameraConfig,
    /// Initial viewport width in CSS pixels (the host sends a resize right after init).
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of sphere instances per frame (default: 1024).
    pub max_meshes: usize,
    /// Maximum number of point clouds (default: 8).
    pub max_point_batches: usize,
    /// Maximum number of points across all clouds (default: 16384).
    pub max_points: usize,
    /// Seed for `EngineContext::rng`.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_meshes: 1024,
            max_point_batches: 8,
            max_points: 16384,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init, after `configure`.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply the JSON configuration string handed to `game_init`.
    /// On error the runner logs it and carries on with the game's defaults.
    fn configure(&mut self, _json: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    /// Build the initial scene and issue startup requests.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Once per display refresh, after pending fetch replies were delivered.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// A request issued through `EngineContext::fetch` settled.
    fn on_fetch(&mut self, _ctx: &mut EngineContext, _reply: FetchReply) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub clock: FrameClock,
    /// Seeded generator for procedural content.
    pub rng: ChaCha8Rng,
    requests: Vec<FetchRequest>,
    next_id: u32,
    next_request: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let aspect = if config.viewport_height > 0.0 {
            config.viewport_width / config.viewport_height
        } else {
            1.0
        };
        let camera = PerspectiveCamera::from_config(&config.camera, aspect);
        let controls = OrbitControls::new(config.viewport_width, config.viewport_height);

        Self {
            scene: Scene::with_capacity(config.max_meshes.saturating_add(config.max_point_batches)),
            camera,
            controls,
            clock: FrameClock::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            requests: Vec::new(),
            next_id: 1,
            next_request: 1,
        }
    }

    /// Generate the next unique object ID.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue a GET request. The reply arrives via `Game::on_fetch` on a later frame.
    pub fn fetch(&mut self, url: impl Into<String>) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.requests.push(FetchRequest { id, url: url.into() });
        id
    }

    /// Requests queued since the last call. Drained by the runner each frame.
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Apply a new viewport size to camera and controls. Returns false if rejected.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !self.camera.resize(width, height) {
            return false;
        }
        self.controls.set_viewport(width, height);
        true
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
