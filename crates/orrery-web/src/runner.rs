use orrery_engine::{
    build_frame, EngineContext, FetchQueue, Fetcher, FrameBuffers, FrameData, Game, GameConfig,
    InputEvent, InputQueue, ProtocolLayout, Renderer,
};

use crate::fetch::BrowserFetcher;
use crate::shared::SharedBufferRenderer;

/// Hand the `game_init` JSON to the game before the runner is built,
/// so capacities derived from it size the frame buffer.
/// Empty input keeps the defaults. Errors are logged and also keep the defaults.
pub fn apply_config<G: Game>(game: &mut G, json: &str) -> bool {
    if json.trim().is_empty() {
        return true;
    }
    match game.configure(json) {
        Ok(()) => true,
        Err(e) => {
            log::error!("invalid configuration, using defaults: {e}");
            false
        }
    }
}

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game, R: Renderer = SharedBufferRenderer> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    frame: FrameBuffers,
    renderer: R,
    fetcher: Box<dyn Fetcher>,
    fetches: FetchQueue,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    /// Runner for the browser: shared-buffer renderer and `fetch`.
    pub fn new(game: G) -> Self {
        let layout = ProtocolLayout::from_config(&game.config());
        Self::with_backends(game, SharedBufferRenderer::new(layout), Box::new(BrowserFetcher::new()))
    }

    // ---- Accessors for the host's buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.renderer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.renderer.len() as u32
    }

    pub fn mesh_count(&self) -> u32 {
        self.renderer.mesh_count()
    }

    pub fn point_count(&self) -> u32 {
        self.renderer.point_count()
    }

    pub fn points_generation(&self) -> u32 {
        self.renderer.points_generation()
    }
}

impl<G: Game, R: Renderer> GameRunner<G, R> {
    pub fn with_backends(game: G, renderer: R, fetcher: Box<dyn Fetcher>) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::from_config(&config),
            frame: FrameBuffers::with_capacity(config.max_meshes, config.max_points),
            game,
            input: InputQueue::new(),
            renderer,
            fetcher,
            fetches: FetchQueue::new(),
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.ctx = EngineContext::from_config(&self.config);
        self.renderer.set_size(
            self.config.viewport_width.round() as u32,
            self.config.viewport_height.round() as u32,
        );
        self.game.init(&mut self.ctx);
        self.dispatch_requests();
        self.initialized = true;
        log::info!(
            "runner ready: {} objects, renderer {}",
            self.ctx.scene.len(),
            self.renderer.backend()
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame with the host's timestamp in milliseconds.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        self.ctx.clock.advance(now_ms);

        for reply in self.fetches.collect() {
            self.game.on_fetch(&mut self.ctx, reply);
        }

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update; the camera controls see the same events
        for event in self.input.drain() {
            self.ctx.controls.handle(&event, &self.ctx.camera);
        }
        self.ctx.controls.update(&mut self.ctx.camera);

        self.dispatch_requests();

        build_frame(&self.ctx.scene, &self.ctx.camera, &mut self.frame);
        let data = FrameData::from_buffers(&self.frame, self.ctx.clock.frame_count());
        self.renderer.render(&data);
    }

    /// Viewport changed. Updates camera aspect, controls, and the renderer's output size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width as f32, height as f32) {
            self.renderer.set_size(width, height);
        }
    }

    /// Stop ticking and cancel anything in flight.
    pub fn shutdown(&mut self) {
        self.fetches.cancel_all(&mut *self.fetcher);
        self.initialized = false;
        log::info!("runner shut down");
    }

    fn dispatch_requests(&mut self) {
        let requests = self.ctx.take_requests();
        if !requests.is_empty() {
            self.fetches.dispatch(&mut *self.fetcher, requests);
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn in_flight(&self) -> usize {
        self.fetches.in_flight()
    }

    pub fn output_width(&self) -> u32 {
        self.renderer.output_size().0
    }

    pub fn output_height(&self) -> u32 {
        self.renderer.output_size().1
    }
}
