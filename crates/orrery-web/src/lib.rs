pub mod fetch;
pub mod runner;
pub mod shared;

pub use fetch::BrowserFetcher;
pub use runner::{apply_config, GameRunner};
pub use shared::SharedBufferRenderer;

#[doc(hidden)]
pub use orrery_engine as __engine;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// This macro generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, input handlers, frame buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery_engine::Game` and `Default`
/// - `$game_name`: A string literal used in log messages
///
/// Calls made before `game_init` (or after `game_shutdown` for the lifecycle
/// calls) are ignored; accessors then return zero.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call game_init() first", $game_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init(config_json: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut game = <$game_type>::default();
            $crate::apply_config(&mut game, config_json);
            let mut runner = $crate::GameRunner::new(game);
            runner.init();

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(now_ms: f64) {
            with_runner(|r| r.tick(now_ms));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: u32, height: u32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, button: u8) {
            let button = $crate::__engine::PointerButton::from_dom(button);
            with_runner(|r| r.push_input($crate::__engine::InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::__engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::__engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) {
            with_runner(|r| r.push_input($crate::__engine::InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn game_shutdown() {
            with_runner(|r| r.shutdown());
            log::info!("{}: shut down", $game_name);
        }

        // ---- Frame buffer accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_mesh_count() -> u32 {
            with_runner(|r| r.mesh_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_point_count() -> u32 {
            with_runner(|r| r.point_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_points_generation() -> u32 {
            with_runner(|r| r.points_generation()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_output_width() -> u32 {
            with_runner(|r| r.output_width()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_output_height() -> u32 {
            with_runner(|r| r.output_height()).unwrap_or(0)
        }
    };
}
