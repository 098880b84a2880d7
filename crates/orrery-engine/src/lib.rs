pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::fetch::{FetchError, FetchQueue, FetchReply, FetchRequest, Fetcher};
pub use api::types::{ObjectId, RequestId};
pub use components::mesh::{Color, Geometry, Material};
pub use components::object::SceneObject;
pub use core::scene::Scene;
pub use core::task::{CancelToken, Mailbox, Postbox};
pub use core::time::FrameClock;
pub use renderer::camera::{CameraConfig, CameraUniform, PerspectiveCamera};
pub use renderer::controls::OrbitControls;
pub use renderer::instance::{FrameBuffers, MeshInstance, PointBatch};
pub use renderer::traits::{FrameData, Renderer};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_frame;
pub use systems::scatter::{scatter_belt, scatter_cube, BeltSample, BeltSpec};
