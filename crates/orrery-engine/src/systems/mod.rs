pub mod render;
pub mod scatter;
