pub mod fetch;
pub mod game;
pub mod types;
