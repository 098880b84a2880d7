use wasm_bindgen::prelude::*;

mod assembly;
mod bodies;
mod config;
mod game;
mod neo;
mod orbit;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
