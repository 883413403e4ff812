pub mod app;
pub mod intents;
pub mod piece;
pub mod playfield;
pub mod render;
pub mod rng;
pub mod session;
pub mod settings;
