//! Conquest - turn-based territory conquest with autonomous AI players

pub mod ai;
pub mod combat;
pub mod core;
pub mod game;
pub mod pathing;
pub mod world;
