//! Game module: owns the scene and runs the per-frame pass sequence.

mod game;

pub use game::Game;
