//! Galaxy Retro: a single-screen arcade shooter for the terminal.
//!
//! Core modules:
//! - `entities`: plain data for the player, enemies, bullets and stars
//! - `compute`: pure per-tick logic (motion, collisions, spawning)
//! - `game`: the Idle/Running driver and its collaborators
//! - `display`: raster renderer and terminal presenter
//! - `input`: keyboard and touch mapping
//! - `environment`, `persistence`, `settings`, `scheduler`: outer glue

pub mod compute;
pub mod display;
pub mod entities;
pub mod environment;
pub mod game;
pub mod input;
pub mod persistence;
pub mod scheduler;
pub mod settings;

pub use game::Game;
pub use settings::Settings;
