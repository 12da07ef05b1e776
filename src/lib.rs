//! # yarc_rs
//!
//! Fixed-point (Q15.16) raycaster for a tile grid, sized for small
//! column-addressed displays.
//!
//! * [`fixed`]    – Q15.16 scalar and the degree sine table.
//! * [`world`]    – grid, textures, player pose.
//! * [`engine`]   – per-column ray cast, projection and texturing.
//! * [`renderer`] – display sink trait and a host frame-buffer.
//! * [`sim`]      – input intents, cadence throttle, movement.
//! * [`xip`]      – on-disk map and texture blobs, demo assets.

pub mod config;
pub mod engine;
pub mod fixed;
pub mod renderer;
pub mod sim;
pub mod world;
pub mod xip;

pub use config::{Screen, Tuning};
pub use engine::Engine;
pub use fixed::Fixed;
