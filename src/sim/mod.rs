mod input;
mod movement;
mod tic;

pub use input::{Intents, STICK_HIGH, STICK_LOW};
pub use movement::{apply_intents, probe_distance, try_walk};
pub use tic::InputThrottle;
