//! Runtime configuration shared by the engine, the simulation and the
//! binaries.  Defaults match a 160×128 SPI panel.

use std::time::Duration;

use crate::fixed::Fixed;

/// Constants that depend on the *display*, not on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Screen {
    pub width: u8,
    pub height: u8,
}

impl Screen {
    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    #[inline(always)]
    pub fn width_fx(self) -> Fixed {
        Fixed::from_int(self.width as i16)
    }

    #[inline(always)]
    pub fn height_fx(self) -> Fixed {
        Fixed::from_int(self.height as i16)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(160, 128)
    }
}

/// Player handling parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    /// Distance covered by one move intent, in cells.
    pub move_step: Fixed,
    /// How many `move_step`s ahead the destination probe looks.
    pub collision_lookahead: i16,
    /// Rotation applied by one turn intent.
    pub turn_degrees: i16,
    /// Camera plane length relative to the direction vector.
    pub fov_scale: Fixed,
    /// Minimum time between two intent batches.
    pub input_interval: Duration,
}

pub const MOVE_STEP: Fixed = Fixed::from_f32(0.05);
pub const COLLISION_LOOKAHEAD: i16 = 10;
pub const TURN_DEGREES: i16 = 2;
pub const FOV_SCALE: Fixed = Fixed::from_f32(0.66667);
pub const INPUT_INTERVAL: Duration = Duration::from_micros(15_000);

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_step: MOVE_STEP,
            collision_lookahead: COLLISION_LOOKAHEAD,
            turn_degrees: TURN_DEGREES,
            fov_scale: FOV_SCALE,
            input_interval: INPUT_INTERVAL,
        }
    }
}
