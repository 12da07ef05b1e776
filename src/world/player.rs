use crate::config::FOV_SCALE;
use crate::fixed::{Fixed, cos, sin};

/// Player pose in grid units.
///
/// * `pos`   – position, one unit per tile.
/// * `dir`   – facing vector (≈ unit length).
/// * `plane` – camera plane, always `(-dir.y, dir.x) * fov_scale`.
///   Derived; it is refreshed on every direction change and never set
///   on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pos_x: Fixed,
    pos_y: Fixed,
    dir_x: Fixed,
    dir_y: Fixed,
    plane_x: Fixed,
    plane_y: Fixed,
    fov_scale: Fixed,
}

impl PlayerState {
    /// Pose with the default field of view.
    pub fn new(pos: (Fixed, Fixed), dir: (Fixed, Fixed)) -> Self {
        Self::with_fov(pos, dir, FOV_SCALE)
    }

    pub fn with_fov(pos: (Fixed, Fixed), dir: (Fixed, Fixed), fov_scale: Fixed) -> Self {
        let mut p = Self {
            pos_x: pos.0,
            pos_y: pos.1,
            dir_x: Fixed::ZERO,
            dir_y: Fixed::ZERO,
            plane_x: Fixed::ZERO,
            plane_y: Fixed::ZERO,
            fov_scale,
        };
        p.set_dir(dir.0, dir.1);
        p
    }

    /*──────────────────────────── accessors ───────────────────────────*/

    #[inline(always)]
    pub fn pos(&self) -> (Fixed, Fixed) {
        (self.pos_x, self.pos_y)
    }

    #[inline(always)]
    pub fn dir(&self) -> (Fixed, Fixed) {
        (self.dir_x, self.dir_y)
    }

    #[inline(always)]
    pub fn plane(&self) -> (Fixed, Fixed) {
        (self.plane_x, self.plane_y)
    }

    #[inline(always)]
    pub fn fov_scale(&self) -> Fixed {
        self.fov_scale
    }

    /// Cell the player stands in.
    #[inline(always)]
    pub fn cell(&self) -> (i16, i16) {
        (self.pos_x.to_int(), self.pos_y.to_int())
    }

    /*──────────────────────────── mutation ────────────────────────────*/

    pub fn set_pos(&mut self, x: Fixed, y: Fixed) {
        self.pos_x = x;
        self.pos_y = y;
    }

    /// Replace the facing vector and re-derive the camera plane.
    pub fn set_dir(&mut self, x: Fixed, y: Fixed) {
        self.dir_x = x;
        self.dir_y = y;
        self.plane_x = -y * self.fov_scale;
        self.plane_y = x * self.fov_scale;
    }

    /// Rotate the facing vector by `degrees` (positive = toward the `+plane`
    /// side, i.e. screen-right).
    pub fn turn(&mut self, degrees: i16) {
        let (s, c) = (sin(degrees as i32), cos(degrees as i32));
        let (x, y) = (self.dir_x, self.dir_y);
        self.set_dir(x * c - y * s, x * s + y * c);
    }
}
