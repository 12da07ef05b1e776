//! Display-sink abstraction.
//!
//! *The engine never touches a frame-buffer directly.* It produces one
//! full-height [`Rgb565`] column at a time and hands it to a type that
//! implements [`ColumnSink`]: an SPI panel driver, a host window, or a
//! test closure collecting columns.

use crate::world::Rgb565;

/// Pixel format of the host frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Receives finished screen columns.
pub trait ColumnSink {
    /// Consume column `x`; `pixels[0]` is the top row.
    ///
    /// Called exactly once per column, in cursor order. The slice is only
    /// borrowed for the duration of the call.
    fn draw_column(&mut self, x: u8, pixels: &[Rgb565]);
}

/// Any `FnMut(x, pixels)` closure is a sink.
impl<F> ColumnSink for F
where
    F: FnMut(u8, &[Rgb565]),
{
    #[inline]
    fn draw_column(&mut self, x: u8, pixels: &[Rgb565]) {
        self(x, pixels)
    }
}

pub mod software;

pub use software::Framebuffer;
