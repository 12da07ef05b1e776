//! ---------------------------------------------------------------------------
//! Host column sink
//!
//! * Collects RGB565 columns into a row-major `Vec<u32>` in **0x00RRGGBB**
//!   format, the layout `minifb` expects.
//! * [`Framebuffer::present`] loans the finished buffer to a closure, so the
//!   window update stays at the call-site.
//! ---------------------------------------------------------------------------

use crate::{
    config::Screen,
    renderer::{ColumnSink, Rgba},
    world::{Rgb565, rgb565_to_rgb888},
};

/// Row-major host frame-buffer fed column by column.
pub struct Framebuffer {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Framebuffer {
    pub fn new(screen: Screen) -> Self {
        let width = screen.width as usize;
        let height = screen.height as usize;
        Self {
            scratch: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn buffer(&self) -> &[Rgba] {
        &self.scratch
    }

    /// Host colour at `(x, y)`, `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.scratch[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self, colour: Rgba) {
        self.scratch.fill(colour);
    }

    /// Loan the buffer to `submit(&[Rgba], w, h)`.
    ///
    /// A windowed caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    pub fn present<F, R>(&self, submit: F) -> R
    where
        F: FnOnce(&[Rgba], usize, usize) -> R,
    {
        submit(&self.scratch, self.width, self.height)
    }
}

/*──────────────────────── ColumnSink impl ────────────────────────*/
impl ColumnSink for Framebuffer {
    fn draw_column(&mut self, x: u8, pixels: &[Rgb565]) {
        let x = x as usize;
        if x >= self.width {
            return;
        }
        for (y, &c) in pixels.iter().take(self.height).enumerate() {
            self.scratch[y * self.width + x] = rgb565_to_rgb888(c);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lands_row_major() {
        let mut fb = Framebuffer::new(Screen::new(4, 3));
        fb.draw_column(2, &[0xF800, 0x07E0, 0x001F]);

        assert_eq!(fb.pixel(2, 0), Some(0x00FF_0000));
        assert_eq!(fb.pixel(2, 1), Some(0x0000_FF00));
        assert_eq!(fb.pixel(2, 2), Some(0x0000_00FF));
        assert_eq!(fb.pixel(1, 0), Some(0));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn out_of_range_column_is_ignored() {
        let mut fb = Framebuffer::new(Screen::new(2, 2));
        fb.draw_column(7, &[0xFFFF, 0xFFFF]);
        assert!(fb.buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn present_loans_dimensions() {
        let fb = Framebuffer::new(Screen::new(5, 7));
        let (len, w, h) = fb.present(|buf, w, h| (buf.len(), w, h));
        assert_eq!((len, w, h), (35, 5, 7));
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |x: u8, px: &[Rgb565]| seen.push((x, px.len()));
        sink.draw_column(3, &[0; 10]);
        sink.draw_column(4, &[0; 10]);
        assert_eq!(seen, vec![(3, 10), (4, 10)]);
    }
}
