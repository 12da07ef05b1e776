use log::{Level, log_enabled, trace};
use std::time::Instant;

use crate::{
    config::Screen,
    engine::{column::Raycaster, types::ColumnInfo},
    renderer::ColumnSink,
    world::{GridView, PlayerState, Rgb565, TextureStore},
};

/// Column cursor driving a [`Raycaster`] into a [`ColumnSink`].
///
/// The grid and texture store are borrowed for the engine's lifetime and
/// never mutated; the player pose is passed in per call so the caller
/// controls when a snapshot is taken.
pub struct Engine<'a, S: ColumnSink> {
    raycaster: Raycaster,
    grid: GridView<'a>,
    textures: TextureStore<'a>,
    sink: S,
    column: u8,
    buffer: Vec<Rgb565>,
    background: Rgb565,
}

impl<'a, S: ColumnSink> Engine<'a, S> {
    pub fn new(screen: Screen, grid: GridView<'a>, textures: TextureStore<'a>, sink: S) -> Self {
        debug_assert!(screen.width > 0 && screen.height > 0);
        Self {
            raycaster: Raycaster::new(screen),
            grid,
            textures,
            sink,
            column: 0,
            buffer: vec![0; screen.height as usize],
            background: 0,
        }
    }

    /// Colour left in rows the wall does not cover.
    pub fn with_background(mut self, colour: Rgb565) -> Self {
        self.background = colour;
        self
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.raycaster.screen()
    }

    #[inline]
    pub fn grid(&self) -> &GridView<'a> {
        &self.grid
    }

    /// Column the next [`Engine::step`] renders.
    #[inline]
    pub fn column(&self) -> u8 {
        self.column
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Render the column under the cursor, hand it to the sink and advance
    /// the cursor, wrapping to 0 after the last column.
    pub fn step(&mut self, player: &PlayerState) -> ColumnInfo {
        let x = self.column;
        let t0 = log_enabled!(Level::Trace).then(Instant::now);

        self.buffer.fill(self.background);
        let info =
            self.raycaster
                .render_column(x, player, &self.grid, &self.textures, &mut self.buffer);

        let t1 = t0.map(|_| Instant::now());
        self.sink.draw_column(x, &self.buffer);

        if let (Some(t0), Some(t1)) = (t0, t1) {
            trace!(
                "column {x}: math {} us, sink {} us",
                (t1 - t0).as_micros(),
                t1.elapsed().as_micros()
            );
        }

        self.column = if x + 1 >= self.screen().width { 0 } else { x + 1 };
        info
    }

    /// One full sweep of `screen.width` columns starting at the cursor.
    pub fn render_frame(&mut self, player: &PlayerState) {
        for _ in 0..self.screen().width {
            self.step(player);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixed::Fixed, world::TEX_AREA};

    #[rustfmt::skip]
    const ROOM3: [u8; 9] = [
        1, 1, 1,
        1, 0, 1,
        1, 1, 1,
    ];

    fn textures() -> Vec<Rgb565> {
        let mut v = vec![0x1111; TEX_AREA];
        v.extend(std::iter::repeat_n(0x2222, TEX_AREA));
        v
    }

    fn centre_east() -> PlayerState {
        PlayerState::new(
            (Fixed::from_f32(1.5), Fixed::from_f32(1.5)),
            (Fixed::ONE, Fixed::ZERO),
        )
    }

    #[test]
    fn cursor_wraps_after_last_column() {
        let texels = textures();
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        let store = TextureStore::new(&texels).unwrap();
        let mut seen = Vec::new();
        let mut engine = Engine::new(Screen::new(3, 8), grid, store, |x: u8, _: &[Rgb565]| {
            seen.push(x)
        });

        let player = centre_east();
        for _ in 0..7 {
            engine.step(&player);
        }
        assert_eq!(engine.column(), 1);
        drop(engine);
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn frame_starts_at_cursor() {
        let texels = textures();
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        let store = TextureStore::new(&texels).unwrap();
        let mut seen = Vec::new();
        let mut engine = Engine::new(Screen::new(4, 8), grid, store, |x: u8, _: &[Rgb565]| {
            seen.push(x)
        });

        let player = centre_east();
        engine.step(&player);
        engine.render_frame(&player);
        assert_eq!(engine.column(), 1);
        drop(engine);
        assert_eq!(seen, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn background_fills_uncovered_rows() {
        let texels = textures();
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        let store = TextureStore::new(&texels).unwrap();
        let mut cols: Vec<Vec<Rgb565>> = Vec::new();
        let mut engine = Engine::new(Screen::new(2, 16), grid, store, |_: u8, px: &[Rgb565]| {
            cols.push(px.to_vec())
        })
        .with_background(0xBEEF);

        // centre column at distance 0.5: wall covers rows 0..15, row 15 is left
        engine.step(&centre_east());
        let info = engine.step(&centre_east());
        assert_eq!(info.hit.wall_dist, Fixed::HALF);
        assert_eq!((info.draw_start, info.draw_end), (0, 15));
        drop(engine);

        let centre = &cols[1];
        assert_eq!(centre.len(), 16);
        assert!(centre[..15].iter().all(|&c| c == 0x1111));
        assert_eq!(centre[15], 0xBEEF);
    }

    #[test]
    fn buffer_is_refilled_each_column() {
        let texels = textures();
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        let store = TextureStore::new(&texels).unwrap();
        let mut last_rows = Vec::new();
        let mut engine = Engine::new(Screen::new(2, 16), grid, store, |_: u8, px: &[Rgb565]| {
            last_rows.push(px[15])
        });

        engine.render_frame(&centre_east());
        engine.render_frame(&centre_east());
        drop(engine);
        assert!(last_rows.iter().all(|&c| c == 0));
    }
}
