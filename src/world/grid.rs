/// Read-only view over a rectangular tile grid.
///
/// * Tiles are bytes stored **column-major** (`index = y + height * x`),
///   the order both the DDA walk and the vertical wall scan touch them.
/// * `0` is open floor; `N > 0` is a wall drawn with texture `N - 1`.
/// * The outer ring is expected to be solid so ray traversal always stops
///   inside the array; the map loader rejects grids that break this.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    width: u8,
    height: u8,
    tiles: &'a [u8],
}

impl<'a> GridView<'a> {
    /// Returns `None` when `tiles.len() != width * height`.
    pub fn new(width: u8, height: u8, tiles: &'a [u8]) -> Option<Self> {
        (tiles.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            tiles,
        })
    }

    /// For blobs whose dimensions were already checked by the loader.
    pub(crate) fn from_validated(width: u8, height: u8, tiles: &'a [u8]) -> Self {
        debug_assert_eq!(tiles.len(), width as usize * height as usize);
        Self {
            width,
            height,
            tiles,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline(always)]
    pub fn tiles(&self) -> &'a [u8] {
        self.tiles
    }

    #[inline(always)]
    pub fn contains(&self, x: i16, y: i16) -> bool {
        (0..self.width as i16).contains(&x) && (0..self.height as i16).contains(&y)
    }

    /// Tile at `(x, y)`, or `0` ("no wall") outside the grid.
    #[inline]
    pub fn tile(&self, x: i16, y: i16) -> u8 {
        if !self.contains(x, y) {
            return 0;
        }
        self.tile_unchecked(x, y)
    }

    /// Tile at `(x, y)` without the soft bounds test.
    ///
    /// Only for callers that already know `(x, y)` is inside, e.g. the DDA
    /// loop on a closed grid.  Debug builds assert it; release builds still
    /// panic on a slice overrun rather than read foreign memory.
    #[inline(always)]
    pub fn tile_unchecked(&self, x: i16, y: i16) -> u8 {
        debug_assert!(self.contains(x, y), "tile ({x},{y}) outside grid");
        self.tiles[y as usize + self.height as usize * x as usize]
    }

    #[inline(always)]
    pub fn is_open(&self, x: i16, y: i16) -> bool {
        self.tile(x, y) == 0
    }

    /// First cell of the outer ring that is not a wall, if any.
    pub fn find_border_gap(&self) -> Option<(u8, u8)> {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return None;
        }
        let ring = (0..w)
            .flat_map(|x| [(x, 0), (x, h - 1)])
            .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));

        for (x, y) in ring {
            if self.tile_unchecked(x as i16, y as i16) == 0 {
                return Some((x, y));
            }
        }
        None
    }

    /// Largest tile value present.
    pub fn max_tile(&self) -> u8 {
        self.tiles.iter().copied().max().unwrap_or(0)
    }
}
