// Read-only store of square wall textures.
// The engine addresses textures by index and samples one column at a time.

use crate::fixed::Fixed;

/// One texel: 16-bit **RGB565**.
pub type Rgb565 = u16;

/// log2 of the texture side; textures are always power-of-two squares so
/// texture-space coordinates wrap with a mask instead of a modulo.
pub const TEX_LOG2_SIZE: u8 = 6;
pub const TEX_SIZE: usize = 1 << TEX_LOG2_SIZE;
pub const TEX_SIZE_FX: Fixed = Fixed::from_int(TEX_SIZE as i16);
pub const TEX_MASK: usize = TEX_SIZE - 1;
/// Texels in one texture.
pub const TEX_AREA: usize = TEX_SIZE * TEX_SIZE;

/// Things that can go wrong when wrapping raw texel memory.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Texel count is not a whole number of textures.
    #[error("{0} texels is not a whole number of textures")]
    Ragged(usize),

    /// A store needs at least one texture.
    #[error("texture store is empty")]
    Empty,
}

/// Contiguous, column-major textures, `TEX_AREA` texels each.
///
/// Index bounds are checked here, once per lookup, never inside the
/// per-row sampling loop.
#[derive(Clone, Copy, Debug)]
pub struct TextureStore<'a> {
    texels: &'a [Rgb565],
    count: usize,
}

impl<'a> TextureStore<'a> {
    pub fn new(texels: &'a [Rgb565]) -> Result<Self, TextureError> {
        if texels.is_empty() {
            return Err(TextureError::Empty);
        }
        if texels.len() % TEX_AREA != 0 {
            return Err(TextureError::Ragged(texels.len()));
        }
        Ok(Self {
            texels,
            count: texels.len() / TEX_AREA,
        })
    }

    /// For texel blocks already known to be a non-empty whole number of
    /// textures.
    pub(crate) fn from_validated(texels: &'a [Rgb565]) -> Self {
        debug_assert!(!texels.is_empty() && texels.len() % TEX_AREA == 0);
        Self {
            texels,
            count: texels.len() / TEX_AREA,
        }
    }

    /// Number of textures.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whole texture `index`, column-major.
    #[inline]
    pub fn texture(&self, index: usize) -> Option<&'a [Rgb565]> {
        if index >= self.count {
            return None;
        }
        let start = index * TEX_AREA;
        Some(&self.texels[start..start + TEX_AREA])
    }

    /// Vertical strip `column` of texture `index` (`TEX_SIZE` texels).
    /// `column` wraps into `0..TEX_SIZE`.
    #[inline]
    pub fn column(&self, index: usize, column: usize) -> Option<&'a [Rgb565]> {
        let start = (column & TEX_MASK) * TEX_SIZE;
        self.texture(index).map(|t| &t[start..start + TEX_SIZE])
    }
}

/*──────────────────────────── colour helpers ───────────────────────────*/

/// Pack 8-bit channels into RGB565.
#[inline]
pub const fn rgb565(r: u8, g: u8, b: u8) -> Rgb565 {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

/// Expand RGB565 into `0x00RRGGBB`, replicating high bits into the gaps.
#[inline]
pub const fn rgb565_to_rgb888(c: Rgb565) -> u32 {
    let r = ((c >> 11) & 0x1F) as u32;
    let g = ((c >> 5) & 0x3F) as u32;
    let b = (c & 0x1F) as u32;
    let r = (r << 3) | (r >> 2);
    let g = (g << 2) | (g >> 4);
    let b = (b << 3) | (b >> 2);
    (r << 16) | (g << 8) | b
}

/// Scale every channel by `num / den` (used to bake shaded variants).
pub const fn darken(c: Rgb565, num: u16, den: u16) -> Rgb565 {
    let r = ((c >> 11) & 0x1F) * num / den;
    let g = ((c >> 5) & 0x3F) * num / den;
    let b = (c & 0x1F) * num / den;
    (r << 11) | (g << 5) | b
}
