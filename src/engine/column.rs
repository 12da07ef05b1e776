//! Wall projection and vertical texel scan for one screen column.

use super::{
    ray::Ray,
    types::{ColumnInfo, RayHit, Side},
};
use crate::{
    config::Screen,
    fixed::{Fixed, fractional},
    world::{
        GridView, PlayerState, Rgb565, TEX_LOG2_SIZE, TEX_MASK, TEX_SIZE, TEX_SIZE_FX,
        TextureStore,
    },
};

/// Smallest distance fed to the projection divide (1/128 cell); keeps
/// `height / dist` inside `i16` for every `u8` screen height.
pub const NEAR_CLIP: Fixed = Fixed::from_raw(1 << 9);

/// Fractional position of the hit along the struck wall face.
#[inline]
pub fn wall_offset(hit: &RayHit, pos: (Fixed, Fixed)) -> Fixed {
    let wall_x = match hit.side {
        Side::X => pos.1 + hit.wall_dist * hit.ray_dir_y,
        Side::Y => pos.0 + hit.wall_dist * hit.ray_dir_x,
    };
    fractional(wall_x)
}

/// Texture column for a hit, mirrored when the wall is seen from its
/// positive side so every face reads left-to-right.
#[inline]
pub fn texture_x(hit: &RayHit, pos: (Fixed, Fixed)) -> usize {
    let raw = (wall_offset(hit, pos) << TEX_LOG2_SIZE).to_int();
    let mirrored = match hit.side {
        Side::X => hit.ray_dir_x > Fixed::ZERO,
        Side::Y => hit.ray_dir_y < Fixed::ZERO,
    };
    let coord = if mirrored { TEX_SIZE as i16 - raw - 1 } else { raw };
    (coord & TEX_MASK as i16) as usize
}

/// Tile `N` draws texture `N - 1`; Y-facing hits take the shaded variant
/// stored right after it.
#[inline(always)]
pub fn texture_index(tile: u8, side: Side) -> usize {
    debug_assert!(tile > 0, "open tile has no texture");
    let base = tile as usize - 1;
    match side {
        Side::X => base,
        Side::Y => base + 1,
    }
}

/// Column renderer bound to a fixed screen size.
#[derive(Clone, Copy, Debug)]
pub struct Raycaster {
    screen: Screen,
}

impl Raycaster {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    #[inline(always)]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// `(line_height, draw_start, draw_end)` for a wall at `wall_dist`.
    ///
    /// The height is left unclipped so textures stay correctly scaled when
    /// the wall overflows the screen; the draw range is clamped to
    /// `[0, height - 1]`.
    pub fn project(&self, wall_dist: Fixed) -> (i16, i16, i16) {
        let h = self.screen.height as i16;
        let dist = if wall_dist < NEAR_CLIP { NEAR_CLIP } else { wall_dist };
        let line_height = (self.screen.height_fx() / dist).to_int();

        let draw_start = ((-line_height >> 1) + (h >> 1)).max(0);
        let mut draw_end = (line_height >> 1) + (h >> 1);
        if draw_end >= h {
            draw_end = h - 1;
        }
        (line_height, draw_start, draw_end)
    }

    /// Render screen column `x` into `out`.
    ///
    /// Only rows `[draw_start, draw_end)` are written; the caller owns the
    /// background in every other row.
    pub fn render_column(
        &self,
        x: u8,
        player: &PlayerState,
        grid: &GridView<'_>,
        textures: &TextureStore<'_>,
        out: &mut [Rgb565],
    ) -> ColumnInfo {
        debug_assert!(out.len() >= self.screen.height as usize);

        let hit = Ray::for_column(player, x, self.screen.width).cast(grid);
        let (line_height, draw_start, draw_end) = self.project(hit.wall_dist);

        let info = ColumnInfo {
            hit,
            line_height,
            draw_start,
            draw_end,
            tex_x: texture_x(&hit, player.pos()),
            tex_index: texture_index(hit.tile, hit.side),
        };

        if line_height <= 0 {
            return info;
        }

        debug_assert!(
            textures.column(info.tex_index, info.tex_x).is_some(),
            "tile {} at ({},{}) needs texture {}, store has {}",
            hit.tile,
            hit.map_x,
            hit.map_y,
            info.tex_index,
            textures.len()
        );
        let Some(texels) = textures.column(info.tex_index, info.tex_x) else {
            return info;
        };

        let step = TEX_SIZE_FX / Fixed::from_int(line_height);
        let wall_top = (self.screen.height as i16 - line_height) >> 1;
        let mut tex_pos = (draw_start - wall_top) * step;

        for px in &mut out[draw_start as usize..draw_end as usize] {
            let tex_y = (tex_pos.to_int() & TEX_MASK as i16) as usize;
            tex_pos += step;
            *px = texels[tex_y];
        }

        info
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
