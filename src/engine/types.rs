use crate::fixed::Fixed;

/// Which family of grid lines the ray crossed last.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Side {
    /// Crossed a vertical line (x changed): an X-facing wall.
    #[default]
    X = 0,
    /// Crossed a horizontal line (y changed): a Y-facing wall, drawn with
    /// the shaded texture variant.
    Y = 1,
}

/// Result of walking one ray through the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub map_x: i16,
    pub map_y: i16,
    /// Non-zero tile value of the struck cell.
    pub tile: u8,
    pub side: Side,
    /// Perpendicular (fish-eye free) distance to the wall.
    pub wall_dist: Fixed,
    pub ray_dir_x: Fixed,
    pub ray_dir_y: Fixed,
}

/// Everything the column renderer derived for one screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnInfo {
    pub hit: RayHit,
    /// Unclipped projected wall height in pixels.
    pub line_height: i16,
    /// First painted row.
    pub draw_start: i16,
    /// One past the last painted row.
    pub draw_end: i16,
    /// Texture column sampled, after mirroring.
    pub tex_x: usize,
    /// Texture index sampled, after shading substitution.
    pub tex_index: usize,
}
