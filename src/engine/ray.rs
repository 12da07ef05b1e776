//! Per-column ray construction and DDA grid traversal.
//!
//! ```text
//! camera_x = 2·x / width − 1                ∈ [-1, 1]
//! ray_dir  = dir + plane · camera_x
//! ```
//!
//! `side_dist` and `delta_dist` are both scaled by the ray-direction
//! magnitude, so the perpendicular wall distance falls out as
//! `side_dist − delta_dist` on the hit axis, with no square root and no
//! fish-eye correction.

use super::types::{RayHit, Side};
use crate::{
    fixed::{Fixed, abs},
    world::{GridView, PlayerState},
};

/// Transient DDA state; built fresh for every column.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub dir_x: Fixed,
    pub dir_y: Fixed,
    pub map_x: i16,
    pub map_y: i16,
    pub side_dist_x: Fixed,
    pub side_dist_y: Fixed,
    pub delta_dist_x: Fixed,
    pub delta_dist_y: Fixed,
    pub step_x: i16,
    pub step_y: i16,
    pub hit: bool,
    pub side: Side,
}

/// Signed camera-space offset of screen column `x`.
#[inline]
pub fn camera_x(x: u8, width: u8) -> Fixed {
    Fixed::from_int(x as i16) * 2i16 / Fixed::from_int(width as i16) - 1i16
}

/// `|1 / d|`, or [`Fixed::MAX`] when `1 / d` leaves Q15.16 (`|d|` of at
/// most two raw units, zero included) so that axis never wins.
#[inline(always)]
fn delta_dist(d: Fixed) -> Fixed {
    if d.raw().unsigned_abs() <= 2 {
        Fixed::MAX
    } else {
        abs(1i16 / d)
    }
}

impl Ray {
    /// DDA setup for a ray leaving `pos` along `dir`.
    pub fn new(pos: (Fixed, Fixed), dir: (Fixed, Fixed)) -> Self {
        let (pos_x, pos_y) = pos;
        let (dir_x, dir_y) = dir;
        let map_x = pos_x.to_int();
        let map_y = pos_y.to_int();

        let delta_dist_x = delta_dist(dir_x);
        let delta_dist_y = delta_dist(dir_y);

        let (step_x, side_dist_x) = if dir_x < Fixed::ZERO {
            (-1, (pos_x - map_x) * delta_dist_x)
        } else {
            (1, (map_x + 1 - pos_x) * delta_dist_x)
        };
        let (step_y, side_dist_y) = if dir_y < Fixed::ZERO {
            (-1, (pos_y - map_y) * delta_dist_y)
        } else {
            (1, (map_y + 1 - pos_y) * delta_dist_y)
        };

        Self {
            dir_x,
            dir_y,
            map_x,
            map_y,
            side_dist_x,
            side_dist_y,
            delta_dist_x,
            delta_dist_y,
            step_x,
            step_y,
            hit: false,
            side: Side::X,
        }
    }

    /// Ray through screen column `x` for the given pose.
    pub fn for_column(player: &PlayerState, x: u8, width: u8) -> Self {
        let cam = camera_x(x, width);
        let (dir_x, dir_y) = player.dir();
        let (plane_x, plane_y) = player.plane();
        Self::new(
            player.pos(),
            (dir_x + plane_x * cam, dir_y + plane_y * cam),
        )
    }

    /// Advance one grid-line crossing along the nearer axis.
    ///
    /// On a tie the X axis advances.
    #[inline(always)]
    pub fn advance(&mut self) {
        if self.side_dist_x <= self.side_dist_y {
            self.side_dist_x += self.delta_dist_x;
            self.map_x += self.step_x;
            self.side = Side::X;
        } else {
            self.side_dist_y += self.delta_dist_y;
            self.map_y += self.step_y;
            self.side = Side::Y;
        }
    }

    /// Step until a wall is entered; returns its tile value.
    ///
    /// Terminates as long as the grid's outer ring is solid and the ray
    /// starts inside it.
    pub fn traverse(&mut self, grid: &GridView<'_>) -> u8 {
        loop {
            self.advance();
            let tile = grid.tile_unchecked(self.map_x, self.map_y);
            if tile > 0 {
                self.hit = true;
                return tile;
            }
        }
    }

    /// Walk to the first wall and summarise the hit.
    pub fn cast(mut self, grid: &GridView<'_>) -> RayHit {
        let tile = self.traverse(grid);
        RayHit {
            map_x: self.map_x,
            map_y: self.map_y,
            tile,
            side: self.side,
            wall_dist: self.perp_wall_dist(),
            ray_dir_x: self.dir_x,
            ray_dir_y: self.dir_y,
        }
    }

    /// Perpendicular distance to the last crossed grid line.
    #[inline(always)]
    pub fn perp_wall_dist(&self) -> Fixed {
        match self.side {
            Side::X => self.side_dist_x - self.delta_dist_x,
            Side::Y => self.side_dist_y - self.delta_dist_y,
        }
    }
}

/// Cast one ray from `pos` along `dir` and report what it struck.
pub fn cast_ray(pos: (Fixed, Fixed), dir: (Fixed, Fixed), grid: &GridView<'_>) -> RayHit {
    Ray::new(pos, dir).cast(grid)
}

/// [`cast_ray`] for screen column `x`.
pub fn cast_column(player: &PlayerState, x: u8, width: u8, grid: &GridView<'_>) -> RayHit {
    Ray::for_column(player, x, width).cast(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fx(v: f32) -> Fixed {
        Fixed::from_f32(v)
    }

    #[rustfmt::skip]
    const ROOM3: [u8; 9] = [
        1, 1, 1,
        1, 0, 1,
        1, 1, 1,
    ];

    /// 5×5 ring, walls numbered so the struck cell is identifiable:
    /// column-major, `tile = 10·x + y + 1` on the border.
    fn ring5() -> Vec<u8> {
        let mut t = vec![0u8; 25];
        for x in 0..5 {
            for y in 0..5 {
                if x == 0 || y == 0 || x == 4 || y == 4 {
                    t[y + 5 * x] = (10 * x + y + 1) as u8;
                }
            }
        }
        t
    }

    #[test]
    fn camera_x_spans_minus_one_to_one() {
        assert_eq!(camera_x(0, 160), -Fixed::ONE);
        assert_eq!(camera_x(80, 160), Fixed::ZERO);
        assert!(camera_x(159, 160) < Fixed::ONE);
        assert!(camera_x(159, 160) > fx(0.98));
    }

    #[test]
    fn setup_from_cell_offset() {
        let ray = Ray::new((fx(1.25), fx(2.75)), (fx(-0.5), fx(2.0)));
        assert_eq!((ray.map_x, ray.map_y), (1, 2));
        assert_eq!((ray.step_x, ray.step_y), (-1, 1));
        assert_eq!(ray.delta_dist_x, fx(2.0));
        assert_eq!(ray.delta_dist_y, fx(0.5));
        assert_eq!(ray.side_dist_x, fx(0.5)); // 0.25 · 2
        assert_eq!(ray.side_dist_y, fx(0.125)); // 0.25 · 0.5
    }

    #[test]
    fn zero_component_uses_sentinel() {
        let ray = Ray::new((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::ZERO));
        assert_eq!(ray.delta_dist_y, Fixed::MAX);
        assert!(ray.side_dist_y > fx(10_000.0));
    }

    #[test]
    fn near_zero_component_uses_sentinel() {
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        for raw in [1, 2, -1, -2] {
            let ray = Ray::new((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::from_raw(raw)));
            assert_eq!(ray.delta_dist_y, Fixed::MAX, "raw {raw}");

            let hit = cast_ray((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::from_raw(raw)), &grid);
            assert_eq!((hit.map_x, hit.map_y, hit.side), (2, 1, Side::X), "raw {raw}");
            assert_eq!(hit.wall_dist, fx(0.5), "raw {raw}");
        }
        // smallest component whose reciprocal still fits
        let ray = Ray::new((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::from_raw(3)));
        assert!(ray.delta_dist_y > fx(20_000.0));
    }

    #[test]
    fn cardinal_hits_in_tiny_room() {
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        let centre = (fx(1.5), fx(1.5));

        let east = cast_ray(centre, (Fixed::ONE, Fixed::ZERO), &grid);
        assert_eq!((east.map_x, east.map_y, east.side), (2, 1, Side::X));
        assert_eq!(east.wall_dist, fx(0.5));

        let north = cast_ray(centre, (Fixed::ZERO, -Fixed::ONE), &grid);
        assert_eq!((north.map_x, north.map_y, north.side), (1, 0, Side::Y));
        assert_eq!(north.wall_dist, fx(0.5));
    }

    #[test]
    fn cell_edge_start_reports_one_cell() {
        // standing on the west edge of the open cell, looking east
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        let hit = cast_ray((Fixed::ONE, fx(1.5)), (Fixed::ONE, Fixed::ZERO), &grid);
        assert_eq!(hit.side, Side::X);
        assert_eq!(hit.wall_dist, Fixed::ONE);
    }

    #[test]
    fn tie_advances_x_axis() {
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        let mut ray = Ray::new((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::ONE));
        assert_eq!(ray.side_dist_x, ray.side_dist_y);

        let tile = ray.traverse(&grid);
        assert_eq!(tile, 1);
        assert_eq!(ray.side, Side::X);
        assert_eq!((ray.map_x, ray.map_y), (2, 1));
    }

    #[test]
    fn tie_break_holds_for_every_diagonal() {
        let grid = GridView::new(3, 3, &ROOM3).unwrap();
        for (dx, dy) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
            let dir = (Fixed::from_int(dx), Fixed::from_int(dy));
            let hit = cast_ray((fx(1.5), fx(1.5)), dir, &grid);
            assert_eq!(hit.side, Side::X, "dir ({dx},{dy})");
            assert_eq!((hit.map_x, hit.map_y), (1 + dx, 1), "dir ({dx},{dy})");
        }
    }

    #[test]
    fn diagonal_reaches_identified_wall() {
        let tiles = ring5();
        let grid = GridView::new(5, 5, &tiles).unwrap();
        let hit = cast_ray((fx(1.5), fx(1.5)), (fx(0.5), fx(1.0)), &grid);
        // crosses y=2, x=2, y=3, y=4 → south wall at (2,4)
        assert_eq!(hit.side, Side::Y);
        assert_eq!((hit.map_x, hit.map_y), (2, 4));
        assert_eq!(hit.tile, 25);
        assert_eq!(hit.wall_dist, fx(2.5));
    }

    #[test]
    fn traversal_terminates_from_every_interior_start() {
        let tiles = ring5();
        let grid = GridView::new(5, 5, &tiles).unwrap();
        let offsets = [0.0, 0.1, 0.5, 0.99];
        for cx in 1..4 {
            for cy in 1..4 {
                for ox in offsets {
                    for oy in offsets {
                        let pos = (fx(cx as f32 + ox), fx(cy as f32 + oy));
                        for deg in (0..360).step_by(7) {
                            let dir = (crate::fixed::cos(deg), crate::fixed::sin(deg));
                            let hit = cast_ray(pos, dir, &grid);
                            assert!(grid.contains(hit.map_x, hit.map_y));
                            assert!(hit.tile > 0);
                            assert!(hit.wall_dist >= Fixed::ZERO);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn column_ray_matches_manual_construction() {
        let tiles = ring5();
        let grid = GridView::new(5, 5, &tiles).unwrap();
        let player = PlayerState::new((fx(2.5), fx(2.5)), (Fixed::ONE, Fixed::ZERO));

        let ray = Ray::for_column(&player, 0, 160);
        let (px, py) = player.plane();
        assert_eq!(ray.dir_x, Fixed::ONE - px);
        assert_eq!(ray.dir_y, Fixed::ZERO - py);

        let centre = cast_column(&player, 80, 160, &grid);
        assert_eq!((centre.map_x, centre.map_y, centre.side), (4, 2, Side::X));
        assert_eq!(centre.wall_dist, fx(1.5));
    }
}
