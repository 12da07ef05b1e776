//! Intent application: axis-separated walking and fixed-angle turning.
//!
//! Each axis is probed on its own, so a diagonal push against a wall keeps
//! sliding along the open axis. X is probed and applied first; the Y probe
//! uses the already-updated X.

use super::Intents;
use crate::{config::Tuning, fixed::Fixed, world::{GridView, PlayerState}};

/// Walk `sign` (+1 forward, -1 backward) steps along the facing vector.
///
/// Returns `(moved_x, moved_y)`.
pub fn try_walk(
    player: &mut PlayerState,
    grid: &GridView<'_>,
    sign: i16,
    tuning: &Tuning,
) -> (bool, bool) {
    let (dir_x, dir_y) = player.dir();
    let (mut x, mut y) = player.pos();

    let step_x = dir_x * sign * tuning.move_step;
    let step_y = dir_y * sign * tuning.move_step;
    let probe_x = step_x * tuning.collision_lookahead;
    let probe_y = step_y * tuning.collision_lookahead;

    let moved_x = grid.is_open((x + probe_x).to_int(), y.to_int());
    if moved_x {
        x += step_x;
    }
    let moved_y = grid.is_open(x.to_int(), (y + probe_y).to_int());
    if moved_y {
        y += step_y;
    }

    player.set_pos(x, y);
    (moved_x, moved_y)
}

/// Apply one batch of intents: walk first, then turn.
///
/// Returns `true` when the pose changed.
pub fn apply_intents(
    player: &mut PlayerState,
    grid: &GridView<'_>,
    intents: Intents,
    tuning: &Tuning,
) -> bool {
    let before = *player;

    let walk = intents.walk();
    if walk != 0 {
        try_walk(player, grid, walk, tuning);
    }

    let turn = intents.turn();
    if turn != 0 {
        player.turn(turn * tuning.turn_degrees);
    }

    *player != before
}

/// Distance the destination probe looks ahead per move.
#[inline]
pub fn probe_distance(tuning: &Tuning) -> Fixed {
    tuning.move_step * tuning.collision_lookahead
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MOVE_STEP, TURN_DEGREES};

    fn fx(v: f32) -> Fixed {
        Fixed::from_f32(v)
    }

    /// 4×3, open cells (1,1) and (2,1) only.
    fn corridor() -> Vec<u8> {
        let mut t = vec![1u8; 12];
        t[1 + 3] = 0;
        t[1 + 3 * 2] = 0;
        t
    }

    #[test]
    fn slides_along_open_axis() {
        let tiles = corridor();
        let grid = GridView::new(4, 3, &tiles).unwrap();
        let mut p = PlayerState::new((fx(1.9), fx(1.9)), (fx(0.6), fx(0.8)));

        let (mx, my) = try_walk(&mut p, &grid, 1, &Tuning::default());
        assert!(mx);
        assert!(!my);
        let expected_x = fx(1.9) + fx(0.6) * 1i16 * MOVE_STEP;
        assert_eq!(p.pos(), (expected_x, fx(1.9)));
    }

    #[test]
    fn open_floor_moves_both_axes() {
        let tiles = corridor();
        let grid = GridView::new(4, 3, &tiles).unwrap();
        let mut p = PlayerState::new((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::ZERO));

        assert!(apply_intents(&mut p, &grid, Intents::FORWARD, &Tuning::default()));
        assert_eq!(p.pos(), (fx(1.5) + MOVE_STEP, fx(1.5)));
    }

    #[test]
    fn wall_within_probe_blocks() {
        let tiles = corridor();
        let grid = GridView::new(4, 3, &tiles).unwrap();
        // 0.4 from the east wall: the probe (0.5) reaches it
        let mut p = PlayerState::new((fx(2.6), fx(1.5)), (Fixed::ONE, Fixed::ZERO));

        let before = p;
        assert!(!apply_intents(&mut p, &grid, Intents::FORWARD, &Tuning::default()));
        assert_eq!(p, before);
    }

    #[test]
    fn backward_reverses_step() {
        let tiles = corridor();
        let grid = GridView::new(4, 3, &tiles).unwrap();
        let mut p = PlayerState::new((fx(2.0), fx(1.5)), (Fixed::ONE, Fixed::ZERO));

        apply_intents(&mut p, &grid, Intents::BACKWARD, &Tuning::default());
        assert_eq!(p.pos().0, fx(2.0) - MOVE_STEP);
    }

    #[test]
    fn forward_wins_over_backward() {
        let tiles = corridor();
        let grid = GridView::new(4, 3, &tiles).unwrap();
        let mut p = PlayerState::new((fx(2.0), fx(1.5)), (Fixed::ONE, Fixed::ZERO));

        apply_intents(
            &mut p,
            &grid,
            Intents::FORWARD | Intents::BACKWARD,
            &Tuning::default(),
        );
        assert_eq!(p.pos().0, fx(2.0) + MOVE_STEP);
    }

    #[test]
    fn turning_matches_player_rotation() {
        let tiles = corridor();
        let grid = GridView::new(4, 3, &tiles).unwrap();
        let start = PlayerState::new((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::ZERO));

        let mut right = start;
        assert!(apply_intents(&mut right, &grid, Intents::TURN_RIGHT, &Tuning::default()));
        let mut expected = start;
        expected.turn(TURN_DEGREES);
        assert_eq!(right, expected);

        let mut left = start;
        apply_intents(&mut left, &grid, Intents::TURN_LEFT, &Tuning::default());
        expected = start;
        expected.turn(-TURN_DEGREES);
        assert_eq!(left, expected);
        assert!(left.dir().1 < Fixed::ZERO);
        assert!(right.dir().1 > Fixed::ZERO);
    }

    #[test]
    fn idle_intents_leave_pose() {
        let tiles = corridor();
        let grid = GridView::new(4, 3, &tiles).unwrap();
        let mut p = PlayerState::new((fx(1.5), fx(1.5)), (Fixed::ONE, Fixed::ZERO));
        assert!(!apply_intents(&mut p, &grid, Intents::empty(), &Tuning::default()));
    }

    #[test]
    fn probe_is_half_a_cell_by_default() {
        let d = probe_distance(&Tuning::default());
        assert!((d.to_f32() - 0.5).abs() < 0.001);
    }
}
