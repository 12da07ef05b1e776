use bitflags::bitflags;

bitflags! {
    /// Directional intents sampled from the input source.
    ///
    /// Contradictory pairs may both be set; [`Intents::resolved`] applies the
    /// precedence the movement step uses.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Intents: u8 {
        const TURN_LEFT  = 0b0001;
        const TURN_RIGHT = 0b0010;
        const FORWARD    = 0b0100;
        const BACKWARD   = 0b1000;
    }
}

/// Analog stick reading below which an axis counts as pushed "low".
pub const STICK_LOW: u16 = 1000;
/// Analog stick reading above which an axis counts as pushed "high".
pub const STICK_HIGH: u16 = 3000;

impl Intents {
    /// Threshold a 12-bit two-axis stick (`0..4096`, centre ≈ 2048).
    ///
    /// Pushing up (low `vry`) walks forward, pushing right (high `vrx`)
    /// turns right.
    pub fn from_stick(vrx: u16, vry: u16) -> Self {
        let mut i = Self::empty();
        if vry < STICK_LOW {
            i |= Self::FORWARD;
        } else if vry > STICK_HIGH {
            i |= Self::BACKWARD;
        }
        if vrx > STICK_HIGH {
            i |= Self::TURN_RIGHT;
        } else if vrx < STICK_LOW {
            i |= Self::TURN_LEFT;
        }
        i
    }

    /// Drop the losing half of each contradictory pair: forward beats
    /// backward, right beats left.
    pub fn resolved(self) -> Self {
        let mut i = self;
        if i.contains(Self::FORWARD) {
            i.remove(Self::BACKWARD);
        }
        if i.contains(Self::TURN_RIGHT) {
            i.remove(Self::TURN_LEFT);
        }
        i
    }

    /// `+1` forward, `-1` backward, `0` idle.
    pub fn walk(self) -> i16 {
        let i = self.resolved();
        if i.contains(Self::FORWARD) {
            1
        } else if i.contains(Self::BACKWARD) {
            -1
        } else {
            0
        }
    }

    /// `+1` right, `-1` left, `0` idle.
    pub fn turn(self) -> i16 {
        let i = self.resolved();
        if i.contains(Self::TURN_RIGHT) {
            1
        } else if i.contains(Self::TURN_LEFT) {
            -1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_stick_is_idle() {
        assert!(Intents::from_stick(2048, 2048).is_empty());
        assert!(Intents::from_stick(1000, 3000).is_empty());
    }

    #[test]
    fn stick_thresholds() {
        assert_eq!(Intents::from_stick(2048, 999), Intents::FORWARD);
        assert_eq!(Intents::from_stick(2048, 3001), Intents::BACKWARD);
        assert_eq!(Intents::from_stick(3001, 2048), Intents::TURN_RIGHT);
        assert_eq!(Intents::from_stick(999, 2048), Intents::TURN_LEFT);
        assert_eq!(
            Intents::from_stick(0, 0),
            Intents::FORWARD | Intents::TURN_LEFT
        );
    }

    #[test]
    fn precedence_forward_and_right_win() {
        let all = Intents::all();
        assert_eq!(all.resolved(), Intents::FORWARD | Intents::TURN_RIGHT);
        assert_eq!(all.walk(), 1);
        assert_eq!(all.turn(), 1);
    }

    #[test]
    fn walk_and_turn_signs() {
        assert_eq!(Intents::BACKWARD.walk(), -1);
        assert_eq!(Intents::TURN_LEFT.turn(), -1);
        assert_eq!(Intents::TURN_LEFT.walk(), 0);
        assert_eq!(Intents::empty().turn(), 0);
    }
}
