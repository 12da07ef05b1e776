//! Integer-degree sine/cosine backed by a first-quadrant lookup table.
//!
//! The table is produced by `const` evaluation: no runtime cost, no
//! floating point in the shipped code.  Fractional degrees are not
//! resolved, a [`Fixed`] angle is truncated to whole degrees first.

use std::f64::consts::PI;

use super::Fixed;

/// Entries for 0‥=90 degrees.
pub const SIN_TABLE_LEN: usize = 91;

/// Taylor series up to x¹⁹; far below Q15.16 resolution on [0, π/2].
const fn taylor_sin(x: f64) -> f64 {
    let mut sum = x;
    let mut term = x;
    let mut n = 3;
    while n < 20 {
        term = -term * x * x / ((n - 1) as f64 * n as f64);
        sum += term;
        n += 2;
    }
    sum
}

const fn build_sin_table() -> [Fixed; SIN_TABLE_LEN] {
    let mut table = [Fixed::ZERO; SIN_TABLE_LEN];
    let mut deg = 0;
    while deg < SIN_TABLE_LEN {
        let rad = deg as f64 * (PI / 180.0);
        table[deg] = Fixed::from_f32(taylor_sin(rad) as f32);
        deg += 1;
    }
    table
}

// `sin` reads the const so it stays callable from `const` items.
const SIN_LUT: [Fixed; SIN_TABLE_LEN] = build_sin_table();

/// sin(0°)‥=sin(90°).
pub static SIN_TABLE: [Fixed; SIN_TABLE_LEN] = SIN_LUT;

/// Sine of an integer angle in degrees. Any input is folded into [0, 360).
pub const fn sin(deg: i32) -> Fixed {
    let a = deg.rem_euclid(360);

    let (index, negative) = if a <= 90 {
        (a, false)
    } else if a <= 180 {
        (180 - a, false)
    } else if a <= 270 {
        (a - 180, true)
    } else {
        (360 - a, true)
    };

    let value = SIN_LUT[index as usize];
    if negative { value.wrapping_neg() } else { value }
}

/// `cos(a) = sin(90 - a)`.
pub const fn cos(deg: i32) -> Fixed {
    sin(90i32.wrapping_sub(deg))
}

/// [`sin`] of a fixed-point angle, truncated to its integer degree.
pub const fn sin_fixed(deg: Fixed) -> Fixed {
    sin(deg.to_int() as i32)
}

/// [`cos`] of a fixed-point angle, truncated to its integer degree.
pub const fn cos_fixed(deg: Fixed) -> Fixed {
    cos(deg.to_int() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints() {
        assert_eq!(SIN_TABLE[0], Fixed::ZERO);
        assert_eq!(SIN_TABLE[90], Fixed::ONE);
        assert_eq!(sin(90), Fixed::ONE);
        assert_eq!(cos(0), Fixed::ONE);
    }

    #[test]
    fn table_is_accurate_to_one_lsb() {
        for deg in 0..SIN_TABLE_LEN {
            let exact = ((deg as f64).to_radians().sin() * 65536.0).round() as i32;
            let got = SIN_TABLE[deg].raw();
            assert!((got - exact).abs() <= 1, "{deg}°: {got} vs {exact}");
        }
    }

    #[test]
    fn table_is_monotonic() {
        for pair in SIN_TABLE.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn half_turn_antisymmetry() {
        for a in 0..360 {
            assert_eq!(sin(a), -sin(a + 180), "angle {a}");
        }
    }

    #[test]
    fn cosine_is_shifted_sine() {
        for a in 0..360 {
            assert_eq!(cos(a), sin(90 - a), "angle {a}");
        }
    }

    #[test]
    fn quadrant_signs() {
        assert!(sin(45) > Fixed::ZERO);
        assert!(sin(135) > Fixed::ZERO);
        assert!(sin(225) < Fixed::ZERO);
        assert!(sin(315) < Fixed::ZERO);
        assert_eq!(sin(270), -Fixed::ONE);
        assert_eq!(cos(180), -Fixed::ONE);
    }

    #[test]
    fn negative_and_large_angles_wrap_forward() {
        assert_eq!(sin(-30), sin(330));
        assert_eq!(sin(-360), sin(0));
        assert_eq!(sin(725), sin(5));
        assert_eq!(cos(-90), cos(270));
    }

    #[test]
    fn fixed_angle_truncates_to_whole_degrees() {
        assert_eq!(sin_fixed(Fixed::from_f32(30.9)), sin(30));
        assert_eq!(cos_fixed(Fixed::from_f32(60.2)), cos(60));
    }

    #[test]
    fn usable_in_const_items() {
        const ROT_SIN: Fixed = sin(2);
        assert_eq!(ROT_SIN, SIN_TABLE[2]);
    }
}
