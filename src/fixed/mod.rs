//! Q15.16 fixed-point scalar.
//!
//! * 1 sign bit, 15 integer bits, 16 fractional bits.
//! * Range `[-32768.0, +32767.99998]`, resolution `1/65536`.
//! * Every operator wraps on overflow; nothing is clamped.
//!
//! Two construction paths exist and are kept apart on purpose:
//! [`Fixed::from_int`] / [`Fixed::from_f32`] convert a *value*, while
//! [`Fixed::from_raw`] adopts an already scaled bit pattern untouched.

mod trig;

pub use trig::{SIN_TABLE, SIN_TABLE_LEN, cos, cos_fixed, sin, sin_fixed};

use std::{
    cmp::Ordering,
    fmt,
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
        DivAssign, Mul, MulAssign, Neg, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
    },
};

/// Number of fractional bits.
pub const FRAC_BITS: u8 = 16;

/// Mask selecting the integer part of a raw value.
pub const INT_MASK: i32 = !0xFFFF;

/// Q15.16 fixed-point number.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(1 << FRAC_BITS);
    pub const HALF: Fixed = Fixed(1 << (FRAC_BITS - 1));
    /// Largest representable value; doubles as the "effectively infinite" sentinel.
    pub const MAX: Fixed = Fixed(i32::MAX);
    pub const MIN: Fixed = Fixed(i32::MIN);

    /*──────────────────────── constructors ────────────────────────*/

    /// Integer value `n`. Values outside `i16` are not representable.
    #[inline(always)]
    pub const fn from_int(n: i16) -> Self {
        Self((n as i32) << FRAC_BITS)
    }

    /// Real value `v`, rounded to nearest (ties away from zero).
    ///
    /// Meant for constants; hot paths never touch floats.
    pub const fn from_f32(v: f32) -> Self {
        let scaled = v * (1 << FRAC_BITS) as f32;
        if scaled >= 0.0 {
            Self((scaled + 0.5) as i32)
        } else {
            Self((scaled - 0.5) as i32)
        }
    }

    /// Adopt a pre-scaled bit pattern as-is.
    #[inline(always)]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /*──────────────────────── conversions ─────────────────────────*/

    #[inline(always)]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Integer part via arithmetic shift (rounds toward −∞ for negative
    /// non-integers), truncated to 16 bits.
    #[inline(always)]
    pub const fn to_int(self) -> i16 {
        (self.0 >> FRAC_BITS) as i16
    }

    /// Diagnostics only: may be slow or unavailable on FPU-less targets.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / (1 << FRAC_BITS) as f32
    }

    /*──────────────────── const-friendly helpers ──────────────────*/

    #[inline(always)]
    pub const fn wrapping_neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }

    #[inline(always)]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Same as `self * rhs` but usable in `const` items.
    #[inline(always)]
    pub const fn mul_const(self, rhs: Fixed) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) >> FRAC_BITS) as i32)
    }

    /// Quotient that never traps: a zero divisor yields [`Fixed::MAX`] (or
    /// [`Fixed::MIN`] for a negative dividend).
    #[inline(always)]
    pub const fn div_const(self, rhs: Fixed) -> Self {
        if rhs.0 == 0 {
            return if self.0 < 0 { Self::MIN } else { Self::MAX };
        }
        Self((((self.0 as i64) << FRAC_BITS) / rhs.0 as i64) as i32)
    }
}

/*────────────────────────── free functions ──────────────────────────*/

/// Clears the fractional bits of the magnitude, keeping the sign
/// (`floor(-1.25) == -1.0`).
#[inline(always)]
pub const fn floor(x: Fixed) -> Fixed {
    if x.0 < 0 {
        Fixed((x.0.wrapping_neg() & INT_MASK).wrapping_neg())
    } else {
        Fixed(x.0 & INT_MASK)
    }
}

/// `x - floor(x)`. Carries the sign of `x`: `fractional(-1.25) == -0.25`.
#[inline(always)]
pub const fn fractional(x: Fixed) -> Fixed {
    Fixed(x.0.wrapping_sub(floor(x).0))
}

#[inline(always)]
pub const fn abs(x: Fixed) -> Fixed {
    if x.0 < 0 { x.wrapping_neg() } else { x }
}

/*──────────────────────────── formatting ────────────────────────────*/

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({} / raw {:#010x})", self.to_f32(), self.0)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl From<i16> for Fixed {
    #[inline(always)]
    fn from(n: i16) -> Self {
        Self::from_int(n)
    }
}

/*──────────────────────── fixed ∘ fixed ops ─────────────────────────*/

impl Add for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn mul(self, rhs: Fixed) -> Fixed {
        self.mul_const(rhs)
    }
}

impl Div for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn div(self, rhs: Fixed) -> Fixed {
        self.div_const(rhs)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn neg(self) -> Fixed {
        self.wrapping_neg()
    }
}

macro_rules! assign_op {
    ($tr:ident, $f:ident, $op:tt, $rhs:ty) => {
        impl $tr<$rhs> for Fixed {
            #[inline(always)]
            fn $f(&mut self, rhs: $rhs) {
                *self = *self $op rhs;
            }
        }
    };
}

assign_op!(AddAssign, add_assign, +, Fixed);
assign_op!(SubAssign, sub_assign, -, Fixed);
assign_op!(MulAssign, mul_assign, *, Fixed);
assign_op!(DivAssign, div_assign, /, Fixed);

/*───────────────────────── mixed fixed ∘ i16 ─────────────────────────*/

impl Add<i16> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn add(self, rhs: i16) -> Fixed {
        self + Fixed::from_int(rhs)
    }
}

impl Add<Fixed> for i16 {
    type Output = Fixed;
    #[inline(always)]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed::from_int(self) + rhs
    }
}

impl Sub<i16> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn sub(self, rhs: i16) -> Fixed {
        self - Fixed::from_int(rhs)
    }
}

impl Sub<Fixed> for i16 {
    type Output = Fixed;
    #[inline(always)]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed::from_int(self) - rhs
    }
}

// The integer operand is never scaled: (a·2¹⁶)·b needs no correction.
impl Mul<i16> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn mul(self, rhs: i16) -> Fixed {
        Fixed(self.0.wrapping_mul(rhs as i32))
    }
}

impl Mul<Fixed> for i16 {
    type Output = Fixed;
    #[inline(always)]
    fn mul(self, rhs: Fixed) -> Fixed {
        rhs * self
    }
}

impl Div<i16> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn div(self, rhs: i16) -> Fixed {
        self / Fixed::from_int(rhs)
    }
}

impl Div<Fixed> for i16 {
    type Output = Fixed;
    #[inline(always)]
    fn div(self, rhs: Fixed) -> Fixed {
        Fixed::from_int(self) / rhs
    }
}

assign_op!(AddAssign, add_assign, +, i16);
assign_op!(SubAssign, sub_assign, -, i16);
assign_op!(MulAssign, mul_assign, *, i16);

impl PartialEq<i16> for Fixed {
    #[inline(always)]
    fn eq(&self, rhs: &i16) -> bool {
        *self == Fixed::from_int(*rhs)
    }
}

impl PartialOrd<i16> for Fixed {
    #[inline(always)]
    fn partial_cmp(&self, rhs: &i16) -> Option<Ordering> {
        Some(self.cmp(&Fixed::from_int(*rhs)))
    }
}

/*──────────────────────────── bitwise ──────────────────────────────*/

impl Shl<u8> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn shl(self, shift: u8) -> Fixed {
        Fixed(self.0.wrapping_shl(shift as u32))
    }
}

impl Shr<u8> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn shr(self, shift: u8) -> Fixed {
        Fixed(self.0.wrapping_shr(shift as u32))
    }
}

impl BitAnd<i32> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn bitand(self, mask: i32) -> Fixed {
        Fixed(self.0 & mask)
    }
}

impl BitOr<i32> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn bitor(self, mask: i32) -> Fixed {
        Fixed(self.0 | mask)
    }
}

impl BitXor<i32> for Fixed {
    type Output = Fixed;
    #[inline(always)]
    fn bitxor(self, mask: i32) -> Fixed {
        Fixed(self.0 ^ mask)
    }
}

assign_op!(ShlAssign, shl_assign, <<, u8);
assign_op!(ShrAssign, shr_assign, >>, u8);
assign_op!(BitAndAssign, bitand_assign, &, i32);
assign_op!(BitOrAssign, bitor_assign, |, i32);
assign_op!(BitXorAssign, bitxor_assign, ^, i32);

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
