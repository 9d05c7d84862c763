//! Arithmetic and bitwise operations on [`U512`].
//!
//! Bitwise operators and shifts go through the preferred backend's kernel. Addition,
//! subtraction and multiplication wrap modulo 2^512 unless the `overflowing_`,
//! `checked_` or `widening_` forms are used.

use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use crate::{Engine, U512, WORDS};

/// `a + b + carry`, returning `(sum, carry_out)`
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// `a - b - borrow`, returning `(difference, borrow_out)` with borrow_out in {0, 1}
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (t as u64, ((t >> 64) as u64) & 1)
}

/// `acc + a * b + carry`, returning `(low, high)`; cannot overflow 128 bits
#[inline(always)]
pub(crate) const fn mac(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (acc as u128) + (a as u128) * (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

impl U512 {
    #[inline]
    pub fn set_zero(&mut self) {
        *self = U512::ZERO;
    }

    /// Sets the value to `value` zero-extended to 512 bits
    #[inline]
    pub fn set_u64(&mut self, value: u64) {
        *self = U512::from_u64(value);
    }

    #[inline]
    pub fn copy_from(&mut self, src: &U512) {
        *self = *src;
    }

    /// Returns `(self + rhs mod 2^512, carry_out)`
    pub fn overflowing_add(&self, rhs: &U512) -> (U512, bool) {
        let (a, b) = (self.as_words(), rhs.as_words());
        let mut out = [0u64; WORDS];
        let mut carry = 0;
        for i in 0..WORDS {
            (out[i], carry) = adc(a[i], b[i], carry);
        }
        (U512::from_words(out), carry != 0)
    }

    /// Returns `(self - rhs mod 2^512, borrow_out)`
    pub fn overflowing_sub(&self, rhs: &U512) -> (U512, bool) {
        let (a, b) = (self.as_words(), rhs.as_words());
        let mut out = [0u64; WORDS];
        let mut borrow = 0;
        for i in 0..WORDS {
            (out[i], borrow) = sbb(a[i], b[i], borrow);
        }
        (U512::from_words(out), borrow != 0)
    }

    #[inline]
    pub fn wrapping_add(&self, rhs: &U512) -> U512 {
        self.overflowing_add(rhs).0
    }

    #[inline]
    pub fn wrapping_sub(&self, rhs: &U512) -> U512 {
        self.overflowing_sub(rhs).0
    }

    pub fn checked_add(&self, rhs: &U512) -> Option<U512> {
        match self.overflowing_add(rhs) {
            (sum, false) => Some(sum),
            (_, true) => None,
        }
    }

    pub fn checked_sub(&self, rhs: &U512) -> Option<U512> {
        match self.overflowing_sub(rhs) {
            (diff, false) => Some(diff),
            (_, true) => None,
        }
    }

    /// Multiplies by a single word, returning the low 512 bits and the carried-out word
    pub fn overflowing_mul_u64(&self, rhs: u64) -> (U512, u64) {
        let a = self.as_words();
        let mut out = [0u64; WORDS];
        let mut carry = 0;
        for i in 0..WORDS {
            (out[i], carry) = mac(0, a[i], rhs, carry);
        }
        (U512::from_words(out), carry)
    }

    /// Full 1024-bit product, returned as `(low, high)` halves
    pub fn widening_mul(&self, rhs: &U512) -> (U512, U512) {
        let (a, b) = (self.as_words(), rhs.as_words());
        let mut wide = [0u64; 2 * WORDS];

        // Schoolbook, skipping zero rows
        for i in 0..self.significant_words() {
            let mut carry = 0;
            for j in 0..WORDS {
                (wide[i + j], carry) = mac(wide[i + j], a[i], b[j], carry);
            }
            wide[i + WORDS] = carry;
        }
        U512::split_wide(&wide)
    }

    #[inline]
    pub fn wrapping_mul(&self, rhs: &U512) -> U512 {
        self.widening_mul(rhs).0
    }

    pub fn checked_mul(&self, rhs: &U512) -> Option<U512> {
        let (lo, hi) = self.widening_mul(rhs);
        if hi.is_zero() {
            Some(lo)
        } else {
            None
        }
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait for U512 {
            type Output = U512;

            #[inline]
            fn $method(self, rhs: U512) -> U512 {
                let ($a, $b) = (&self, &rhs);
                $body
            }
        }

        impl $trait<&U512> for &U512 {
            type Output = U512;

            #[inline]
            fn $method(self, rhs: &U512) -> U512 {
                let ($a, $b) = (self, rhs);
                $body
            }
        }

        impl $assign_trait for U512 {
            #[inline]
            fn $assign_method(&mut self, rhs: U512) {
                let ($a, $b) = (&*self, &rhs);
                *self = $body;
            }
        }
    };
}

impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, |a, b| Engine::default().and(a, b));
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, |a, b| Engine::default().or(a, b));
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, |a, b| Engine::default().xor(a, b));
impl_binary_op!(Add, add, AddAssign, add_assign, |a, b| a.wrapping_add(b));
impl_binary_op!(Sub, sub, SubAssign, sub_assign, |a, b| a.wrapping_sub(b));
impl_binary_op!(Mul, mul, MulAssign, mul_assign, |a, b| a.wrapping_mul(b));
// Like the primitive integers, the operator forms panic on a zero divisor
impl_binary_op!(Div, div, DivAssign, div_assign, |a, b| match a.div_rem(b) {
    Ok((quo, _)) => quo,
    Err(_) => panic!("attempt to divide by zero"),
});
impl_binary_op!(Rem, rem, RemAssign, rem_assign, |a, b| match a.div_rem(b) {
    Ok((_, rem)) => rem,
    Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
});

impl Div<u64> for U512 {
    type Output = U512;

    fn div(self, rhs: u64) -> U512 {
        match self.div_rem_u64(rhs) {
            Ok((quo, _)) => quo,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }
}

impl Rem<u64> for U512 {
    type Output = u64;

    fn rem(self, rhs: u64) -> u64 {
        match self.div_rem_u64(rhs) {
            Ok((_, rem)) => rem,
            Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

impl Not for U512 {
    type Output = U512;

    #[inline]
    fn not(self) -> U512 {
        Engine::default().not(&self)
    }
}

impl Not for &U512 {
    type Output = U512;

    #[inline]
    fn not(self) -> U512 {
        Engine::default().not(self)
    }
}

impl Shl<u32> for U512 {
    type Output = U512;

    #[inline]
    fn shl(self, n: u32) -> U512 {
        Engine::default().shl(&self, n)
    }
}

impl Shr<u32> for U512 {
    type Output = U512;

    #[inline]
    fn shr(self, n: u32) -> U512 {
        Engine::default().shr(&self, n)
    }
}

impl ShlAssign<u32> for U512 {
    #[inline]
    fn shl_assign(&mut self, n: u32) {
        *self = Engine::default().shl(self, n);
    }
}

impl ShrAssign<u32> for U512 {
    #[inline]
    fn shr_assign(&mut self, n: u32) {
        *self = Engine::default().shr(self, n);
    }
}
