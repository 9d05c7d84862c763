use std::{
    cmp::Ordering,
    fmt::{self, Debug, LowerHex, UpperHex},
};

use static_assertions::{assert_eq_size, const_assert_eq};

/// Number of 64-bit words in a [`U512`]
pub const WORDS: usize = 8;

/// Number of bits in a [`U512`]
pub const BITS: u32 = 512;

/// The raw word layout: little-endian, `words[0]` holds bits 0..64
pub type Words = [u64; WORDS];

/// 512-bit unsigned integer stored as eight little-endian 64-bit words.
///
/// The 64-byte alignment lets vector backends load the value in one go; nothing
/// in the arithmetic depends on it.
#[repr(C, align(64))]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct U512(Words);

assert_eq_size!(U512, [u8; 64]);
const_assert_eq!(std::mem::align_of::<U512>(), 64);
const_assert_eq!(WORDS * 64, BITS as usize);

impl U512 {
    pub const ZERO: Self = U512([0; WORDS]);
    pub const ONE: Self = U512([1, 0, 0, 0, 0, 0, 0, 0]);
    pub const MAX: Self = U512([u64::MAX; WORDS]);

    #[inline(always)]
    pub const fn from_words(words: Words) -> Self {
        U512(words)
    }

    #[inline(always)]
    pub const fn from_u64(value: u64) -> Self {
        U512([value, 0, 0, 0, 0, 0, 0, 0])
    }

    #[inline(always)]
    pub const fn from_u128(value: u128) -> Self {
        U512([value as u64, (value >> 64) as u64, 0, 0, 0, 0, 0, 0])
    }

    #[inline(always)]
    pub fn as_words(&self) -> &Words {
        &self.0
    }

    #[inline(always)]
    pub fn as_words_mut(&mut self) -> &mut Words {
        &mut self.0
    }

    #[inline(always)]
    pub const fn into_words(self) -> Words {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.0[0] == 1 && self.0[1..].iter().all(|&w| w == 0)
    }

    /// Number of words up to and including the highest non-zero one; 0 for zero
    #[inline]
    pub fn significant_words(&self) -> usize {
        self.0.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1)
    }

    /// Returns the low word when the value fits in 64 bits
    #[inline]
    pub fn to_u64(&self) -> Option<u64> {
        if self.significant_words() <= 1 {
            Some(self.0[0])
        } else {
            None
        }
    }

    pub fn leading_zeros(&self) -> u32 {
        match self.msb() {
            Some(bit) => BITS - 1 - bit,
            None => BITS,
        }
    }

    pub fn trailing_zeros(&self) -> u32 {
        self.lsb().unwrap_or(BITS)
    }

    /// Minimum number of bits needed to represent the value
    pub fn bits(&self) -> u32 {
        BITS - self.leading_zeros()
    }

    /// Position of the most significant set bit
    pub fn msb(&self) -> Option<u32> {
        let (word, bit) = msb_pos(&self.0)?;
        Some(word as u32 * 64 + bit)
    }

    /// Position of the least significant set bit
    pub fn lsb(&self) -> Option<u32> {
        let word = self.0.iter().position(|&w| w != 0)?;
        Some(word as u32 * 64 + self.0[word].trailing_zeros())
    }

    /// Value of bit `n`; bits beyond 511 read as zero
    pub fn bit(&self, n: u32) -> bool {
        if n >= BITS {
            return false;
        }
        (self.0[(n / 64) as usize] >> (n % 64)) & 1 == 1
    }

    /// Three-way comparison against a value zero-extended from 64 bits
    #[inline]
    pub fn cmp_u64(&self, value: u64) -> Ordering {
        if self.0[1..].iter().any(|&w| w != 0) {
            Ordering::Greater
        } else {
            self.0[0].cmp(&value)
        }
    }

    /// Splits a 1024-bit little-endian word array into its low and high halves
    #[inline]
    pub(crate) fn split_wide(wide: &[u64; 2 * WORDS]) -> (Self, Self) {
        let mut lo = [0u64; WORDS];
        let mut hi = [0u64; WORDS];
        lo.copy_from_slice(&wide[..WORDS]);
        hi.copy_from_slice(&wide[WORDS..]);
        (U512(lo), U512(hi))
    }
}

/// Finds the most significant set bit of a little-endian word array as
/// `(word index, bit index within the word)`; `None` when every word is zero
pub(crate) fn msb_pos(words: &[u64]) -> Option<(usize, u32)> {
    let word = words.iter().rposition(|&w| w != 0)?;
    Some((word, msb_pos_u64(words[word])))
}

#[rustfmt::skip]
fn msb_pos_u64(mut x: u64) -> u32 {
    let mut pos = 0;
    if x >= 1 << 32 { x >>= 32; pos += 32; }
    if x >= 1 << 16 { x >>= 16; pos += 16; }
    if x >= 1 << 8  { x >>= 8;  pos += 8;  }
    if x >= 1 << 4  { x >>= 4;  pos += 4;  }
    if x >= 1 << 2  { x >>= 2;  pos += 2;  }
    if x >= 1 << 1  {           pos += 1;  }
    pos
}

impl Ord for U512 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..WORDS).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U512 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for U512 {
    fn from(value: u64) -> Self {
        U512::from_u64(value)
    }
}

impl From<u128> for U512 {
    fn from(value: u128) -> Self {
        U512::from_u128(value)
    }
}

impl From<Words> for U512 {
    fn from(words: Words) -> Self {
        U512(words)
    }
}

impl From<U512> for Words {
    fn from(value: U512) -> Self {
        value.0
    }
}

impl AsRef<Words> for U512 {
    fn as_ref(&self) -> &Words {
        &self.0
    }
}

impl Debug for U512 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for w in self.0.iter().rev() {
            write!(f, "{w:016x}")?;
        }
        Ok(())
    }
}

impl LowerHex for U512 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = self.significant_words().max(1) - 1;
        let mut s = format!("{:x}", self.0[top]);
        for w in self.0[..top].iter().rev() {
            s.push_str(&format!("{w:016x}"));
        }
        f.pad_integral(true, "0x", &s)
    }
}

impl UpperHex for U512 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = self.significant_words().max(1) - 1;
        let mut s = format!("{:X}", self.0[top]);
        for w in self.0[..top].iter().rev() {
            s.push_str(&format!("{w:016X}"));
        }
        f.pad_integral(true, "0x", &s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significant_words() {
        assert_eq!(U512::ZERO.significant_words(), 0);
        assert_eq!(U512::ONE.significant_words(), 1);
        assert_eq!(U512::MAX.significant_words(), 8);

        let mut x = U512::ZERO;
        x.as_words_mut()[5] = 4;
        assert_eq!(x.significant_words(), 6);
        x.as_words_mut()[2] = 1;
        assert_eq!(x.significant_words(), 6);
    }

    #[test]
    fn test_msb_lsb() {
        assert_eq!(U512::ZERO.msb(), None);
        assert_eq!(U512::ZERO.lsb(), None);
        assert_eq!(U512::ONE.msb(), Some(0));
        assert_eq!(U512::MAX.msb(), Some(511));
        assert_eq!(U512::MAX.lsb(), Some(0));

        let x = U512::from_words([0, 0, 0x10, 0, 0, 0, 0x8000_0000_0000_0000, 0]);
        assert_eq!(x.msb(), Some(6 * 64 + 63));
        assert_eq!(x.lsb(), Some(2 * 64 + 4));
        assert_eq!(x.leading_zeros(), 64);
        assert_eq!(x.trailing_zeros(), 132);
        assert_eq!(x.bits(), 448);
    }

    #[test]
    fn test_msb_pos_u64_matches_leading_zeros() {
        let mut x = 1u64;
        while x != 0 {
            assert_eq!(msb_pos_u64(x), 63 - x.leading_zeros());
            assert_eq!(msb_pos_u64(x | 1), 63 - x.leading_zeros());
            x <<= 1;
        }
    }

    #[test]
    fn test_cmp_u64() {
        assert_eq!(U512::ZERO.cmp_u64(0), Ordering::Equal);
        assert_eq!(U512::ZERO.cmp_u64(1), Ordering::Less);
        assert_eq!(U512::from_u64(7).cmp_u64(3), Ordering::Greater);
        assert_eq!(U512::from_u64(u64::MAX).cmp_u64(u64::MAX), Ordering::Equal);

        let mut big = U512::ZERO;
        big.as_words_mut()[7] = 1;
        assert_eq!(big.cmp_u64(u64::MAX), Ordering::Greater);
    }

    #[test]
    fn test_ord_uses_high_words_first() {
        let a = U512::from_words([u64::MAX, 0, 0, 0, 0, 0, 0, 1]);
        let b = U512::from_words([0, 0, 0, 0, 0, 0, 0, 2]);
        assert!(a < b);
        assert!(U512::MAX > b);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(format!("{:x}", U512::ZERO), "0");
        assert_eq!(format!("{:#x}", U512::from_u64(255)), "0xff");
        assert_eq!(format!("{:X}", U512::from_u128(1u128 << 64)), "10000000000000000");
        assert_eq!(
            format!("{:?}", U512::ONE),
            format!("0x{}1", "0".repeat(127))
        );
    }

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<U512>(), 64);
        assert_eq!(std::mem::align_of::<U512>(), 64);
    }
}
