//! Lane-grouped kernels.
//!
//! These mirror how a vector unit handles the value: the 512 bits are split into
//! register-sized lanes, bitwise ops run lane by lane, and shifts become a word
//! permutation followed by a funnel shift of each lane against its neighbour.

use crate::{Words, BITS, WORDS};

use super::Kernel;

/// Two 64-bit words packed into each `u128` lane (128-bit registers)
pub struct Lanes128;

const LANES_128: usize = WORDS / 2;

#[inline(always)]
fn pack(a: &Words) -> [u128; LANES_128] {
    let mut out = [0u128; LANES_128];
    for (i, lane) in out.iter_mut().enumerate() {
        *lane = (a[2 * i] as u128) | ((a[2 * i + 1] as u128) << 64);
    }
    out
}

#[inline(always)]
fn unpack(lanes: &[u128; LANES_128]) -> Words {
    let mut out = [0u64; WORDS];
    for (i, lane) in lanes.iter().enumerate() {
        out[2 * i] = *lane as u64;
        out[2 * i + 1] = (*lane >> 64) as u64;
    }
    out
}

impl Lanes128 {
    #[inline(always)]
    fn zip_map(a: &Words, b: &Words, f: impl Fn(u128, u128) -> u128) -> Words {
        let (a, b) = (pack(a), pack(b));
        let mut out = [0u128; LANES_128];
        for i in 0..LANES_128 {
            out[i] = f(a[i], b[i]);
        }
        unpack(&out)
    }
}

impl Kernel for Lanes128 {
    fn and(&self, a: &Words, b: &Words) -> Words {
        Self::zip_map(a, b, |x, y| x & y)
    }

    fn or(&self, a: &Words, b: &Words) -> Words {
        Self::zip_map(a, b, |x, y| x | y)
    }

    fn xor(&self, a: &Words, b: &Words) -> Words {
        Self::zip_map(a, b, |x, y| x ^ y)
    }

    fn not(&self, a: &Words) -> Words {
        let mut lanes = pack(a);
        for lane in lanes.iter_mut() {
            *lane = !*lane;
        }
        unpack(&lanes)
    }

    fn shl(&self, a: &Words, n: u32) -> Words {
        if n >= BITS {
            return [0u64; WORDS];
        }

        let src = pack(a);
        let lanes = (n / 128) as usize;
        let bits = n % 128;
        let mut out = [0u128; LANES_128];
        for i in lanes..LANES_128 {
            let j = i - lanes;
            out[i] = src[j] << bits;
            if bits != 0 && j > 0 {
                out[i] |= src[j - 1] >> (128 - bits);
            }
        }
        unpack(&out)
    }

    fn shr(&self, a: &Words, n: u32) -> Words {
        if n >= BITS {
            return [0u64; WORDS];
        }

        let src = pack(a);
        let lanes = (n / 128) as usize;
        let bits = n % 128;
        let mut out = [0u128; LANES_128];
        for i in 0..LANES_128 - lanes {
            let j = i + lanes;
            out[i] = src[j] >> bits;
            if bits != 0 && j + 1 < LANES_128 {
                out[i] |= src[j + 1] << (128 - bits);
            }
        }
        unpack(&out)
    }
}

/// Blocks of `L` words handled as one register (`L` = 4 for 256-bit, 8 for 512-bit).
/// `L` must divide the word count.
pub struct Lanes<const L: usize>;

pub type Lanes256 = Lanes<4>;
pub type Lanes512 = Lanes<8>;

impl<const L: usize> Lanes<L> {
    const FITS: () = assert!(L > 0 && WORDS % L == 0, "lane width must divide the word count");

    #[inline(always)]
    fn zip_map(a: &Words, b: &Words, f: impl Fn(u64, u64) -> u64) -> Words {
        #[allow(clippy::let_unit_value)]
        let _ = Self::FITS;
        let mut out = [0u64; WORDS];
        for ((o, x), y) in out.chunks_exact_mut(L).zip(a.chunks_exact(L)).zip(b.chunks_exact(L)) {
            for k in 0..L {
                o[k] = f(x[k], y[k]);
            }
        }
        out
    }
}

impl<const L: usize> Kernel for Lanes<L> {
    fn and(&self, a: &Words, b: &Words) -> Words {
        Self::zip_map(a, b, |x, y| x & y)
    }

    fn or(&self, a: &Words, b: &Words) -> Words {
        Self::zip_map(a, b, |x, y| x | y)
    }

    fn xor(&self, a: &Words, b: &Words) -> Words {
        Self::zip_map(a, b, |x, y| x ^ y)
    }

    fn not(&self, a: &Words) -> Words {
        Self::zip_map(a, a, |x, _| !x)
    }

    fn shl(&self, a: &Words, n: u32) -> Words {
        if n >= BITS {
            return [0u64; WORDS];
        }

        // Word permutation: move everything up by whole words, zero fill below
        let words = (n / 64) as usize;
        let mut moved = [0u64; WORDS];
        moved[words..].copy_from_slice(&a[..WORDS - words]);

        let bits = n % 64;
        if bits == 0 {
            return moved;
        }

        // Neighbour feeding the vacated low bits of each word
        let mut below = [0u64; WORDS];
        below[1..].copy_from_slice(&moved[..WORDS - 1]);
        Self::zip_map(&moved, &below, |m, c| (m << bits) | (c >> (64 - bits)))
    }

    fn shr(&self, a: &Words, n: u32) -> Words {
        if n >= BITS {
            return [0u64; WORDS];
        }

        let words = (n / 64) as usize;
        let mut moved = [0u64; WORDS];
        moved[..WORDS - words].copy_from_slice(&a[words..]);

        let bits = n % 64;
        if bits == 0 {
            return moved;
        }

        let mut above = [0u64; WORDS];
        above[..WORDS - 1].copy_from_slice(&moved[1..]);
        Self::zip_map(&moved, &above, |m, c| (m >> bits) | (c << (64 - bits)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let a = [1, 2, 3, 4, 5, 6, 7, 8];
        let lanes = pack(&a);
        assert_eq!(lanes[0], 1 | (2u128 << 64));
        assert_eq!(lanes[3], 7 | (8u128 << 64));
        assert_eq!(unpack(&lanes), a);
    }

    #[test]
    fn test_lane_shift_across_lane_boundary() {
        let a = [0, u64::MAX, 0, 0, 0, 0, 0, 0];
        let expected = [0, 0xFFFF_FFFF_FFFF_FFF0, 0xF, 0, 0, 0, 0, 0];
        assert_eq!(Lanes128.shl(&a, 4), expected);
        assert_eq!(Lanes::<4>.shl(&a, 4), expected);
        assert_eq!(Lanes::<8>.shl(&a, 4), expected);
        assert_eq!(Lanes128.shr(&expected, 4), a);
        assert_eq!(Lanes::<4>.shr(&expected, 4), a);
    }
}
