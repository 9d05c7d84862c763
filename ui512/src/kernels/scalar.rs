use crate::{Words, BITS, WORDS};

use super::Kernel;

/// One 64-bit word per step, no lane grouping
pub struct Scalar;

impl Kernel for Scalar {
    fn and(&self, a: &Words, b: &Words) -> Words {
        let mut out = [0u64; WORDS];
        for i in 0..WORDS {
            out[i] = a[i] & b[i];
        }
        out
    }

    fn or(&self, a: &Words, b: &Words) -> Words {
        let mut out = [0u64; WORDS];
        for i in 0..WORDS {
            out[i] = a[i] | b[i];
        }
        out
    }

    fn xor(&self, a: &Words, b: &Words) -> Words {
        let mut out = [0u64; WORDS];
        for i in 0..WORDS {
            out[i] = a[i] ^ b[i];
        }
        out
    }

    fn not(&self, a: &Words) -> Words {
        let mut out = [0u64; WORDS];
        for i in 0..WORDS {
            out[i] = !a[i];
        }
        out
    }

    fn shl(&self, a: &Words, n: u32) -> Words {
        let mut out = [0u64; WORDS];
        if n >= BITS {
            return out;
        }

        let words = (n / 64) as usize;
        let bits = n % 64;
        for i in words..WORDS {
            let src = i - words;
            let mut w = a[src] << bits;
            if bits != 0 && src > 0 {
                w |= a[src - 1] >> (64 - bits);
            }
            out[i] = w;
        }
        out
    }

    fn shr(&self, a: &Words, n: u32) -> Words {
        let mut out = [0u64; WORDS];
        if n >= BITS {
            return out;
        }

        let words = (n / 64) as usize;
        let bits = n % 64;
        for i in 0..WORDS - words {
            let src = i + words;
            let mut w = a[src] >> bits;
            if bits != 0 && src + 1 < WORDS {
                w |= a[src + 1] << (64 - bits);
            }
            out[i] = w;
        }
        out
    }
}
