use std::num::NonZeroU64;

use crate::{Result, Ui512Error, U512, WORDS};

/// Divides the two-word value `hi·2^64 + lo` by `d`, returning `(quotient, remainder)`
///
/// # Assumptions
/// - `hi < d`, so the quotient fits in one word (this also rules out `d == 0`)
#[inline(always)]
pub(crate) fn div_wide(hi: u64, lo: u64, d: u64) -> (u64, u64) {
    debug_assert!(hi < d, "Quotient of a two-word division must fit in one word");

    let n = ((hi as u128) << 64) | (lo as u128);
    let d = d as u128;
    ((n / d) as u64, (n % d) as u64)
}

/// Division of a 512-bit number by a single 64-bit word
///
/// Words are consumed from the most significant one down; the running remainder
/// is always below the divisor, so every step is an exact two-word by one-word
/// division and no normalization is needed.
///
/// # Returns
/// `(quotient, remainder)` with `a = q·b + r` and `r < b`, or
/// [`Ui512Error::DivideByZero`] when `b == 0`
pub fn div_rem_u64(a: &U512, b: u64) -> Result<(U512, u64)> {
    let b = NonZeroU64::new(b).ok_or(Ui512Error::DivideByZero)?;
    Ok(div_rem_nonzero(a, b))
}

/// Same as [`div_rem_u64`] for a divisor already known to be non-zero
pub(crate) fn div_rem_nonzero(a: &U512, b: NonZeroU64) -> (U512, u64) {
    let b = b.get();
    let a = a.as_words();
    let mut quo = [0u64; WORDS];
    let mut rem = 0u64;

    // Leading zero words contribute zero quotient words and leave the remainder at 0
    let len_a = a.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1);
    for i in (0..len_a).rev() {
        (quo[i], rem) = div_wide(rem, a[i], b);
    }

    (U512::from_words(quo), rem)
}
