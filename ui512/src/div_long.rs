use tracing::trace;

use crate::{
    div_short::{div_rem_u64, div_wide},
    ops::{adc, mac, sbb},
    Kernel, Result, Ui512Error, U512, WORDS,
};

/// Divides two 512-bit numbers with Knuth's Algorithm D
///
/// Shifts go through `kernel`; everything else is plain word arithmetic, so the
/// result is the same for every kernel.
///
/// # Returns
/// `(quotient, remainder)` with `a = q·b + r` and `r < b`, or
/// [`Ui512Error::DivideByZero`] when `b` is zero
///
/// # Note
/// Divisors that fit in one word are handed to the single-word division
pub(crate) fn div_rem(kernel: &dyn Kernel, a: &U512, b: &U512) -> Result<(U512, U512)> {
    let len_b = b.significant_words();
    if len_b == 0 {
        return Err(Ui512Error::DivideByZero);
    }

    let len_a = a.significant_words();
    if len_a < len_b || a < b {
        return Ok((U512::ZERO, *a));
    }

    if len_b == 1 {
        let (quo, rem) = div_rem_u64(a, b.as_words()[0])?;
        return Ok((quo, U512::from_u64(rem)));
    }
    // We can assume a >= b and len_b >= 2 from here on

    // Normalize so the top word of the divisor has its high bit set. The dividend
    // gets one extra word to catch the bits shifted out of it.
    let shift = b.as_words()[len_b - 1].leading_zeros();
    let v = kernel.shl(b.as_words(), shift);
    let mut u = [0u64; WORDS + 1];
    u[..WORDS].copy_from_slice(&kernel.shl(a.as_words(), shift));
    if shift != 0 {
        u[WORDS] = a.as_words()[WORDS - 1] >> (64 - shift);
    }

    trace!(len_a, len_b, shift, "Long division");

    let v_top = v[len_b - 1];
    let v_next = v[len_b - 2];
    let mut quo = [0u64; WORDS];

    for j in (0..=len_a - len_b).rev() {
        let u_top = u[j + len_b];
        let u_next = u[j + len_b - 1];
        let u_low = u[j + len_b - 2];

        // Trial digit from the top two words of the window; the window is always
        // below v·2^64, so u_top never exceeds v_top
        let (mut q_hat, mut r_hat) = if u_top >= v_top {
            (u64::MAX, u_next as u128 + v_top as u128)
        } else {
            let (q, r) = div_wide(u_top, u_next, v_top);
            (q, r as u128)
        };

        // Reject over-estimates using the divisor's second word. Runs at most twice
        while r_hat <= u64::MAX as u128
            && (q_hat as u128) * (v_next as u128) > ((r_hat << 64) | u_low as u128)
        {
            q_hat -= 1;
            r_hat += v_top as u128;
        }

        // Multiply and subtract q_hat·v from the (len_b + 1)-word window at j
        let mut carry = 0;
        let mut borrow = 0;
        for i in 0..len_b {
            let (prod, hi) = mac(0, q_hat, v[i], carry);
            carry = hi;
            (u[j + i], borrow) = sbb(u[j + i], prod, borrow);
        }
        (u[j + len_b], borrow) = sbb(u[j + len_b], carry, borrow);

        // The window went negative: q_hat is one too large, add v back
        let mut corrections = 0u32;
        while borrow != 0 {
            q_hat -= 1;
            corrections += 1;

            let mut carry = 0;
            for i in 0..len_b {
                (u[j + i], carry) = adc(u[j + i], v[i], carry);
            }
            let (top, overflow) = adc(u[j + len_b], 0, carry);
            u[j + len_b] = top;
            // Wrapping past 2^64 on the top word cancels the earlier borrow
            if overflow != 0 {
                borrow = 0;
            }
        }
        debug_assert!(corrections <= 2, "Algorithm D needs at most two corrections");
        if corrections > 0 {
            trace!(j, corrections, "Quotient digit corrected");
        }

        quo[j] = q_hat;
    }

    // What is left in the low len_b words is the normalized remainder
    debug_assert!(u[len_b..].iter().all(|&w| w == 0), "Remainder must fit in the divisor's width");
    let mut rem = [0u64; WORDS];
    rem.copy_from_slice(&u[..WORDS]);
    let rem = kernel.shr(&rem, shift);

    Ok((U512::from_words(quo), U512::from_words(rem)))
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_integer::Integer;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{
        test_utils::{random_u512, TEST_RUN_COUNT},
        Backend, BITS,
    };

    /// Checks `a = q·b + r` and `r < b` using the crate's own multiply and add
    fn assert_division_identity(a: &U512, b: &U512, quo: &U512, rem: &U512) {
        let (lo, hi) = quo.widening_mul(b);
        assert!(hi.is_zero(), "q·b overflows for {a:?} / {b:?}");
        let (sum, carry) = lo.overflowing_add(rem);
        assert!(!carry, "q·b + r overflows for {a:?} / {b:?}");
        assert_eq!(&sum, a, "a != q·b + r for {a:?} / {b:?}");
        assert!(rem < b, "Remainder must be less than divisor for {a:?} / {b:?}");
    }

    fn assert_matches_biguint(a: &U512, b: &U512, quo: &U512, rem: &U512) {
        let (expected_quo, expected_rem) = BigUint::from(a).div_rem(&BigUint::from(b));
        assert_eq!(BigUint::from(quo), expected_quo, "quotient of {a:?} / {b:?}");
        assert_eq!(BigUint::from(rem), expected_rem, "remainder of {a:?} / {b:?}");
    }

    #[test]
    fn test_division_identity_random() {
        let mut rng = StdRng::seed_from_u64(0xd1f);
        for backend in Backend::ALL {
            let kernel = backend.kernel();
            for _ in 0..TEST_RUN_COUNT {
                let a = random_u512(&mut rng);
                let b = random_u512(&mut rng);
                if b.is_zero() {
                    continue;
                }
                let (quo, rem) = div_rem(kernel, &a, &b).unwrap();
                assert_division_identity(&a, &b, &quo, &rem);
                assert_matches_biguint(&a, &b, &quo, &rem);
            }
        }
    }

    #[test]
    fn test_full_width_dividend_random_divisor_width() {
        let mut rng = StdRng::seed_from_u64(17);
        for backend in Backend::ALL {
            let kernel = backend.kernel();
            for _ in 0..TEST_RUN_COUNT {
                let a = U512::from_words(rng.gen());
                // Shift a random full value down so every divisor bit length is covered
                let b = (U512::from_words(rng.gen()) >> rng.gen_range(0..BITS)) | U512::ONE;
                let (quo, rem) = div_rem(kernel, &a, &b).unwrap();
                assert_division_identity(&a, &b, &quo, &rem);
            }
        }
    }

    #[test]
    fn test_zero_dividend() {
        let mut rng = StdRng::seed_from_u64(1);
        for backend in Backend::ALL {
            for _ in 0..100 {
                let b = random_u512(&mut rng) | U512::ONE;
                assert_eq!(div_rem(backend.kernel(), &U512::ZERO, &b), Ok((U512::ZERO, U512::ZERO)));
            }
        }
    }

    #[test]
    fn test_zero_divisor() {
        let mut rng = StdRng::seed_from_u64(2);
        for backend in Backend::ALL {
            for _ in 0..100 {
                let a = random_u512(&mut rng);
                assert_eq!(div_rem(backend.kernel(), &a, &U512::ZERO), Err(Ui512Error::DivideByZero));
            }
        }
    }

    #[test]
    fn test_divide_by_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for backend in Backend::ALL {
            for _ in 0..100 {
                let a = random_u512(&mut rng);
                assert_eq!(div_rem(backend.kernel(), &a, &U512::ONE), Ok((a, U512::ZERO)));
            }
        }
    }

    #[test]
    fn test_divide_by_self() {
        let mut rng = StdRng::seed_from_u64(4);
        for backend in Backend::ALL {
            for _ in 0..100 {
                let a = random_u512(&mut rng) | (U512::ONE << 200);
                assert_eq!(div_rem(backend.kernel(), &a, &a), Ok((U512::ONE, U512::ZERO)));
            }
            assert_eq!(div_rem(backend.kernel(), &U512::MAX, &U512::MAX), Ok((U512::ONE, U512::ZERO)));
        }
    }

    #[test]
    fn test_smaller_dividend_is_the_remainder() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let b = U512::from_words(rng.gen()) | (U512::ONE << 511);
            let a = b >> rng.gen_range(1..BITS);
            assert_eq!(div_rem(Backend::Scalar.kernel(), &a, &b), Ok((U512::ZERO, a)));
        }
        // Same width, smaller magnitude
        let b = U512::from_words([0, 0, 0, 5, 0, 0, 0, 0]);
        let a = U512::from_words([u64::MAX, u64::MAX, u64::MAX, 4, 0, 0, 0, 0]);
        assert_eq!(div_rem(Backend::Scalar.kernel(), &a, &b), Ok((U512::ZERO, a)));
    }

    #[test]
    fn test_powers_of_two() {
        let mut rng = StdRng::seed_from_u64(6);
        for backend in Backend::ALL {
            let kernel = backend.kernel();
            for k in 0..BITS {
                let a = U512::from_words(rng.gen());
                let b = U512::ONE << k;
                let expected_quo = a >> k;
                let expected_rem = (a << (BITS - k)) >> (BITS - k);
                assert_eq!(div_rem(kernel, &a, &b), Ok((expected_quo, expected_rem)), "2^{k} on {backend}");
            }
        }
    }

    #[test]
    fn test_single_word_divisor_matches_short_division() {
        let mut rng = StdRng::seed_from_u64(7);
        for backend in Backend::ALL {
            for _ in 0..TEST_RUN_COUNT {
                let a = random_u512(&mut rng);
                let b = rng.gen::<u64>().max(1);
                let (quo, rem) = div_rem(backend.kernel(), &a, &U512::from_u64(b)).unwrap();
                let (short_quo, short_rem) = div_rem_u64(&a, b).unwrap();
                assert_eq!(quo, short_quo);
                assert_eq!(rem, U512::from_u64(short_rem));
            }
        }
    }

    #[test]
    fn test_sparse_high_words_fixture() {
        let a = U512::from_words([0, 0, 0, 0, 0, 4, 6, 4]);
        let b = U512::from_words([0, 0, 0, 0, 0, 0, 1, 2]);
        for backend in Backend::ALL {
            let (quo, rem) = div_rem(backend.kernel(), &a, &b).unwrap();
            assert_division_identity(&a, &b, &quo, &rem);
            assert_matches_biguint(&a, &b, &quo, &rem);
        }
    }

    #[test]
    fn test_add_back_cases() {
        // Digit patterns known to make the trial quotient overshoot past the
        // two-word refinement, forcing the add-back step
        let cases = [
            (
                U512::from_words([0, 0, 1 << 63, (1 << 63) - 1, 0, 0, 0, 0]),
                U512::from_words([1, 0, 1 << 63, 0, 0, 0, 0, 0]),
            ),
            (
                U512::from_words([3, 0, 1 << 63, 0, 0, 0, 0, 0]),
                U512::from_words([1, 0, 1 << 61, 0, 0, 0, 0, 0]),
            ),
            (
                U512::from_words([0, 0, 0, 0, 0, 0, 1 << 63, (1 << 63) - 1]),
                U512::from_words([0, 0, 0, 0, 1, 0, 1 << 63, 0]),
            ),
        ];
        for backend in Backend::ALL {
            for (a, b) in &cases {
                let (quo, rem) = div_rem(backend.kernel(), a, b).unwrap();
                assert_division_identity(a, b, &quo, &rem);
                assert_matches_biguint(a, b, &quo, &rem);
            }
        }
    }

    #[test]
    fn test_top_word_equals_divisor_top() {
        // The second digit sees u_top == v_top and takes the q_hat = 2^64 - 1 branch
        let a = U512::from_words([0, 4, 1 << 63, 0, 0, 0, 0, 0]);
        let b = U512::from_words([5, 1 << 63, 0, 0, 0, 0, 0, 0]);
        for backend in Backend::ALL {
            let (quo, rem) = div_rem(backend.kernel(), &a, &b).unwrap();
            assert_division_identity(&a, &b, &quo, &rem);
            assert_matches_biguint(&a, &b, &quo, &rem);
        }

        let b = U512::MAX >> 64;
        let (quo, rem) = div_rem(Backend::Scalar.kernel(), &U512::MAX, &b).unwrap();
        assert_division_identity(&U512::MAX, &b, &quo, &rem);
        assert_matches_biguint(&U512::MAX, &b, &quo, &rem);
    }

    #[test]
    fn test_backends_agree() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..TEST_RUN_COUNT {
            let a = random_u512(&mut rng);
            let b = random_u512(&mut rng) | U512::ONE;
            let expected = div_rem(Backend::Scalar.kernel(), &a, &b);
            for backend in Backend::ALL {
                assert_eq!(div_rem(backend.kernel(), &a, &b), expected, "{backend}");
            }
        }
    }
}
