//! Conversions between [`U512`] and big integers, strings and byte arrays.

use std::{fmt, num::NonZeroU64, str::FromStr};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::{div_short::div_rem_nonzero, Ui512Error, U512, WORDS};

const TEN: NonZeroU64 = match NonZeroU64::new(10) {
    Some(ten) => ten,
    None => unreachable!(),
};

impl From<&U512> for BigUint {
    fn from(value: &U512) -> Self {
        value.as_words().iter().rev().fold(BigUint::zero(), |acc, &limb| (acc << 64) + BigUint::from(limb))
    }
}

impl From<U512> for BigUint {
    fn from(value: U512) -> Self {
        BigUint::from(&value)
    }
}

impl TryFrom<&BigUint> for U512 {
    type Error = Ui512Error;

    fn try_from(value: &BigUint) -> Result<Self, Self::Error> {
        let digits = value.to_u64_digits();
        if digits.len() > WORDS {
            return Err(Ui512Error::Overflow);
        }

        let mut words = [0u64; WORDS];
        words[..digits.len()].copy_from_slice(&digits);
        Ok(U512::from_words(words))
    }
}

impl U512 {
    /// Decimal digits, extracted least significant first by repeated division by 10
    fn decimal_digits(&self) -> Vec<u8> {
        let mut digits = Vec::with_capacity(155);
        let mut value = *self;
        loop {
            let (quo, rem) = div_rem_nonzero(&value, TEN);
            digits.push(b'0' + rem as u8);
            if quo.is_zero() {
                break;
            }
            value = quo;
        }
        digits.reverse();
        digits
    }

    pub fn to_decimal_string(&self) -> String {
        // Only ASCII digits were pushed
        self.decimal_digits().into_iter().map(char::from).collect()
    }

    /// Decimal string with `separator` between groups of three digits,
    /// e.g. `12,345,678,910,111,213`
    pub fn to_grouped_decimal(&self, separator: &str) -> String {
        let digits = self.decimal_digits();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
        for (i, d) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push_str(separator);
            }
            out.push(char::from(*d));
        }
        out
    }

    pub fn to_be_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        for (chunk, w) in bytes.chunks_exact_mut(8).zip(self.as_words().iter().rev()) {
            chunk.copy_from_slice(&w.to_be_bytes());
        }
        bytes
    }

    pub fn to_le_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        for (chunk, w) in bytes.chunks_exact_mut(8).zip(self.as_words().iter()) {
            chunk.copy_from_slice(&w.to_le_bytes());
        }
        bytes
    }

    pub fn from_be_bytes(bytes: &[u8; 64]) -> Self {
        let mut words = [0u64; WORDS];
        for (w, chunk) in words.iter_mut().rev().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *w = u64::from_be_bytes(buf);
        }
        U512::from_words(words)
    }

    pub fn from_le_bytes(bytes: &[u8; 64]) -> Self {
        let mut words = [0u64; WORDS];
        for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *w = u64::from_le_bytes(buf);
        }
        U512::from_words(words)
    }

    /// Parses digits in `radix` 10 or 16; `_` may separate digits
    fn parse_radix(digits: &str, radix: u32) -> Result<Self, Ui512Error> {
        let mut value = U512::ZERO;
        let mut seen_digit = false;
        for c in digits.chars() {
            if c == '_' {
                continue;
            }
            let d = c.to_digit(radix).ok_or(Ui512Error::InvalidDigit(c))?;
            seen_digit = true;

            let (shifted, carry) = value.overflowing_mul_u64(radix as u64);
            if carry != 0 {
                return Err(Ui512Error::Overflow);
            }
            value = shifted.checked_add(&U512::from_u64(d as u64)).ok_or(Ui512Error::Overflow)?;
        }

        if !seen_digit {
            return Err(Ui512Error::Empty);
        }
        Ok(value)
    }
}

impl FromStr for U512 {
    type Err = Ui512Error;

    /// Accepts decimal, or hexadecimal with a `0x` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => U512::parse_radix(hex, 16),
            None => U512::parse_radix(s, 10),
        }
    }
}

impl fmt::Display for U512 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.to_decimal_string())
    }
}
