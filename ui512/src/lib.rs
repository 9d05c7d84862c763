//! Fixed-width 512-bit unsigned integer arithmetic.
//!
//! Values are eight little-endian 64-bit words. Bitwise operations and shifts run on
//! an interchangeable [`Kernel`] chosen through [`Backend`]; division comes in a
//! single-word form and a full multi-word form (Knuth's Algorithm D).

mod convert;
mod div_long;
mod div_short;
mod engine;
mod error;
pub mod ffi;
pub mod kernels;
mod ops;
mod u512;

pub use engine::Engine;
pub use error::{Result, Ui512Error, STATUS_DIVIDE_BY_ZERO, STATUS_OK};
pub use kernels::{Backend, Kernel};
pub use u512::{Words, BITS, U512, WORDS};

#[cfg(test)]
pub(crate) mod test_utils {
    use rand::Rng;

    use crate::{Words, U512, WORDS};

    pub const TEST_RUN_COUNT: usize = 1000;

    /// Random words with a random number of leading zero words, so that every
    /// significant width shows up
    pub fn random_words(rng: &mut impl Rng) -> Words {
        let mut words: Words = rng.gen();
        let len = rng.gen_range(0..=WORDS);
        for w in words[len..].iter_mut() {
            *w = 0;
        }
        words
    }

    pub fn random_u512(rng: &mut impl Rng) -> U512 {
        U512::from_words(random_words(rng))
    }
}
