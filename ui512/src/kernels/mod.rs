//! Interchangeable low-level kernels for the word-parallel operations.
//!
//! Every [`Kernel`] must produce bit-identical results for identical inputs; the
//! backends only differ in how the words are grouped while computing them.

mod lanes;
mod scalar;

use std::{fmt, str::FromStr};

use crate::{Ui512Error, Words};

pub use lanes::{Lanes, Lanes128, Lanes256, Lanes512};
pub use scalar::Scalar;

/// Word-parallel bitwise and shift primitives over a 512-bit value
pub trait Kernel {
    fn and(&self, a: &Words, b: &Words) -> Words;
    fn or(&self, a: &Words, b: &Words) -> Words;
    fn xor(&self, a: &Words, b: &Words) -> Words;
    fn not(&self, a: &Words) -> Words;

    /// Logical left shift; shifts of 512 or more yield zero
    fn shl(&self, a: &Words, n: u32) -> Words;

    /// Logical right shift; shifts of 512 or more yield zero
    fn shr(&self, a: &Words, n: u32) -> Words;
}

/// Selects one of the available kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Scalar,
    Lanes128,
    Lanes256,
    Lanes512,
}

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))] {
        const PREFERRED: Backend = Backend::Lanes512;
    } else if #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))] {
        const PREFERRED: Backend = Backend::Lanes256;
    } else if #[cfg(any(target_feature = "sse2", target_feature = "neon"))] {
        const PREFERRED: Backend = Backend::Lanes128;
    } else {
        const PREFERRED: Backend = Backend::Scalar;
    }
}

impl Backend {
    pub const ALL: [Backend; 4] =
        [Backend::Scalar, Backend::Lanes128, Backend::Lanes256, Backend::Lanes512];

    /// Widest backend the compilation target has registers for
    pub const fn preferred() -> Self {
        PREFERRED
    }

    /// The dispatch point: maps the selection to its kernel
    #[inline]
    pub fn kernel(self) -> &'static dyn Kernel {
        match self {
            Backend::Scalar => &Scalar,
            Backend::Lanes128 => &Lanes128,
            Backend::Lanes256 => &Lanes::<4>,
            Backend::Lanes512 => &Lanes::<8>,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Lanes128 => "lanes128",
            Backend::Lanes256 => "lanes256",
            Backend::Lanes512 => "lanes512",
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::preferred()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Ui512Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Backend::ALL
            .into_iter()
            .find(|b| b.name() == name)
            .ok_or_else(|| Ui512Error::UnknownBackend(s.to_string()))
    }
}
