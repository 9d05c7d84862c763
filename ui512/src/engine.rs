use crate::{div_long, div_short, Backend, Kernel, Result, U512};

/// Runs the 512-bit operations on one chosen [`Backend`].
///
/// Every backend gives bit-identical results; the choice only affects how the
/// word-parallel steps are carried out. The operator impls on [`U512`] use
/// `Engine::default()`, which picks [`Backend::preferred`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Engine {
    backend: Backend,
}

impl Engine {
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    #[inline]
    fn kernel(&self) -> &'static dyn Kernel {
        self.backend.kernel()
    }

    #[inline]
    pub fn and(&self, a: &U512, b: &U512) -> U512 {
        U512::from_words(self.kernel().and(a.as_words(), b.as_words()))
    }

    #[inline]
    pub fn or(&self, a: &U512, b: &U512) -> U512 {
        U512::from_words(self.kernel().or(a.as_words(), b.as_words()))
    }

    #[inline]
    pub fn xor(&self, a: &U512, b: &U512) -> U512 {
        U512::from_words(self.kernel().xor(a.as_words(), b.as_words()))
    }

    #[inline]
    pub fn not(&self, a: &U512) -> U512 {
        U512::from_words(self.kernel().not(a.as_words()))
    }

    /// Logical left shift by `n` bits; `n >= 512` gives zero
    #[inline]
    pub fn shl(&self, a: &U512, n: u32) -> U512 {
        U512::from_words(self.kernel().shl(a.as_words(), n))
    }

    /// Logical right shift by `n` bits; `n >= 512` gives zero
    #[inline]
    pub fn shr(&self, a: &U512, n: u32) -> U512 {
        U512::from_words(self.kernel().shr(a.as_words(), n))
    }

    /// Divides `a` by a single word. See [`U512::div_rem_u64`].
    pub fn div_rem_u64(&self, a: &U512, b: u64) -> Result<(U512, u64)> {
        div_short::div_rem_u64(a, b)
    }

    /// Divides `a` by `b`, returning `(quotient, remainder)`. See [`U512::div_rem`].
    pub fn div_rem(&self, a: &U512, b: &U512) -> Result<(U512, U512)> {
        div_long::div_rem(self.kernel(), a, b)
    }
}

impl From<Backend> for Engine {
    fn from(backend: Backend) -> Self {
        Self::new(backend)
    }
}

impl U512 {
    /// Division by a 64-bit word on the preferred backend
    ///
    /// # Returns
    /// `(quotient, remainder)` with `self = q·b + r` and `r < b`
    ///
    /// # Errors
    /// [`Ui512Error::DivideByZero`](crate::Ui512Error::DivideByZero) when `b == 0`
    pub fn div_rem_u64(&self, b: u64) -> Result<(U512, u64)> {
        Engine::default().div_rem_u64(self, b)
    }

    /// Full 512-bit division on the preferred backend
    ///
    /// # Returns
    /// `(quotient, remainder)` with `self = q·b + r` and `r < b`
    ///
    /// # Errors
    /// [`Ui512Error::DivideByZero`](crate::Ui512Error::DivideByZero) when `b` is zero
    pub fn div_rem(&self, b: &U512) -> Result<(U512, U512)> {
        Engine::default().div_rem(self, b)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::test_utils::random_u512;

    #[test]
    fn test_default_engine_uses_preferred_backend() {
        assert_eq!(Engine::default().backend(), Backend::preferred());
        assert_eq!(Engine::from(Backend::Scalar).backend(), Backend::Scalar);
    }

    #[test]
    fn test_engines_agree() {
        let mut rng = StdRng::seed_from_u64(0xe9);
        let reference = Engine::new(Backend::Scalar);
        for _ in 0..200 {
            let a = random_u512(&mut rng);
            let b = random_u512(&mut rng);
            for backend in Backend::ALL {
                let engine = Engine::new(backend);
                assert_eq!(engine.and(&a, &b), reference.and(&a, &b));
                assert_eq!(engine.shl(&a, 77), reference.shl(&a, 77));
                assert_eq!(engine.div_rem(&a, &b), reference.div_rem(&a, &b), "{backend}");
            }
        }
    }

    #[test]
    fn test_operations_leave_inputs_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = random_u512(&mut rng);
        let b = random_u512(&mut rng) | U512::ONE;
        let (a_before, b_before) = (a, b);
        for backend in Backend::ALL {
            let engine = Engine::new(backend);
            let _ = engine.xor(&a, &b);
            let _ = engine.shr(&a, 3);
            let _ = engine.div_rem(&a, &b);
            let _ = engine.div_rem_u64(&a, 7);
        }
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }
}
