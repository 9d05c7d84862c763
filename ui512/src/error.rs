/// Status code reported across the C ABI for a successful call
pub const STATUS_OK: i16 = 0;

/// Status code reported across the C ABI for a zero divisor
pub const STATUS_DIVIDE_BY_ZERO: i16 = -1;

/// Errors produced by the 512-bit engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Ui512Error {
    #[error("Division by zero")]
    DivideByZero,

    #[error("Cannot parse integer from empty string")]
    Empty,

    #[error("Invalid digit {0:?}")]
    InvalidDigit(char),

    #[error("Value does not fit in 512 bits")]
    Overflow,

    #[error("Unknown backend {0:?}, expected one of: scalar, lanes128, lanes256, lanes512")]
    UnknownBackend(String),
}

impl Ui512Error {
    /// Status code for the C ABI
    pub fn status(&self) -> i16 {
        match self {
            Ui512Error::DivideByZero => STATUS_DIVIDE_BY_ZERO,
            _ => i16::MIN,
        }
    }
}

pub type Result<T> = std::result::Result<T, Ui512Error>;
