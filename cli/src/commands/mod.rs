mod check;
mod digits;
mod div;

pub use check::*;
pub use digits::*;
pub use div::*;
