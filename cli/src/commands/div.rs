use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use ui512::{Backend, Engine, U512};

use crate::logging::init_tracing;

/// Divides one 512-bit value by another and prints quotient and remainder
#[derive(Parser)]
#[command(author, about, long_about = None, version)]
pub struct Ui512Div {
    /// Dividend, decimal or 0x-prefixed hex
    pub dividend: U512,

    /// Divisor, decimal or 0x-prefixed hex
    pub divisor: U512,

    /// Kernel used for shifts and bitwise steps
    #[clap(short = 'b', long, env = "UI512_BACKEND", default_value_t = Backend::preferred())]
    pub backend: Backend,

    /// Print the results in hex instead of decimal
    #[clap(short = 'x', long, default_value_t = false)]
    pub hex: bool,

    /// Verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level")]
    pub verbose: u8,
}

impl Ui512Div {
    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);

        let engine = Engine::new(self.backend);
        debug!("Dividing on the {} backend", engine.backend());

        let (quo, rem) = engine.div_rem(&self.dividend, &self.divisor)?;
        info!(
            "Dividend is {} bits, divisor is {} bits",
            self.dividend.bits(),
            self.divisor.bits()
        );

        println!("{} {}", "quotient: ".bold(), self.format(&quo));
        println!("{} {}", "remainder:".bold(), self.format(&rem));

        Ok(())
    }

    fn format(&self, value: &U512) -> String {
        if self.hex {
            format!("{value:#x}")
        } else {
            value.to_string()
        }
    }
}
