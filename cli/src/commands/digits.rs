use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;
use ui512::U512;

use crate::logging::init_tracing;

/// Extracts the decimal digits of a 512-bit value by repeated division by 10
#[derive(Parser)]
#[command(author, about, long_about = None, version)]
pub struct Ui512Digits {
    /// Value to render, decimal or 0x-prefixed hex
    #[clap(conflicts_with = "random")]
    pub value: Option<U512>,

    /// Render a random full-width value instead
    #[clap(short = 'r', long, default_value_t = false)]
    pub random: bool,

    /// Seed for --random
    #[clap(short = 's', long, default_value_t = 0)]
    pub seed: u64,

    /// Separator between groups of three digits
    #[clap(long, default_value = ",")]
    pub separator: String,

    /// Verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase verbosity level")]
    pub verbose: u8,
}

impl Ui512Digits {
    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);

        let value = match (self.value, self.random) {
            (Some(value), _) => value,
            (None, true) => U512::from_words(StdRng::seed_from_u64(self.seed).gen()),
            (None, false) => bail!("Either a value or --random is required"),
        };

        let grouped = value.to_grouped_decimal(&self.separator);
        let digit_count = grouped.chars().filter(char::is_ascii_digit).count();
        info!("{} has {} decimal digits", format!("{value:#x}").cyan(), digit_count);

        println!("{grouped}");

        Ok(())
    }
}
