use anyhow::{Context, Result};
use clap::Parser;
use ui512_cli::commands::{Ui512Check, Ui512Digits, Ui512Div};

#[derive(Parser)]
#[command(
    name = "ui512",
    bin_name = "ui512",
    version,
    about = "CLI tool for the 512-bit unsigned integer engine",
    long_about = "Divides 512-bit values, extracts decimal digits and runs the engine's property checks."
)]
pub enum Cli {
    Div(Ui512Div),
    Digits(Ui512Digits),
    Check(Ui512Check),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Div(cmd) => {
            cmd.run().context("Error executing Div command")?;
        }
        Cli::Digits(cmd) => {
            cmd.run().context("Error executing Digits command")?;
        }
        Cli::Check(cmd) => {
            cmd.run().context("Error executing Check command")?;
        }
    }

    Ok(())
}
