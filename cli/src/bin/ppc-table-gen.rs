use anyhow::{Context, Result};
use clap::Parser;
use ppcgen_cli::{
    commands::{PpcCheck, PpcGenerate, PpcTree},
    PPCGEN_VERSION_MESSAGE,
};

// Main enum defining the generator subcommands.
#[derive(Parser)]
#[command(
    name = "ppc-table-gen",
    bin_name = "ppc-table-gen",
    version = PPCGEN_VERSION_MESSAGE,
    about = "PowerPC decoder table generator",
    long_about = "Generates the PowerPC opcode enum, metadata table and decoder from an \
                  instruction table."
)]
pub enum Cli {
    Generate(PpcGenerate),
    Check(PpcCheck),
    Tree(PpcTree),
}

fn main() -> Result<()> {
    match Cli::parse() {
        Cli::Generate(cmd) => {
            cmd.run().context("Error executing Generate command")?;
        }
        Cli::Check(cmd) => {
            cmd.run().context("Error executing Check command")?;
        }
        Cli::Tree(cmd) => {
            cmd.run().context("Error executing Tree command")?;
        }
    }

    Ok(())
}
