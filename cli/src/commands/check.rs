use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;

use crate::commands::{initialize_logger, print_command, GenerationArgs};

/// Verifies that previously generated sources match the instruction table
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct PpcCheck {
    #[clap(flatten)]
    pub args: GenerationArgs,

    /// Directory holding the generated sources
    #[clap(short = 'o', long)]
    pub output_dir: PathBuf,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl PpcCheck {
    pub fn run(&self) -> Result<()> {
        initialize_logger(self.verbose);
        print_command("Check");

        let artifacts = self.args.table_gen().generate_file(&self.args.input)?;
        let stale = artifacts.stale_files(&self.output_dir);
        if !stale.is_empty() {
            for name in &stale {
                tracing::error!(
                    "{} {} is out of date",
                    "[ERROR]".red().bold(),
                    self.output_dir.join(name).display()
                );
            }
            bail!("{} generated file(s) out of date, rerun ppc-table-gen generate", stale.len());
        }

        tracing::info!("{} Generated sources are up to date", "[OK]".green().bold());
        Ok(())
    }
}
