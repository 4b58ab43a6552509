use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::commands::{initialize_logger, print_command, GenerationArgs};

/// Generates the opcode enum, metadata table and decoder sources
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct PpcGenerate {
    #[clap(flatten)]
    pub args: GenerationArgs,

    /// Output directory of the generated sources
    #[clap(short = 'o', long)]
    pub output_dir: PathBuf,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl PpcGenerate {
    pub fn run(&self) -> Result<()> {
        initialize_logger(self.verbose);
        print_command("Generate");

        let artifacts = self.args.table_gen().run(&self.args.input, &self.output_dir)?;

        for (name, content) in artifacts.files() {
            tracing::info!(
                "{} {} ({} bytes)",
                "[OK]".green().bold(),
                self.output_dir.join(name).display(),
                content.len()
            );
        }

        Ok(())
    }
}
