use anyhow::Result;
use clap::Parser;

use crate::commands::{initialize_logger, print_command, GenerationArgs};

/// Prints the decision tree built from the instruction table
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct PpcTree {
    #[clap(flatten)]
    pub args: GenerationArgs,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl PpcTree {
    pub fn run(&self) -> Result<()> {
        initialize_logger(self.verbose);
        print_command("Tree");

        let table = ppcgen_core::InstructionTable::from_file(&self.args.input)?;
        let (catalog, tree) = self.args.table_gen().analyze(&table)?;

        print!("{}", tree.describe(&catalog));

        let stats = tree.stats();
        println!();
        println!(
            "{} instructions, {} primary opcodes ({} direct), {} buckets, widest bucket {} bits",
            catalog.len(),
            stats.primary_opcodes,
            stats.terminals,
            stats.buckets,
            stats.widest_bucket
        );

        Ok(())
    }
}
