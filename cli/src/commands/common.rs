use std::path::PathBuf;

use clap::{Args, ValueEnum};
use colored::Colorize;
use ppcgen_core::{EmitOptions, MissDiagnostic, PpcTableGen};
use tracing_subscriber::EnvFilter;

/// Decoder behavior on words that match no instruction
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MissPolicy {
    /// Panic in debug builds
    #[default]
    DebugAssert,
    /// Emit a tracing warning
    Tracing,
    /// Return Invalid without diagnostics
    Silent,
}

impl From<MissPolicy> for MissDiagnostic {
    fn from(policy: MissPolicy) -> Self {
        match policy {
            MissPolicy::DebugAssert => MissDiagnostic::DebugAssert,
            MissPolicy::Tracing => MissDiagnostic::Tracing,
            MissPolicy::Silent => MissDiagnostic::Silent,
        }
    }
}

/// Arguments shared by the commands that run the generator
#[derive(Args, Debug, Clone)]
pub struct GenerationArgs {
    /// Instruction table (JSON)
    #[clap(short = 'i', long)]
    pub input: PathBuf,

    /// Module path the generated table and decoder import `PpcOpcode` from
    #[clap(short = 'm', long, default_value = "super::ppc_opcode")]
    pub opcode_module: String,

    /// Decoder behavior on unknown instruction words
    #[clap(long, value_enum, default_value_t = MissPolicy::DebugAssert)]
    pub miss: MissPolicy,
}

impl GenerationArgs {
    pub fn table_gen(&self) -> PpcTableGen {
        PpcTableGen::new(EmitOptions {
            opcode_module: self.opcode_module.clone(),
            miss: self.miss.into(),
            ..Default::default()
        })
    }
}

/// Maps the number of `-v` flags to a default log level
pub fn verbose_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initializes the global tracing subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn initialize_logger(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbose_level(verbose)));

    let _ = tracing_subscriber::fmt().with_target(false).with_env_filter(env_filter).try_init();
}

pub fn print_command(name: &str) {
    tracing::info!("{} {}", format!("{: >12}", "Command").bright_green().bold(), name);
}
