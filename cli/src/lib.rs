pub mod commands;

pub const PPCGEN_VERSION_MESSAGE: &str = env!("CARGO_PKG_VERSION");
