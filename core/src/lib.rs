//! Generator of PowerPC instruction decoding tables.
//!
//! Reads a declarative instruction table, resolves every instruction's primary and extended
//! opcode, builds a two-level decision tree and renders three Rust sources from it: the
//! `PpcOpcode` identity enum, the per-identity metadata table and the `identify` decoder.
mod decision_tree;
mod emit;
mod error;
mod ppc_catalog;
mod ppc_inst;
mod table_gen;
mod utils;

pub use decision_tree::*;
pub use emit::*;
pub use error::*;
pub use ppc_catalog::*;
pub use ppc_inst::*;
pub use table_gen::*;
pub use utils::*;
