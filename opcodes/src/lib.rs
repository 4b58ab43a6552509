//! PowerPC instruction identities, their metadata and the `identify` decoder, generated at build
//! time from `data/ppc-instructions.json`.

pub mod ppc_opcode {
    include!(concat!(env!("OUT_DIR"), "/ppc_opcode.rs"));
}

pub mod ppc_opcode_table {
    include!(concat!(env!("OUT_DIR"), "/ppc_opcode_table.rs"));
}

pub mod ppc_opcode_lookup {
    include!(concat!(env!("OUT_DIR"), "/ppc_opcode_lookup.rs"));
}

pub use ppc_opcode::PpcOpcode;
pub use ppc_opcode_lookup::{extract_bits, identify};
pub use ppc_opcode_table::*;

/// Decodes `code` and returns the metadata of its instruction, `None` for invalid words
pub fn decode(code: u32) -> Option<&'static PpcOpcodeInfo> {
    get_opcode_info(identify(code))
}
