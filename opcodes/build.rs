use std::{env, path::PathBuf};

use ppcgen_core::{EmitOptions, MissDiagnostic, PpcTableGen};

const INSTRUCTION_TABLE: &str = "data/ppc-instructions.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let options = EmitOptions { miss: MissDiagnostic::Tracing, ..Default::default() };
    PpcTableGen::new(options).run(INSTRUCTION_TABLE.as_ref(), &out_dir)?;

    // Decoder with the default miss policy, compiled only by the integration tests
    let options = EmitOptions {
        opcode_module: "ppc_opcodes::ppc_opcode".to_string(),
        miss: MissDiagnostic::DebugAssert,
        ..Default::default()
    };
    PpcTableGen::new(options).run(INSTRUCTION_TABLE.as_ref(), &out_dir.join("debug-assert"))?;

    // Tell cargo to rerun this build script if the instruction table changes
    println!("cargo:rerun-if-changed={INSTRUCTION_TABLE}");

    Ok(())
}
