use std::path::PathBuf;

use ppc::EncodingForm;

/// Errors that abort table generation. None of them is recoverable: the input table or the form
/// configuration must be fixed and the generator run again.
#[derive(Debug, thiserror::Error)]
pub enum TableGenError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse instruction table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Instruction {mnemonic:?}: field `{field}` must not be empty")]
    EmptyField { mnemonic: String, field: &'static str },

    #[error("Instruction {mnemonic}: invalid opcode pattern {text:?}")]
    InvalidOpcode { mnemonic: String, text: String },

    #[error("Instruction {mnemonic}: {source}")]
    Config {
        mnemonic: String,
        #[source]
        source: ppc::Error,
    },

    #[error("Instruction {mnemonic}: identifier {identifier} is reserved for the invalid opcode")]
    ReservedMnemonic { mnemonic: String, identifier: String },

    #[error("Duplicate mnemonic {identifier}: declared by {first} and {second}")]
    DuplicateMnemonic { identifier: String, first: String, second: String },

    #[error(
        "Instruction {mnemonic} shares primary opcode {primary} with {other} but form {form} has \
         no extended opcode field"
    )]
    MissingExtendedField { mnemonic: String, other: String, primary: u32, form: EncodingForm },

    #[error(
        "Conflicting encodings {first} and {second}: both decode to primary opcode {primary}, \
         extended opcode {extended:#b} over {expression}"
    )]
    Conflict { first: String, second: String, primary: u32, expression: String, extended: u32 },

    #[error(
        "Instruction {shadowed} ({opcode:#010x}) is unreachable: the decoder resolves it to {by}"
    )]
    Shadowed { shadowed: String, opcode: u32, by: String },
}
