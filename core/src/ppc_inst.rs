//! PowerPC instruction declarations, as read from the instruction table, and their resolved form
//! with the primary and extended opcode values that identify them.

use std::{
    fmt::{self, Display},
    fs,
    path::Path,
};

use ppc::{EncodingForm, FieldExpression, PRIMARY_OPCODE_RANGE};
use serde::{Deserialize, Serialize};

use crate::{mnemonic_identifier, TableGenError};

/// One instruction record of the input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstructionDecl {
    /// Full 32-bit encoding pattern, hexadecimal with optional `0x` prefix
    pub opcode: String,
    pub mnem: String,
    pub form: String,
    #[serde(rename = "sub-form")]
    pub subform: String,
    pub group: String,
    pub desc: String,
    /// Marks serializing (fence-like) instructions
    #[serde(default)]
    pub sync: bool,
}

impl InstructionDecl {
    /// Creates a general instruction declaration with placeholder classification
    pub fn new(opcode: u32, mnem: &str, form: &str) -> InstructionDecl {
        InstructionDecl {
            opcode: format!("{opcode:08x}"),
            mnem: mnem.to_string(),
            form: form.to_string(),
            subform: "none".to_string(),
            group: "i".to_string(),
            desc: mnem.to_string(),
            sync: false,
        }
    }
}

/// The declarative instruction table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstructionTable {
    pub instructions: Vec<InstructionDecl>,
}

impl InstructionTable {
    pub fn from_json_str(json: &str) -> Result<InstructionTable, TableGenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON instruction table file
    pub fn from_file(path: &Path) -> Result<InstructionTable, TableGenError> {
        let json = fs::read_to_string(path)
            .map_err(|source| TableGenError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }
}

/// Determines the type of a [`PpcInstruction`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstKind {
    #[default]
    General,
    Sync,
}

impl InstKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Sync => "Sync",
        }
    }
}

impl Display for InstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolved PowerPC instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpcInstruction {
    /// Declared 32-bit encoding pattern
    pub opcode: u32,

    /// Mnemonic as declared in the table
    pub mnemonic: String,

    /// Mnemonic converted into the generated enum variant name
    pub identifier: String,

    pub form: EncodingForm,
    pub subform: String,
    pub group: String,
    pub description: String,
    pub kind: InstKind,

    /// Value of bits 0..=5
    pub primary_opcode: u32,

    /// Extraction expression of the form's extended opcode; empty for primary-only forms
    pub expression: FieldExpression,

    /// Composed extended opcode value, `None` for primary-only forms
    pub extended_opcode: Option<u32>,
}

impl PpcInstruction {
    /// Resolves a declaration, computing its primary and extended opcode values.
    ///
    /// Unknown forms, malformed form layouts and unparsable opcodes are configuration errors.
    pub fn resolve(decl: &InstructionDecl) -> Result<PpcInstruction, TableGenError> {
        for (field, value) in [("mnem", &decl.mnem), ("form", &decl.form), ("group", &decl.group)] {
            if value.trim().is_empty() {
                return Err(TableGenError::EmptyField { mnemonic: decl.mnem.clone(), field });
            }
        }

        let opcode = parse_opcode(&decl.opcode).ok_or_else(|| TableGenError::InvalidOpcode {
            mnemonic: decl.mnem.clone(),
            text: decl.opcode.clone(),
        })?;

        let config_error =
            |source: ppc::Error| TableGenError::Config { mnemonic: decl.mnem.clone(), source };
        let form = EncodingForm::try_from_name(&decl.form).map_err(config_error)?;
        let expression = form.field_expression().map_err(config_error)?;

        let extended_opcode =
            if expression.is_empty() { None } else { Some(expression.compose(opcode)) };

        Ok(PpcInstruction {
            opcode,
            mnemonic: decl.mnem.clone(),
            identifier: mnemonic_identifier(&decl.mnem),
            form,
            subform: decl.subform.clone(),
            group: decl.group.clone(),
            description: decl.desc.clone(),
            kind: if decl.sync { InstKind::Sync } else { InstKind::General },
            primary_opcode: PRIMARY_OPCODE_RANGE.extract(opcode),
            expression,
            extended_opcode,
        })
    }
}

fn parse_opcode(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
    if digits.is_empty() || digits.len() > 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
