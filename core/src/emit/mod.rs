//! Rendering of the generated Rust sources.
//!
//! Every artifact is rendered into memory from the same catalog and decision tree; nothing is
//! written until all of them succeeded, so the three files can never disagree on ordinals.

mod opcode_enum;
mod opcode_lookup;
mod opcode_table;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use opcode_enum::*;
pub use opcode_lookup::*;
pub use opcode_table::*;

use crate::TableGenError;

pub const OPCODE_FILE: &str = "ppc_opcode.rs";
pub const OPCODE_TABLE_FILE: &str = "ppc_opcode_table.rs";
pub const OPCODE_LOOKUP_FILE: &str = "ppc_opcode_lookup.rs";

/// What the generated decoder does with a word that matches no instruction
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MissDiagnostic {
    /// Panic in debug builds, return `Invalid` in release builds
    #[default]
    DebugAssert,
    /// Log a `tracing::warn!` event; the generated code then depends on `tracing`
    Tracing,
    Silent,
}

/// Options shared by all emitters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module path the table and lookup sources import `PpcOpcode` from
    pub opcode_module: String,
    pub miss: MissDiagnostic,
    /// Tool name written into the header of every generated file
    pub generator: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            opcode_module: "super::ppc_opcode".to_string(),
            miss: MissDiagnostic::default(),
            generator: "ppc-table-gen".to_string(),
        }
    }
}

impl EmitOptions {
    pub(crate) fn header(&self, code: &mut String) {
        *code +=
            &format!("// This code was autogenerated by {}. Do not modify!\n\n", self.generator);
    }
}

/// The three generated sources of one run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub opcode: String,
    pub table: String,
    pub lookup: String,
}

impl Artifacts {
    /// File names paired with their contents
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (OPCODE_FILE, self.opcode.as_str()),
            (OPCODE_TABLE_FILE, self.table.as_str()),
            (OPCODE_LOOKUP_FILE, self.lookup.as_str()),
        ]
    }

    /// Writes the artifacts into `dir`, creating it if needed.
    ///
    /// Every file is first written to a `.tmp` sibling; the final names are only replaced once
    /// all of them were written, so a failed write leaves the previous sources untouched.
    pub fn write_to(&self, dir: &Path) -> Result<(), TableGenError> {
        fs::create_dir_all(dir)
            .map_err(|source| TableGenError::Io { path: dir.to_path_buf(), source })?;

        let staged: Vec<(PathBuf, PathBuf)> = self
            .files()
            .into_iter()
            .map(|(name, _)| (dir.join(format!("{name}.tmp")), dir.join(name)))
            .collect();

        for ((tmp, _), (_, content)) in staged.iter().zip(self.files()) {
            if let Err(source) = fs::write(tmp, content) {
                for (tmp, _) in &staged {
                    let _ = fs::remove_file(tmp);
                }
                return Err(TableGenError::Io { path: tmp.clone(), source });
            }
        }

        for (tmp, path) in staged {
            fs::rename(&tmp, &path).map_err(|source| TableGenError::Io { path, source })?;
        }
        Ok(())
    }

    /// Names of the files in `dir` that are missing or differ from these artifacts
    pub fn stale_files(&self, dir: &Path) -> Vec<&'static str> {
        self.files()
            .into_iter()
            .filter(|(name, content)| {
                fs::read_to_string(dir.join(name)).map_or(true, |found| found != *content)
            })
            .map(|(name, _)| name)
            .collect()
    }
}

/// Formats `value` as a binary literal of exactly `width` digits
pub(crate) fn binary_literal(value: u32, width: u32) -> String {
    format!("0b{value:0width$b}", width = width as usize)
}
