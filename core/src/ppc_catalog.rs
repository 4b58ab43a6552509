//! The instruction catalog: every resolved instruction of one generation run, ordered by
//! identifier. The position of an instruction in the catalog is its identity ordinal, shared by
//! the generated enumeration, metadata table and decoder.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    variant_identifier, InstructionDecl, InstructionTable, PpcInstruction, TableGenError,
    INVALID_IDENTIFIER,
};

/// Read-only set of resolved instructions
#[derive(Debug, Default, Clone)]
pub struct InstructionCatalog {
    insts: Vec<PpcInstruction>,
    index: IndexMap<String, usize>,
}

impl InstructionCatalog {
    /// Resolves all declarations and checks that their identifiers are unique
    pub fn new(decls: &[InstructionDecl]) -> Result<InstructionCatalog, TableGenError> {
        let mut insts: Vec<PpcInstruction> = Vec::with_capacity(decls.len());
        let mut declared: IndexMap<String, usize> = IndexMap::with_capacity(decls.len());

        for decl in decls {
            let inst = PpcInstruction::resolve(decl)?;
            if inst.identifier == INVALID_IDENTIFIER {
                return Err(TableGenError::ReservedMnemonic {
                    mnemonic: inst.mnemonic,
                    identifier: inst.identifier,
                });
            }
            if let Some(&first) = declared.get(&inst.identifier) {
                return Err(TableGenError::DuplicateMnemonic {
                    identifier: inst.identifier,
                    first: insts[first].mnemonic.clone(),
                    second: inst.mnemonic,
                });
            }
            declared.insert(inst.identifier.clone(), insts.len());
            insts.push(inst);
        }

        insts.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        let index =
            insts.iter().enumerate().map(|(i, inst)| (inst.identifier.clone(), i)).collect();

        debug!("Resolved {} instructions", insts.len());

        Ok(InstructionCatalog { insts, index })
    }

    pub fn from_table(table: &InstructionTable) -> Result<InstructionCatalog, TableGenError> {
        Self::new(&table.instructions)
    }

    /// Loads and resolves a JSON instruction table file
    pub fn load(path: &Path) -> Result<InstructionCatalog, TableGenError> {
        Self::from_table(&InstructionTable::from_file(path)?)
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&PpcInstruction> {
        self.insts.get(ordinal)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PpcInstruction> {
        self.insts.iter()
    }

    pub fn instructions(&self) -> &[PpcInstruction] {
        &self.insts
    }

    /// Returns the identity ordinal of the instruction with the given identifier
    pub fn ordinal(&self, identifier: &str) -> Option<usize> {
        self.index.get(identifier).copied()
    }

    pub fn find(&self, identifier: &str) -> Option<&PpcInstruction> {
        self.ordinal(identifier).map(|i| &self.insts[i])
    }

    /// Sorted, de-duplicated enum variant names of the instruction groups
    pub fn group_variants(&self) -> Vec<String> {
        let mut groups: Vec<String> =
            self.insts.iter().map(|inst| variant_identifier(&inst.group)).collect();
        groups.sort();
        groups.dedup();
        groups
    }
}

impl<'a> IntoIterator for &'a InstructionCatalog {
    type Item = &'a PpcInstruction;
    type IntoIter = std::slice::Iter<'a, PpcInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.insts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_identifier() {
        let catalog = InstructionCatalog::new(&[
            InstructionDecl::new(0x7c000378, "orx", "X"),
            InstructionDecl::new(0x38000000, "addi", "D"),
            InstructionDecl::new(0x70000000, "andi.", "D"),
        ])
        .unwrap();

        let names: Vec<&str> = catalog.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(names, ["addi", "andix", "orx"]);
        assert_eq!(catalog.ordinal("andix"), Some(1));
        assert_eq!(catalog.find("orx").unwrap().extended_opcode, Some(444));
        assert_eq!(catalog.ordinal("andi."), None);
    }

    #[test]
    fn duplicate_identifiers_name_both_mnemonics() {
        let err = InstructionCatalog::new(&[
            InstructionDecl::new(0x70000000, "andi.", "D"),
            InstructionDecl::new(0x74000000, "andix", "D"),
        ])
        .unwrap_err();

        match err {
            TableGenError::DuplicateMnemonic { identifier, first, second } => {
                assert_eq!(identifier, "andix");
                assert_eq!(first, "andi.");
                assert_eq!(second, "andix");
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn sentinel_name_is_reserved() {
        let err =
            InstructionCatalog::new(&[InstructionDecl::new(0, "Invalid", "D")]).unwrap_err();
        assert!(matches!(err, TableGenError::ReservedMnemonic { .. }));
    }

    #[test]
    fn groups_are_deduplicated() {
        let mut fadd = InstructionDecl::new(0xfc00002a, "faddx", "A");
        fadd.group = "f".to_string();
        let catalog = InstructionCatalog::new(&[
            InstructionDecl::new(0x38000000, "addi", "D"),
            fadd,
            InstructionDecl::new(0x3c000000, "addis", "D"),
        ])
        .unwrap();
        assert_eq!(catalog.group_variants(), ["F", "I"]);
    }
}
