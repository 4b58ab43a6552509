//! Decision tree mapping 32-bit instruction words to catalog ordinals.
//!
//! The first level dispatches on the primary opcode (bits 0..=5). A primary opcode declared by a
//! single instruction identifies it directly. Otherwise the group is split into buckets, one per
//! distinct extended opcode extraction expression, tried in ascending expression order; each
//! bucket compares the composed value against the declared extended opcodes of its members.
//! Words matching nothing are invalid, at both levels.
//!
//! The tree is built once and then walked independently: by [`DecisionTree::verify`] to prove
//! every declared encoding reaches its own instruction, and by the emitters to render it.

use std::{collections::BTreeMap, fmt::Write};

use ppc::{FieldExpression, PRIMARY_OPCODE_RANGE};
use tracing::debug;

use crate::{InstructionCatalog, TableGenError};

/// Extended opcode comparison shared by all members of a primary group with the same
/// extraction expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeBucket {
    pub expression: FieldExpression,
    /// Extended opcode value to catalog ordinal, ascending
    pub cases: BTreeMap<u32, usize>,
}

impl DecodeBucket {
    /// Width of the binary patterns compared by this bucket
    pub fn bit_count(&self) -> u32 {
        self.expression.bit_count()
    }

    pub fn lookup(&self, word: u32) -> Option<usize> {
        self.cases.get(&self.expression.compose(word)).copied()
    }
}

/// Second level of the decision tree, selected by primary opcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeNode {
    /// The primary opcode alone identifies the instruction
    Terminal(usize),
    /// Buckets tried in order; the first hit wins
    Dispatch(Vec<DecodeBucket>),
}

impl DecodeNode {
    pub fn identify(&self, word: u32) -> Option<usize> {
        match self {
            DecodeNode::Terminal(ordinal) => Some(*ordinal),
            DecodeNode::Dispatch(buckets) => buckets.iter().find_map(|b| b.lookup(word)),
        }
    }
}

/// Summary of the shape of a [`DecisionTree`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub primary_opcodes: usize,
    pub terminals: usize,
    pub dispatch_groups: usize,
    pub buckets: usize,
    pub cases: usize,
    pub widest_bucket: u32,
}

/// Two-level decoder for a whole catalog
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    primary: BTreeMap<u32, DecodeNode>,
}

impl DecisionTree {
    /// Builds the tree, failing on groups that cannot be told apart
    pub fn build(catalog: &InstructionCatalog) -> Result<DecisionTree, TableGenError> {
        let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (ordinal, inst) in catalog.iter().enumerate() {
            groups.entry(inst.primary_opcode).or_default().push(ordinal);
        }

        let mut primary = BTreeMap::new();
        for (opcode, members) in groups {
            let node = match members.as_slice() {
                [ordinal] => DecodeNode::Terminal(*ordinal),
                _ => Self::build_dispatch(catalog, opcode, &members)?,
            };
            primary.insert(opcode, node);
        }

        Ok(DecisionTree { primary })
    }

    fn build_dispatch(
        catalog: &InstructionCatalog,
        opcode: u32,
        members: &[usize],
    ) -> Result<DecodeNode, TableGenError> {
        let insts = catalog.instructions();
        let mut buckets: BTreeMap<&FieldExpression, BTreeMap<u32, usize>> = BTreeMap::new();

        for &ordinal in members {
            let inst = &insts[ordinal];
            let Some(extended) = inst.extended_opcode else {
                // Groups have at least two members
                let other = members.iter().copied().find(|&o| o != ordinal).unwrap_or(ordinal);
                return Err(TableGenError::MissingExtendedField {
                    mnemonic: inst.mnemonic.clone(),
                    other: insts[other].mnemonic.clone(),
                    primary: opcode,
                    form: inst.form,
                });
            };

            let cases = buckets.entry(&inst.expression).or_default();
            if let Some(&other) = cases.get(&extended) {
                return Err(TableGenError::Conflict {
                    first: insts[other].mnemonic.clone(),
                    second: inst.mnemonic.clone(),
                    primary: opcode,
                    expression: inst.expression.to_string(),
                    extended,
                });
            }
            cases.insert(extended, ordinal);
        }

        debug!(
            "Primary opcode {opcode}: {} instructions in {} buckets",
            members.len(),
            buckets.len()
        );

        Ok(DecodeNode::Dispatch(
            buckets
                .into_iter()
                .map(|(expression, cases)| DecodeBucket { expression: expression.clone(), cases })
                .collect(),
        ))
    }

    /// Checks that every declared encoding decodes to its own instruction.
    ///
    /// An instruction can be shadowed when an earlier bucket of its primary group happens to
    /// match its opcode pattern.
    pub fn verify(&self, catalog: &InstructionCatalog) -> Result<(), TableGenError> {
        for (ordinal, inst) in catalog.iter().enumerate() {
            let found = self.identify(inst.opcode);
            if found != Some(ordinal) {
                let by = found
                    .and_then(|other| catalog.get(other))
                    .map_or_else(|| "invalid".to_string(), |other| other.mnemonic.clone());
                return Err(TableGenError::Shadowed {
                    shadowed: inst.mnemonic.clone(),
                    opcode: inst.opcode,
                    by,
                });
            }
        }
        Ok(())
    }

    /// Decodes `word` into a catalog ordinal, `None` for invalid words
    pub fn identify(&self, word: u32) -> Option<usize> {
        self.primary.get(&PRIMARY_OPCODE_RANGE.extract(word))?.identify(word)
    }

    /// Primary opcode nodes in ascending primary opcode order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &DecodeNode)> {
        self.primary.iter().map(|(opcode, node)| (*opcode, node))
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats { primary_opcodes: self.primary.len(), ..Default::default() };
        for node in self.primary.values() {
            match node {
                DecodeNode::Terminal(_) => stats.terminals += 1,
                DecodeNode::Dispatch(buckets) => {
                    stats.dispatch_groups += 1;
                    stats.buckets += buckets.len();
                    for bucket in buckets {
                        stats.cases += bucket.cases.len();
                        stats.widest_bucket = stats.widest_bucket.max(bucket.bit_count());
                    }
                }
            }
        }
        stats
    }

    /// Human readable listing of the tree
    pub fn describe(&self, catalog: &InstructionCatalog) -> String {
        let name = |ordinal: usize| catalog.get(ordinal).map_or("?", |i| i.mnemonic.as_str());
        let mut s = String::new();
        for (opcode, node) in self.nodes() {
            match node {
                DecodeNode::Terminal(ordinal) => {
                    let _ = writeln!(s, "{opcode:>2}: {}", name(*ordinal));
                }
                DecodeNode::Dispatch(buckets) => {
                    let _ = writeln!(s, "{opcode:>2}:");
                    for bucket in buckets {
                        let width = bucket.bit_count() as usize;
                        let _ = writeln!(s, "    {} ({width} bits)", bucket.expression);
                        for (value, ordinal) in &bucket.cases {
                            let _ = writeln!(s, "        0b{value:0width$b} {}", name(*ordinal));
                        }
                    }
                }
            }
        }
        s
    }
}
