//! Driver running the whole generation pipeline

use std::path::Path;

use tracing::info;

use crate::{
    render_opcode_enum, render_opcode_lookup, render_opcode_table, Artifacts, DecisionTree,
    EmitOptions, InstructionCatalog, InstructionTable, TableGenError,
};

/// Generates the identity enum, the metadata table and the decoder from one instruction table
#[derive(Clone, Debug, Default)]
pub struct PpcTableGen {
    pub options: EmitOptions,
}

impl PpcTableGen {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Resolves the catalog and builds its verified decision tree
    pub fn analyze(
        &self,
        table: &InstructionTable,
    ) -> Result<(InstructionCatalog, DecisionTree), TableGenError> {
        let catalog = InstructionCatalog::from_table(table)?;
        let tree = DecisionTree::build(&catalog)?;
        tree.verify(&catalog)?;

        let stats = tree.stats();
        info!(
            "Decision tree: {} instructions, {} primary opcodes, {} buckets",
            catalog.len(),
            stats.primary_opcodes,
            stats.buckets
        );

        Ok((catalog, tree))
    }

    /// Renders all artifacts in memory
    pub fn generate(&self, table: &InstructionTable) -> Result<Artifacts, TableGenError> {
        let (catalog, tree) = self.analyze(table)?;
        Ok(Artifacts {
            opcode: render_opcode_enum(&catalog, &self.options),
            table: render_opcode_table(&catalog, &self.options),
            lookup: render_opcode_lookup(&catalog, &tree, &self.options),
        })
    }

    pub fn generate_file(&self, input: &Path) -> Result<Artifacts, TableGenError> {
        info!("Loading instruction table {}", input.display());
        self.generate(&InstructionTable::from_file(input)?)
    }

    /// Generates from `input` and writes the artifacts into `out_dir`.
    ///
    /// Any error is reported before the first file is written.
    pub fn run(&self, input: &Path, out_dir: &Path) -> Result<Artifacts, TableGenError> {
        let artifacts = self.generate_file(input)?;
        artifacts.write_to(out_dir)?;
        info!("Generated sources written to {}", out_dir.display());
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OPCODE_FILE;

    const TABLE: &str = r#"{
        "instructions": [
            { "opcode": "7c000214", "mnem": "addx", "form": "XO", "sub-form": "D-A-B-OE-Rc",
              "group": "i", "desc": "Add" },
            { "opcode": "0x38000000", "mnem": "addi", "form": "D", "sub-form": "D-A-SIMM",
              "group": "i", "desc": "Add Immediate" },
            { "opcode": "4c00012c", "mnem": "isync", "form": "XL", "sub-form": "none",
              "group": "i", "desc": "Instruction Synchronize", "sync": true }
        ]
    }"#;

    #[test]
    fn generation_is_deterministic() {
        let table = InstructionTable::from_json_str(TABLE).unwrap();
        let gen = PpcTableGen::default();
        assert_eq!(gen.generate(&table).unwrap(), gen.generate(&table).unwrap());
    }

    #[test]
    fn declaration_order_does_not_matter() {
        let table = InstructionTable::from_json_str(TABLE).unwrap();
        let mut reversed = table.clone();
        reversed.instructions.reverse();
        let gen = PpcTableGen::default();
        assert_eq!(gen.generate(&table).unwrap(), gen.generate(&reversed).unwrap());
    }

    #[test]
    fn conflicts_abort_before_writing() {
        let mut table = InstructionTable::from_json_str(TABLE).unwrap();
        let mut dup = table.instructions[0].clone();
        dup.mnem = "addy".to_string();
        table.instructions.push(dup);

        let dir = std::env::temp_dir().join(format!("ppcgen-conflict-{}", std::process::id()));
        let input = dir.join("table.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&input, serde_json::to_string(&table).unwrap()).unwrap();

        let out_dir = dir.join("out");
        let err = PpcTableGen::default().run(&input, &out_dir).unwrap_err();
        assert!(matches!(err, TableGenError::Conflict { .. }));
        assert!(!out_dir.join(OPCODE_FILE).exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let err = PpcTableGen::default().generate_file(Path::new("/nonexistent/table.json"));
        assert!(matches!(err, Err(TableGenError::Io { .. })));
    }
}
