//! Emits the per-identity metadata table and the handler registry

use ppc::EncodingForm;

use crate::{
    subform_identifier, variant_identifier, EmitOptions, InstKind, InstructionCatalog,
    INVALID_IDENTIFIER,
};

const MACRO: &str = r#"macro_rules! instruction {
    (
        $id:ident, $opcode:expr, $name:expr, $format:ident, $subform:ident, $group:ident,
        $kind:ident, $description:expr
    ) => {
        PpcOpcodeInfo {
            id: PpcOpcode::$id,
            opcode: $opcode,
            name: $name,
            format: PpcOpcodeFormat::$format,
            subform: PpcOpcodeSubform::$subform,
            group: PpcOpcodeGroup::$group,
            kind: PpcOpcodeType::$kind,
            description: $description,
        }
    };
}
"#;

const HANDLERS: &str = r#"/// Two handler slots per identity: a disassembler and an emitter.
///
/// Each slot can be registered only once; registering it again, or registering a handler for
/// `Invalid`, is a programming error and panics.
pub struct PpcOpcodeHandlers<D, E> {
    disasm: Vec<Option<D>>,
    emit: Vec<Option<E>>,
}

impl<D, E> Default for PpcOpcodeHandlers<D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E> PpcOpcodeHandlers<D, E> {
    pub fn new() -> Self {
        Self {
            disasm: (0..PPC_OPCODE_TABLE_LEN).map(|_| None).collect(),
            emit: (0..PPC_OPCODE_TABLE_LEN).map(|_| None).collect(),
        }
    }

    pub fn register_disasm(&mut self, op: PpcOpcode, handler: D) {
        let slot =
            self.disasm.get_mut(op as usize).expect("Cannot register a handler for Invalid");
        assert!(slot.is_none(), "Disassembler for {op:?} registered twice");
        *slot = Some(handler);
    }

    pub fn register_emitter(&mut self, op: PpcOpcode, handler: E) {
        let slot =
            self.emit.get_mut(op as usize).expect("Cannot register a handler for Invalid");
        assert!(slot.is_none(), "Emitter for {op:?} registered twice");
        *slot = Some(handler);
    }

    pub fn disasm(&self, op: PpcOpcode) -> Option<&D> {
        self.disasm.get(op as usize)?.as_ref()
    }

    pub fn emitter(&self, op: PpcOpcode) -> Option<&E> {
        self.emit.get(op as usize)?.as_ref()
    }
}
"#;

fn render_enum(code: &mut String, doc: &str, name: &str, variants: &[String]) {
    *code += &format!("/// {doc}\n");
    *code += "#[allow(non_camel_case_types)]\n";
    *code += "#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]\n";
    *code += &format!("pub enum {name} {{\n");
    for variant in variants {
        *code += &format!("    {variant},\n");
    }
    *code += "}\n\n";
}

/// Renders `ppc_opcode_table.rs`: one `PpcOpcodeInfo` entry per identity, indexed by ordinal,
/// guarded by a compile time check against the length of the identity enumeration
pub fn render_opcode_table(catalog: &InstructionCatalog, options: &EmitOptions) -> String {
    let mut code = String::new();
    options.header(&mut code);
    code += &format!("use {}::PpcOpcode;\n\n", options.opcode_module);

    let formats: Vec<String> = EncodingForm::ALL.iter().map(|f| f.name().to_string()).collect();
    let mut subforms: Vec<String> =
        catalog.iter().map(|inst| subform_identifier(&inst.subform)).collect();
    subforms.sort();
    subforms.dedup();
    let kinds = [InstKind::General, InstKind::Sync].map(|k| k.name().to_string());

    render_enum(&mut code, "Encoding form of an instruction", "PpcOpcodeFormat", &formats);
    render_enum(&mut code, "Operand layout of an instruction", "PpcOpcodeSubform", &subforms);
    render_enum(&mut code, "Instruction group", "PpcOpcodeGroup", &catalog.group_variants());
    render_enum(&mut code, "Execution class of an instruction", "PpcOpcodeType", &kinds);

    code += "/// Static description of one instruction identity\n";
    code += "#[derive(Copy, Clone, Debug, PartialEq, Eq)]\n";
    code += "pub struct PpcOpcodeInfo {\n";
    code += "    pub id: PpcOpcode,\n";
    code += "    /// Declared encoding pattern\n";
    code += "    pub opcode: u32,\n";
    code += "    /// Mnemonic as declared\n";
    code += "    pub name: &'static str,\n";
    code += "    pub format: PpcOpcodeFormat,\n";
    code += "    pub subform: PpcOpcodeSubform,\n";
    code += "    pub group: PpcOpcodeGroup,\n";
    code += "    pub kind: PpcOpcodeType,\n";
    code += "    pub description: &'static str,\n";
    code += "}\n\n";

    code += &format!("pub const PPC_OPCODE_TABLE_LEN: usize = {};\n\n", catalog.len());
    code += &format!(
        "const _: () = assert!(\n    \
         PPC_OPCODE_TABLE_LEN == PpcOpcode::{INVALID_IDENTIFIER} as usize,\n    \
         \"PPC table mismatch - rerun {}\"\n);\n\n",
        options.generator
    );

    code += MACRO;
    code += "\n";

    // Pad the columns so the table reads as a table
    let rows: Vec<[String; 8]> = catalog
        .iter()
        .map(|inst| {
            [
                inst.identifier.clone(),
                format!("0x{:08x}", inst.opcode),
                format!("{:?}", inst.mnemonic),
                inst.form.name().to_string(),
                subform_identifier(&inst.subform),
                variant_identifier(&inst.group),
                inst.kind.name().to_string(),
                format!("{:?}", inst.description),
            ]
        })
        .collect();
    let mut widths = [0usize; 8];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len() + 1);
        }
    }

    code += "#[rustfmt::skip]\n";
    code += "pub static PPC_OPCODE_TABLE: [PpcOpcodeInfo; PPC_OPCODE_TABLE_LEN] = [\n";
    for row in &rows {
        code += "    instruction!(";
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                code += cell;
            } else {
                code += &format!("{:<width$} ", format!("{cell},"), width = widths[i]);
            }
        }
        code += "),\n";
    }
    code += "];\n\n";

    code += "/// Returns the metadata of `op`, `None` for `Invalid`\n";
    code += "pub fn get_opcode_info(op: PpcOpcode) -> Option<&'static PpcOpcodeInfo> {\n";
    code += "    PPC_OPCODE_TABLE.get(op as usize)\n";
    code += "}\n\n";

    code += HANDLERS;

    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InstructionDecl;

    fn catalog() -> InstructionCatalog {
        let mut sync = InstructionDecl::new(0x4c00012c, "isync", "XL");
        sync.sync = true;
        let mut addx = InstructionDecl::new(0x7c000214, "addx", "XO");
        addx.subform = "D-A-B-OE-Rc".to_string();
        addx.desc = "Add".to_string();
        InstructionCatalog::new(&[sync, addx]).unwrap()
    }

    #[test]
    fn entries_follow_catalog_order() {
        let code = render_opcode_table(&catalog(), &EmitOptions::default());
        let addx = code.find("instruction!(addx,").unwrap();
        let isync = code.find("instruction!(isync,").unwrap();
        assert!(addx < isync);
        assert!(code.contains("pub const PPC_OPCODE_TABLE_LEN: usize = 2;"));
        assert!(code.contains("PPC_OPCODE_TABLE_LEN == PpcOpcode::Invalid as usize"));
        assert!(code.contains("0x7c000214, \"addx\",  XO, D_A_B_OE_Rc, I, General, \"Add\")"));
        let isync = "0x4c00012c, \"isync\", XL, none,        I, Sync,    \"isync\")";
        assert!(code.contains(isync));
    }

    #[test]
    fn enums_cover_forms_subforms_and_groups() {
        let code = render_opcode_table(&catalog(), &EmitOptions::default());
        assert!(code.contains("pub enum PpcOpcodeFormat {\n    I,\n"));
        assert!(code.contains("    VX128_1,\n"));
        assert!(code.contains("pub enum PpcOpcodeSubform {\n    D_A_B_OE_Rc,\n    none,\n}"));
        assert!(code.contains("pub enum PpcOpcodeGroup {\n    I,\n}"));
        assert!(code.contains("pub enum PpcOpcodeType {\n    General,\n    Sync,\n}"));
    }

    #[test]
    fn opcode_module_is_configurable() {
        let options =
            EmitOptions { opcode_module: "crate::ppc_opcode".to_string(), ..Default::default() };
        let code = render_opcode_table(&catalog(), &options);
        assert!(code.contains("use crate::ppc_opcode::PpcOpcode;\n"));
    }

    #[test]
    fn strings_are_escaped() {
        let mut decl = InstructionDecl::new(0x38000000, "addi", "D");
        decl.desc = "Add \"immediate\"".to_string();
        let catalog = InstructionCatalog::new(&[decl]).unwrap();
        let code = render_opcode_table(&catalog, &EmitOptions::default());
        assert!(code.contains(r#""Add \"immediate\"")"#));
    }
}
