//! Emits the `PpcOpcode` identity enumeration

use crate::{EmitOptions, InstructionCatalog, INVALID_IDENTIFIER};

/// Renders `ppc_opcode.rs`: one variant per catalog instruction in catalog order, followed by the
/// `Invalid` sentinel whose ordinal equals the instruction count
pub fn render_opcode_enum(catalog: &InstructionCatalog, options: &EmitOptions) -> String {
    let mut code = String::new();
    options.header(&mut code);

    code += "/// PowerPC instruction identities, ordered by mnemonic\n";
    code += "#[allow(non_camel_case_types)]\n";
    code += "#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]\n";
    code += "#[repr(u32)]\n";
    code += "pub enum PpcOpcode {\n";
    for inst in catalog {
        code += &format!("    {},\n", inst.identifier);
    }
    code += &format!("    {INVALID_IDENTIFIER},\n");
    code += "}\n\n";

    code += "impl PpcOpcode {\n";
    code += "    /// Number of valid identities, equal to the ordinal of `Invalid`\n";
    code += &format!("    pub const COUNT: usize = {};\n\n", catalog.len());
    code += "    /// Every valid identity in ordinal order\n";
    code += "    pub const ALL: [PpcOpcode; Self::COUNT] = [\n";
    for inst in catalog {
        code += &format!("        PpcOpcode::{},\n", inst.identifier);
    }
    code += "    ];\n\n";
    code += "    pub const fn is_valid(self) -> bool {\n";
    code += &format!("        !matches!(self, PpcOpcode::{INVALID_IDENTIFIER})\n");
    code += "    }\n\n";
    code += "    pub const fn ordinal(self) -> usize {\n";
    code += "        self as usize\n";
    code += "    }\n\n";
    code += "    pub const fn from_ordinal(ordinal: usize) -> Option<PpcOpcode> {\n";
    code += "        if ordinal < Self::COUNT {\n";
    code += "            Some(Self::ALL[ordinal])\n";
    code += "        } else {\n";
    code += "            None\n";
    code += "        }\n";
    code += "    }\n";
    code += "}\n";

    code
}
