//! Emits the `identify` decoder from the decision tree

use ppc::{FieldExpression, EXTRACT_BITS_EXPR, PRIMARY_OPCODE_RANGE};

use super::binary_literal;
use crate::{
    DecisionTree, DecodeNode, EmitOptions, InstructionCatalog, MissDiagnostic, INVALID_IDENTIFIER,
};

/// Renders an extraction expression over the variable `code`, e.g.
/// `(extract_bits(code, 6, 10) << 20) | extract_bits(code, 21, 30)`
pub fn render_expression(expression: &FieldExpression) -> String {
    let parts: Vec<String> = expression
        .parts()
        .iter()
        .map(|part| {
            let call =
                format!("extract_bits(code, {}, {})", part.range.msb(), part.range.lsb());
            if part.shift == 0 {
                call
            } else {
                format!("({call} << {})", part.shift)
            }
        })
        .collect();
    match parts.len() {
        0 => "0".to_string(),
        _ => parts.join(" | "),
    }
}

fn render_miss(code: &mut String, miss: MissDiagnostic) {
    *code += "#[cold]\n";
    *code += "#[inline(never)]\n";
    match miss {
        MissDiagnostic::DebugAssert => {
            *code += "fn decoder_miss(code: u32) -> PpcOpcode {\n";
            *code += "    if cfg!(debug_assertions) {\n";
            *code += "        panic!(\"Unknown PowerPC instruction {code:#010x}\");\n";
            *code += "    }\n";
        }
        MissDiagnostic::Tracing => {
            *code += "fn decoder_miss(code: u32) -> PpcOpcode {\n";
            *code += "    tracing::warn!(\"Unknown PowerPC instruction {code:#010x}\");\n";
        }
        MissDiagnostic::Silent => {
            *code += "fn decoder_miss(_code: u32) -> PpcOpcode {\n";
        }
    }
    *code += &format!("    PpcOpcode::{INVALID_IDENTIFIER}\n");
    *code += "}\n\n";
}

/// Renders `ppc_opcode_lookup.rs`, whose `identify` function walks the same buckets in the same
/// order as [`DecisionTree::identify`]
pub fn render_opcode_lookup(
    catalog: &InstructionCatalog,
    tree: &DecisionTree,
    options: &EmitOptions,
) -> String {
    let mut code = String::new();
    options.header(&mut code);
    code += &format!("use {}::PpcOpcode;\n\n", options.opcode_module);

    code += "/// Extracts bits `a..=b` of `v`, numbering bit 0 as the most significant\n";
    code += "#[inline(always)]\n";
    code += "pub const fn extract_bits(v: u32, a: u32, b: u32) -> u32 {\n";
    code += &format!("    {EXTRACT_BITS_EXPR}\n");
    code += "}\n\n";

    render_miss(&mut code, options.miss);

    let variant = |ordinal: usize| {
        catalog.get(ordinal).map_or(INVALID_IDENTIFIER, |inst| inst.identifier.as_str())
    };

    code += "/// Identifies the PowerPC instruction encoded in `code`.\n";
    code += "///\n";
    code += "/// Total over all words; words matching no instruction yield `PpcOpcode::Invalid`.\n";
    code += "#[allow(clippy::single_match, clippy::match_single_binding)]\n";
    code += "pub fn identify(code: u32) -> PpcOpcode {\n";
    code += &format!(
        "    match extract_bits(code, {}, {}) {{\n",
        PRIMARY_OPCODE_RANGE.msb(),
        PRIMARY_OPCODE_RANGE.lsb()
    );
    for (primary, node) in tree.nodes() {
        match node {
            DecodeNode::Terminal(ordinal) => {
                code += &format!("        {primary} => PpcOpcode::{},\n", variant(*ordinal));
            }
            DecodeNode::Dispatch(buckets) => {
                code += &format!("        {primary} => {{\n");
                for bucket in buckets {
                    code += &format!(
                        "            match {} {{\n",
                        render_expression(&bucket.expression)
                    );
                    for (value, ordinal) in &bucket.cases {
                        code += &format!(
                            "                {} => return PpcOpcode::{},\n",
                            binary_literal(*value, bucket.bit_count()),
                            variant(*ordinal)
                        );
                    }
                    code += "                _ => {}\n";
                    code += "            }\n";
                }
                code += "            decoder_miss(code)\n";
                code += "        }\n";
            }
        }
    }
    code += "        _ => decoder_miss(code),\n";
    code += "    }\n";
    code += "}\n";

    code
}
