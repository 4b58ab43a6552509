//! Conversion of table names into Rust identifiers for the generated sources

/// Identifier of the sentinel opcode terminating the generated enumeration
pub const INVALID_IDENTIFIER: &str = "Invalid";

const RUST_KEYWORDS: &[&str] = &[
    "_", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

fn sanitize(name: &str, replace: impl Fn(char) -> char) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { replace(c) })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Converts an instruction mnemonic into an enum variant name, e.g. `andi.` into `andix`
pub fn mnemonic_identifier(mnemonic: &str) -> String {
    sanitize(mnemonic, |c| if c == '.' { 'x' } else { '_' })
}

/// Converts a sub-form tag such as `D-A-B-OE-Rc` into `D_A_B_OE_Rc`
pub fn subform_identifier(subform: &str) -> String {
    if subform.trim().is_empty() {
        return "none".to_string();
    }
    sanitize(subform, |_| '_')
}

/// Converts a group or form tag into an enum variant name with a leading capital
pub fn variant_identifier(name: &str) -> String {
    let mut chars = name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    sanitize(&capitalized, |_| '_')
}
