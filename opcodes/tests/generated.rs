//! Cross checks between the generator's own model and the code it generated

use std::path::Path;

use ppc_opcodes::{extract_bits, identify, PpcOpcode};
use ppcgen_core::{
    DecisionTree, EmitOptions, InstructionCatalog, MissDiagnostic, PpcTableGen, OPCODE_FILE,
    OPCODE_LOOKUP_FILE, OPCODE_TABLE_FILE,
};

fn table_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/ppc-instructions.json"))
}

// xorshift32, enough to scatter operand bits deterministically
fn next(state: &mut u32) -> u32 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    *state
}

#[test]
fn included_sources_are_up_to_date() {
    let options = EmitOptions { miss: MissDiagnostic::Tracing, ..Default::default() };
    let artifacts = PpcTableGen::new(options).generate_file(table_path()).unwrap();

    let out_dir = Path::new(env!("OUT_DIR"));
    assert!(artifacts.stale_files(out_dir).is_empty());
    assert_eq!(
        artifacts.files().map(|(name, _)| name),
        [OPCODE_FILE, OPCODE_TABLE_FILE, OPCODE_LOOKUP_FILE]
    );
}

#[test]
fn generated_decoder_matches_decision_tree() {
    let catalog = InstructionCatalog::load(table_path()).unwrap();
    let tree = DecisionTree::build(&catalog).unwrap();
    assert_eq!(catalog.len(), PpcOpcode::COUNT);

    let mut state = 0x2545f491;
    let check = |word: u32| {
        let expected = tree.identify(word).map_or(PpcOpcode::Invalid, |ordinal| {
            PpcOpcode::from_ordinal(ordinal).unwrap()
        });
        assert_eq!(identify(word), expected, "{word:#010x}");
    };

    for inst in &catalog {
        check(inst.opcode);
        for _ in 0..64 {
            // Keep the primary opcode, scatter everything else
            check((inst.opcode & 0xfc000000) | (next(&mut state) & 0x03ffffff));
        }
    }
    for _ in 0..100_000 {
        check(next(&mut state));
    }
}

#[test]
fn extract_bits_agrees_with_generator() {
    let mut state = 0x9e3779b9;
    let words: Vec<u32> =
        [0, u32::MAX, 0x80000001].into_iter().chain((0..32).map(|_| next(&mut state))).collect();

    for a in 0..32 {
        for b in a..32 {
            for &word in &words {
                assert_eq!(extract_bits(word, a, b), ppc::extract_bits_unchecked(word, a, b));
                assert_eq!(
                    extract_bits(word, a, b),
                    ppc::extract_bits(word, a as u8, b as u8).unwrap()
                );
            }
        }
    }
}
