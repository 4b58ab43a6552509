use ppc_opcodes::{
    decode, get_opcode_info, identify, PpcOpcode, PpcOpcodeFormat, PpcOpcodeGroup, PpcOpcodeType,
    PPC_OPCODE_TABLE, PPC_OPCODE_TABLE_LEN,
};

#[test]
fn table_is_indexed_by_ordinal() {
    assert_eq!(PPC_OPCODE_TABLE_LEN, PpcOpcode::COUNT);
    assert_eq!(PpcOpcode::Invalid as usize, PPC_OPCODE_TABLE.len());
    for (i, info) in PPC_OPCODE_TABLE.iter().enumerate() {
        assert_eq!(info.id as usize, i);
        assert_eq!(PpcOpcode::ALL[i], info.id);
        assert_eq!(PpcOpcode::from_ordinal(i), Some(info.id));
    }
    assert_eq!(PpcOpcode::from_ordinal(PpcOpcode::COUNT), None);
}

#[test]
fn identities_are_sorted_by_name() {
    let names: Vec<String> = PpcOpcode::ALL.iter().map(|op| format!("{op:?}")).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.first().map(String::as_str), Some("addcx"));
}

#[test]
fn every_declared_pattern_decodes_to_itself() {
    for info in PPC_OPCODE_TABLE.iter() {
        assert_eq!(identify(info.opcode), info.id, "{} ({:#010x})", info.name, info.opcode);
    }
}

#[test]
fn operand_fields_are_ignored() {
    // add r3, r4, r5 / addo / add.
    assert_eq!(identify(0x7c642a14), PpcOpcode::addx);
    assert_eq!(identify(0x7c642e14), PpcOpcode::addx);
    assert_eq!(identify(0x7c642a15), PpcOpcode::addx);
    // mr r3, r4
    assert_eq!(identify(0x7c832378), PpcOpcode::orx);
    // li r3, 1
    assert_eq!(identify(0x38600001), PpcOpcode::addi);
    // bl
    assert_eq!(identify(0x48000001), PpcOpcode::bx);
    // ld r3, 8(r1) / ldu r3, 8(r1) / std r3, 8(r1)
    assert_eq!(identify(0xe8610008), PpcOpcode::ld);
    assert_eq!(identify(0xe8610009), PpcOpcode::ldu);
    assert_eq!(identify(0xf8610008), PpcOpcode::std);
}

#[test]
fn multi_range_forms() {
    assert_eq!(identify(0x7c001fec), PpcOpcode::dcbz);
    assert_eq!(identify(0x7c201fec), PpcOpcode::dcbz128);
    assert_eq!(identify(0x100000c3), PpcOpcode::lvx128);
    assert_eq!(identify(0x14000010), PpcOpcode::vaddfp128);
    // Bit 26 is not part of the VX128 extended opcode
    assert_eq!(identify(0x14000030), PpcOpcode::vaddfp128);
}

#[test]
fn unknown_words_are_invalid() {
    for word in [0x00000000, 0xffffffff, (31 << 26) | (2 << 1), 0x7c4007ec, 0x100007ff] {
        assert_eq!(identify(word), PpcOpcode::Invalid, "{word:#010x}");
        assert!(decode(word).is_none());
    }
    assert!(!PpcOpcode::Invalid.is_valid());
    assert!(PpcOpcode::addx.is_valid());
}

#[test]
fn metadata() {
    let andix = get_opcode_info(PpcOpcode::andix).unwrap();
    assert_eq!(andix.name, "andi.");
    assert_eq!(andix.opcode, 0x70000000);
    assert_eq!(andix.format, PpcOpcodeFormat::D);

    let isync = decode(0x4c00012c).unwrap();
    assert_eq!(isync.id, PpcOpcode::isync);
    assert_eq!(isync.kind, PpcOpcodeType::Sync);
    assert_eq!(isync.format, PpcOpcodeFormat::XL);

    let dcbz128 = get_opcode_info(PpcOpcode::dcbz128).unwrap();
    assert_eq!(dcbz128.format, PpcOpcodeFormat::DCBZ);
    assert_eq!(dcbz128.group, PpcOpcodeGroup::M);
    assert_eq!(dcbz128.description, "Data Cache Block Clear to Zero 128");

    assert_eq!(get_opcode_info(PpcOpcode::addx).unwrap().kind, PpcOpcodeType::General);
    assert!(get_opcode_info(PpcOpcode::Invalid).is_none());

    let syncs: Vec<&str> = PPC_OPCODE_TABLE
        .iter()
        .filter(|info| info.kind == PpcOpcodeType::Sync)
        .map(|info| info.name)
        .collect();
    assert_eq!(syncs, ["eieio", "isync", "sync"]);
}
