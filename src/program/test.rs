use super::*;

#[test]
fn lays_out_word_pairs() {
    let mut builder = ProgramBuilder::new(16).unwrap();
    builder
        .instruction(Opcode::Ldm, "B1010")
        .instruction(Opcode::Sto, "&FF")
        .bare(Opcode::End);
    assert_eq!(builder.position(), 6);
    let program = builder.build().unwrap();
    assert_eq!(program.memory_size(), 16);
    assert_eq!(&program.words()[..6], &[0, 10, 6, 255, 31, 0]);
    assert!(program.words()[6..].iter().all(|w| *w == 0));
}

#[test]
fn resolves_forward_and_backward_references() {
    let mut builder = ProgramBuilder::new(32).unwrap();
    builder.instruction(Opcode::Jmp, "skip");
    builder.label("back").unwrap();
    builder.bare(Opcode::End);
    builder.label("skip").unwrap().instruction(Opcode::Jmp, "back");
    let program = builder.build().unwrap();
    assert_eq!(program.words()[1], 4);
    assert_eq!(program.words()[5], 2);
    assert_eq!(program.labels().name_at(4), Some("skip"));
}

#[test]
fn label_at_address_zero() {
    let mut builder = ProgramBuilder::new(8).unwrap();
    builder.label("start").unwrap().instruction(Opcode::Jmp, "start");
    let program = builder.build().unwrap();
    assert_eq!(program.words()[1], 0);
}

#[test]
fn one_bad_operand_aborts_the_whole_load() {
    let mut builder = ProgramBuilder::new(16).unwrap();
    builder
        .instruction(Opcode::Ldm, "#1")
        .instruction(Opcode::Ldm, "#x1")
        .bare(Opcode::End);
    let err = builder.build().unwrap_err();
    assert_eq!(err.code, LoadErrorCode::InvalidOperand);
    assert!(err.reason.contains("#x1"));
}

#[test]
fn program_must_fit_in_memory() {
    let mut builder = ProgramBuilder::new(4).unwrap();
    builder.bare(Opcode::Inca).bare(Opcode::Inca);
    assert!(builder.build().is_ok());

    let mut builder = ProgramBuilder::new(4).unwrap();
    builder.bare(Opcode::Inca).bare(Opcode::Inca).bare(Opcode::End);
    let err = builder.build().unwrap_err();
    assert_eq!(err.code, LoadErrorCode::ProgramTooLarge);
}

#[test]
fn trailing_label_must_be_addressable() {
    let mut builder = ProgramBuilder::new(4).unwrap();
    builder.bare(Opcode::Inca).bare(Opcode::End);
    builder.label("after").unwrap();
    let err = builder.build().unwrap_err();
    assert_eq!(err.code, LoadErrorCode::ProgramTooLarge);
}

#[test]
fn rejects_tiny_memory() {
    let err = ProgramBuilder::new(1).unwrap_err();
    assert_eq!(err.code, LoadErrorCode::InvalidMemorySize);
}

#[test]
fn raw_words_pass_through() {
    let mut builder = ProgramBuilder::new(4).unwrap();
    builder.raw(0xDEAD, "&BEEF");
    let program = builder.build().unwrap();
    assert_eq!(&program.words()[..2], &[0xDEAD, 0xBEEF]);
}
