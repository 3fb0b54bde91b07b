use crate::{
    constant::Word,
    error::{LoadError, LoadErrorCode},
};
use std::{collections::HashMap, fmt};

/// The closed instruction set. Discriminants are the encoded opcode words.
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `ACC = operand`
    Ldm,
    /// `ACC = memory[operand]`
    Ldd,
    /// `ACC = memory[memory[operand]]`
    Ldi,
    /// `ACC = memory[operand + IX]`
    Ldx,
    /// `IX = operand`
    Ldr,
    /// `IX = ACC`
    Movix,
    /// `memory[operand] = ACC`
    Sto,
    Addi,
    Adda,
    Subi,
    Suba,
    Inca,
    Incx,
    Deca,
    Decx,
    Jmp,
    Cmpa,
    Cmpi,
    /// Compare against `memory[memory[operand]]`.
    Cmii,
    Jpe,
    Jpn,
    Andi,
    Anda,
    Xori,
    Xora,
    Ori,
    Ora,
    Lsl,
    Lsr,
    In,
    Out,
    End,
    Isp,
}

impl Opcode {
    pub const ALL: [Opcode; 33] = [
        Opcode::Ldm,
        Opcode::Ldd,
        Opcode::Ldi,
        Opcode::Ldx,
        Opcode::Ldr,
        Opcode::Movix,
        Opcode::Sto,
        Opcode::Addi,
        Opcode::Adda,
        Opcode::Subi,
        Opcode::Suba,
        Opcode::Inca,
        Opcode::Incx,
        Opcode::Deca,
        Opcode::Decx,
        Opcode::Jmp,
        Opcode::Cmpa,
        Opcode::Cmpi,
        Opcode::Cmii,
        Opcode::Jpe,
        Opcode::Jpn,
        Opcode::Andi,
        Opcode::Anda,
        Opcode::Xori,
        Opcode::Xora,
        Opcode::Ori,
        Opcode::Ora,
        Opcode::Lsl,
        Opcode::Lsr,
        Opcode::In,
        Opcode::Out,
        Opcode::End,
        Opcode::Isp,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Ldm => "LDM",
            Opcode::Ldd => "LDD",
            Opcode::Ldi => "LDI",
            Opcode::Ldx => "LDX",
            Opcode::Ldr => "LDR",
            Opcode::Movix => "MOVIX",
            Opcode::Sto => "STO",
            Opcode::Addi => "ADDI",
            Opcode::Adda => "ADDA",
            Opcode::Subi => "SUBI",
            Opcode::Suba => "SUBA",
            Opcode::Inca => "INCA",
            Opcode::Incx => "INCX",
            Opcode::Deca => "DECA",
            Opcode::Decx => "DECX",
            Opcode::Jmp => "JMP",
            Opcode::Cmpa => "CMPA",
            Opcode::Cmpi => "CMPI",
            Opcode::Cmii => "CMII",
            Opcode::Jpe => "JPE",
            Opcode::Jpn => "JPN",
            Opcode::Andi => "ANDI",
            Opcode::Anda => "ANDA",
            Opcode::Xori => "XORI",
            Opcode::Xora => "XORA",
            Opcode::Ori => "ORI",
            Opcode::Ora => "ORA",
            Opcode::Lsl => "LSL",
            Opcode::Lsr => "LSR",
            Opcode::In => "IN",
            Opcode::Out => "OUT",
            Opcode::End => "END",
            Opcode::Isp => "ISP",
        }
    }

    /// Whether the operand word carries meaning for this opcode.
    pub fn uses_operand(self) -> bool {
        !matches!(
            self,
            Opcode::Movix
                | Opcode::Inca
                | Opcode::Incx
                | Opcode::Deca
                | Opcode::Decx
                | Opcode::In
                | Opcode::Out
                | Opcode::End
                | Opcode::Isp
        )
    }
}

impl From<Opcode> for Word {
    fn from(op: Opcode) -> Word {
        op as Word
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A fetched opcode word. Words outside the instruction set stay
/// representable so the machine can report and skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Known(Opcode),
    Unknown(Word),
}

impl From<Word> for Decoded {
    fn from(word: Word) -> Self {
        match usize::try_from(word).ok().and_then(|i| Opcode::ALL.get(i)) {
            Some(op) => Decoded::Known(*op),
            None => Decoded::Unknown(word),
        }
    }
}

pub struct OpcodeTable {
    table: HashMap<String, Opcode>,
}

impl OpcodeTable {
    pub fn build_table() -> Self {
        let table = Opcode::ALL
            .iter()
            .map(|op| (op.mnemonic().to_string(), *op))
            .collect();
        Self { table }
    }

    /// Mnemonic lookup is case-insensitive.
    pub fn get_opcode(&self, key: &str) -> Result<Opcode, LoadError> {
        match self.table.get(&key.to_ascii_uppercase()) {
            Some(op) => Ok(*op),
            None => Err(LoadError::new(
                LoadErrorCode::UnrecognizedMnemonic,
                format!("[ {key} ] is not a valid operation"),
            )),
        }
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::build_table()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encoding_follows_declaration_order() {
        for (i, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(Word::from(*op), i as Word);
            assert_eq!(Decoded::from(i as Word), Decoded::Known(*op));
        }
        assert_eq!(Word::from(Opcode::Isp), 32);
    }

    #[test]
    fn words_past_the_table_are_unknown() {
        assert_eq!(Decoded::from(33), Decoded::Unknown(33));
        assert_eq!(Decoded::from(Word::MAX), Decoded::Unknown(Word::MAX));
    }

    #[test]
    fn operand_usage() {
        for op in [Opcode::Ldm, Opcode::Sto, Opcode::Jpn, Opcode::Lsr, Opcode::Cmii] {
            assert!(op.uses_operand(), "{op}");
        }
        for op in [Opcode::Movix, Opcode::Deca, Opcode::In, Opcode::Out, Opcode::End, Opcode::Isp] {
            assert!(!op.uses_operand(), "{op}");
        }
    }

    #[test]
    fn mnemonics_are_case_insensitive() {
        let table = OpcodeTable::build_table();
        assert_eq!(table.get_opcode("deca").unwrap(), Opcode::Deca);
        assert_eq!(table.get_opcode("MovIX").unwrap(), Opcode::Movix);
        let err = table.get_opcode("NOP").unwrap_err();
        assert_eq!(err.code, LoadErrorCode::UnrecognizedMnemonic);
    }
}
