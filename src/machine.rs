//! The fetch-decode-execute loop.
//!
//! Every instruction is an (opcode, operand) word pair. `PC` moves past the
//! pair before the instruction executes, so jumps write absolute targets.
//! Arithmetic wraps at 64 bits and no carry is kept. `FLAG` is written
//! only by the compare instructions and read only by `JPE`/`JPN`.

use crate::{
    console::Console,
    constant::{Word, INSTRUCTION_WORDS, WORD_BITS},
    error::{MachineError, MachineErrorCode},
    inspect::{Inspector, Registers, Snapshot},
    label::LabelTable,
    opcode::{Decoded, Opcode},
    program::Program,
    verbose_println, very_verbose_println, warn_println,
};

/// Why a run stopped without faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// `END` executed.
    Halted,
    /// `PC` no longer addresses a whole instruction pair.
    PcOutOfRange { pc: Word },
}

/// Outcome of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The word at `address` is not an opcode. The pair was skipped.
    UnknownOpcode { address: Word, opcode: Word },
    Exit(Exit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub exit: Exit,
    /// Cycles executed, not counting the one that detected the exit.
    pub steps: u64,
    pub unknown_opcodes: u64,
}

pub struct Machine {
    registers: Registers,
    memory: Vec<Word>,
    labels: LabelTable,
}

impl Machine {
    pub fn new(program: Program) -> Self {
        let (memory, labels) = program.into_parts();
        Self {
            registers: Registers::default(),
            memory,
            labels,
        }
    }

    pub fn registers(&self) -> Registers {
        self.registers
    }

    pub fn memory(&self) -> &[Word] {
        &self.memory
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            registers: self.registers,
            memory: &self.memory,
            labels: &self.labels,
        }
    }

    pub fn run(
        &mut self,
        console: &mut dyn Console,
        inspector: &mut dyn Inspector,
    ) -> Result<RunReport, MachineError> {
        let mut steps = 0;
        let mut unknown_opcodes = 0;
        loop {
            match self.step(console, inspector)? {
                Step::Continue => (),
                Step::UnknownOpcode { .. } => unknown_opcodes += 1,
                Step::Exit(exit) => {
                    verbose_println!("stopped after [ {steps} ] steps :: {exit:?}");
                    return Ok(RunReport {
                        exit,
                        steps,
                        unknown_opcodes,
                    });
                }
            }
            steps += 1;
        }
    }

    pub fn step(
        &mut self,
        console: &mut dyn Console,
        inspector: &mut dyn Inspector,
    ) -> Result<Step, MachineError> {
        let pc = self.registers.pc;
        let Some((opcode, operand)) = self.fetch(pc) else {
            return Ok(Step::Exit(Exit::PcOutOfRange { pc }));
        };
        self.registers.pc = pc.wrapping_add(INSTRUCTION_WORDS as Word);

        let op = match Decoded::from(opcode) {
            Decoded::Known(op) => op,
            Decoded::Unknown(opcode) => {
                warn_println!("unknown opcode [ {opcode} ] at [ {pc} ], skipping");
                return Ok(Step::UnknownOpcode {
                    address: pc,
                    opcode,
                });
            }
        };
        very_verbose_println!("[ {pc:04} ] {op} {operand}");

        let Self {
            registers: r,
            memory,
            labels,
        } = self;
        match op {
            Opcode::Ldm => r.acc = operand,
            Opcode::Ldd => r.acc = read(memory, operand)?,
            Opcode::Ldi => r.acc = read_indirect(memory, operand)?,
            Opcode::Ldx => r.acc = read(memory, operand.wrapping_add(r.ix))?,
            Opcode::Ldr => r.ix = operand,
            Opcode::Movix => r.ix = r.acc,
            Opcode::Sto => write(memory, operand, r.acc)?,
            Opcode::Addi => r.acc = r.acc.wrapping_add(operand),
            Opcode::Adda => r.acc = r.acc.wrapping_add(read(memory, operand)?),
            Opcode::Subi => r.acc = r.acc.wrapping_sub(operand),
            Opcode::Suba => r.acc = r.acc.wrapping_sub(read(memory, operand)?),
            Opcode::Inca => r.acc = r.acc.wrapping_add(1),
            Opcode::Incx => r.ix = r.ix.wrapping_add(1),
            Opcode::Deca => r.acc = r.acc.wrapping_sub(1),
            Opcode::Decx => r.ix = r.ix.wrapping_sub(1),
            Opcode::Jmp => r.pc = operand,
            Opcode::Cmpa => r.flag = Word::from(r.acc == read(memory, operand)?),
            Opcode::Cmpi => r.flag = Word::from(r.acc == operand),
            Opcode::Cmii => r.flag = Word::from(r.acc == read_indirect(memory, operand)?),
            Opcode::Jpe => {
                if r.flag == 1 {
                    r.pc = operand
                }
            }
            Opcode::Jpn => {
                if r.flag == 0 {
                    r.pc = operand
                }
            }
            Opcode::Andi => r.acc &= operand,
            Opcode::Anda => r.acc &= read(memory, operand)?,
            Opcode::Xori => r.acc ^= operand,
            Opcode::Xora => r.acc ^= read(memory, operand)?,
            Opcode::Ori => r.acc |= operand,
            Opcode::Ora => r.acc |= read(memory, operand)?,
            Opcode::Lsl => r.acc = shift_left(r.acc, operand),
            Opcode::Lsr => r.acc = shift_right(r.acc, operand),
            Opcode::In => r.acc = Word::from(read_char(console)?),
            Opcode::Out => console.write_byte(r.acc as u8)?,
            Opcode::End => return Ok(Step::Exit(Exit::Halted)),
            Opcode::Isp => inspector.inspect(&Snapshot {
                registers: *r,
                memory,
                labels,
            }),
        }
        Ok(Step::Continue)
    }

    fn fetch(&self, pc: Word) -> Option<(Word, Word)> {
        let pc = usize::try_from(pc).ok()?;
        let opcode = *self.memory.get(pc)?;
        let operand = *self.memory.get(pc.checked_add(1)?)?;
        Some((opcode, operand))
    }
}

fn index(memory: &[Word], address: Word) -> Result<usize, MachineError> {
    usize::try_from(address)
        .ok()
        .filter(|i| *i < memory.len())
        .ok_or_else(|| {
            MachineError::new(
                MachineErrorCode::AddressOutOfRange,
                format!(
                    "address [ {address} ] is outside memory of [ {} ] words",
                    memory.len()
                ),
            )
        })
}

fn read(memory: &[Word], address: Word) -> Result<Word, MachineError> {
    Ok(memory[index(memory, address)?])
}

fn read_indirect(memory: &[Word], address: Word) -> Result<Word, MachineError> {
    read(memory, read(memory, address)?)
}

fn write(memory: &mut [Word], address: Word, value: Word) -> Result<(), MachineError> {
    let i = index(memory, address)?;
    memory[i] = value;
    Ok(())
}

// Shifts of a full word or more clear the accumulator.
fn shift_left(value: Word, amount: Word) -> Word {
    u32::try_from(amount)
        .ok()
        .filter(|n| *n < WORD_BITS)
        .map_or(0, |n| value << n)
}

fn shift_right(value: Word, amount: Word) -> Word {
    u32::try_from(amount)
        .ok()
        .filter(|n| *n < WORD_BITS)
        .map_or(0, |n| value >> n)
}

/// Reads the next non-whitespace byte.
fn read_char(console: &mut dyn Console) -> Result<u8, MachineError> {
    loop {
        match console.read_byte()? {
            Some(byte) if byte.is_ascii_whitespace() => continue,
            Some(byte) => return Ok(byte),
            None => {
                return Err(MachineError::new(
                    MachineErrorCode::InputClosed,
                    "IN executed with no input left",
                ))
            }
        }
    }
}
