use crate::{
    constant::{Word, DEFAULT_OPERAND, INSTRUCTION_WORDS, MIN_MEMORY_SIZE},
    error::{LoadError, LoadErrorCode},
    label::LabelTable,
    opcode::Opcode,
    operand, very_verbose_println,
};

/// A loaded program image: the whole of memory plus its labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    memory: Vec<Word>,
    labels: LabelTable,
}

impl Program {
    pub fn words(&self) -> &[Word] {
        &self.memory
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn memory_size(&self) -> usize {
        self.memory.len()
    }

    pub fn into_parts(self) -> (Vec<Word>, LabelTable) {
        (self.memory, self.labels)
    }
}

/// An instruction whose operand token has not been resolved yet.
#[derive(Debug)]
struct PendingInstruction {
    address: usize,
    opcode: Word,
    operand: String,
}

/// Lays out instruction pairs and labels in program order, then resolves
/// every operand token in [`ProgramBuilder::build`]. Deferring resolution
/// lets operands name labels defined further down.
#[derive(Debug)]
pub struct ProgramBuilder {
    memory_size: usize,
    position: usize,
    instructions: Vec<PendingInstruction>,
    labels: LabelTable,
}

impl ProgramBuilder {
    pub fn new(memory_size: usize) -> Result<Self, LoadError> {
        if memory_size < MIN_MEMORY_SIZE {
            return Err(LoadError::new(
                LoadErrorCode::InvalidMemorySize,
                format!("memory must hold at least [ {MIN_MEMORY_SIZE} ] words, got [ {memory_size} ]"),
            ));
        }
        Ok(Self {
            memory_size,
            position: 0,
            instructions: vec![],
            labels: LabelTable::new(),
        })
    }

    /// Address the next instruction will be written to.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Binds `name` to the current position.
    pub fn label(&mut self, name: &str) -> Result<&mut Self, LoadError> {
        self.labels.define(name, self.position)?;
        very_verbose_println!("bound label [ {name} ] to [ {} ]", self.position);
        Ok(self)
    }

    pub fn instruction(&mut self, opcode: Opcode, operand: &str) -> &mut Self {
        self.raw(Word::from(opcode), operand)
    }

    /// Same as [`ProgramBuilder::instruction`] with the operand fixed to zero.
    pub fn bare(&mut self, opcode: Opcode) -> &mut Self {
        self.instruction(opcode, DEFAULT_OPERAND)
    }

    /// Emits an arbitrary opcode word, including words with no defined
    /// instruction.
    pub fn raw(&mut self, opcode: Word, operand: &str) -> &mut Self {
        self.instructions.push(PendingInstruction {
            address: self.position,
            opcode,
            operand: operand.to_string(),
        });
        self.position += INSTRUCTION_WORDS;
        self
    }

    /// Resolves `token` against the labels bound so far.
    pub fn probe_operand(&self, token: &str) -> Result<Word, LoadError> {
        operand::resolve(token, &self.labels)
    }

    pub fn build(self) -> Result<Program, LoadError> {
        if self.position > self.memory_size {
            return Err(LoadError::new(
                LoadErrorCode::ProgramTooLarge,
                format!(
                    "program needs [ {} ] words but memory holds [ {} ]",
                    self.position, self.memory_size
                ),
            ));
        }
        if let Some(address) = self.labels.highest_address() {
            if address >= self.memory_size {
                return Err(LoadError::new(
                    LoadErrorCode::ProgramTooLarge,
                    format!(
                        "label at [ {address} ] lies past the end of memory [ {} ]",
                        self.memory_size
                    ),
                ));
            }
        }

        let mut memory = vec![0; self.memory_size];
        for pending in &self.instructions {
            let value = operand::resolve(&pending.operand, &self.labels)?;
            very_verbose_println!(
                "[ {:04} ] opcode [ {} ] operand [ {} ] -> [ {value} ]",
                pending.address,
                pending.opcode,
                pending.operand
            );
            memory[pending.address] = pending.opcode;
            memory[pending.address + 1] = value;
        }
        Ok(Program {
            memory,
            labels: self.labels,
        })
    }
}

#[cfg(test)]
mod test;
