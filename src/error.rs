use crate::constant::NAME;
use colorize::AnsiColor;
use std::{error::Error, fmt};

/// Fatal conditions raised while building a program image. Any of these
/// aborts the whole load; no partial program is ever handed to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorCode {
    InvalidOperand,
    InvalidLabelName,
    DuplicateLabel,
    LabelCollision,
    ProgramTooLarge,
    InvalidMemorySize,
    UnrecognizedMnemonic,
    IncorrectNumberOfOperands,
    SourceFileError,
}

#[derive(Debug, Clone)]
pub struct LoadError {
    pub code: LoadErrorCode,
    pub reason: String,
}

impl LoadError {
    pub fn new(code: LoadErrorCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// Appends source location context to the reason.
    pub fn with_context(mut self, context: &str) -> Self {
        self.reason = format!("{}\n{context}", self.reason);
        self
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{NAME}: {} {} :: {}",
            "error:".red(),
            format!("{:?}", self.code).yellow(),
            self.reason
        )
    }
}

impl Error for LoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineErrorCode {
    AddressOutOfRange,
    InputClosed,
    Io,
}

#[derive(Debug, Clone)]
pub struct MachineError {
    pub code: MachineErrorCode,
    pub reason: String,
}

impl MachineError {
    pub fn new(code: MachineErrorCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{NAME}: {} {} :: {}",
            "fault:".red(),
            format!("{:?}", self.code).yellow(),
            self.reason
        )
    }
}

impl Error for MachineError {}

impl From<std::io::Error> for MachineError {
    fn from(err: std::io::Error) -> Self {
        MachineError::new(MachineErrorCode::Io, format!("console i/o failed :: {err}"))
    }
}
