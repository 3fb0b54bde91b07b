//! Line-oriented program text.
//!
//! ```text
//! // count down from ten
//!         LDM  #10
//! loop:   DECA
//!         OUT
//!         CMPI #0
//!         JPN  loop
//!         END
//! ```
//!
//! Each line holds an optional `label:`, then a mnemonic and at most one
//! operand. The label may sit directly against the mnemonic (`x:DECA`).
//! A missing operand assembles as `#0`. An operand given to an instruction
//! that has no use for one is kept in memory and reported as a warning.

use crate::{
    constant::{COMMENT, DEFAULT_OPERAND, LABEL_SUFFIX},
    error::{LoadError, LoadErrorCode},
    opcode::OpcodeTable,
    program::{Program, ProgramBuilder},
    verbose_println, warn_println,
};
use colorize::AnsiColor;
use std::{fs, path::Path};

pub struct Source {
    path: String,
    text: String,
}

/// A word on a source line; `column` is zero based.
#[derive(Debug, Clone, Copy)]
struct Lexeme<'a> {
    s: &'a str,
    line: usize,
    column: usize,
}

impl Source {
    pub fn new(path: &str, text: &str) -> Self {
        Self {
            path: path.to_string(),
            text: text.to_string(),
        }
    }

    pub fn open_file(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|err| {
            LoadError::new(
                LoadErrorCode::SourceFileError,
                format!("could not read file `{}` :: {err}", path.display()),
            )
        })?;
        Ok(Self::new(&path.display().to_string(), &text))
    }

    fn traceback(&self, lexeme: &Lexeme) -> String {
        let line = self.text.lines().nth(lexeme.line).unwrap_or_default();
        // columns count chars, lexeme offsets are bytes
        let column = line
            .get(..lexeme.column)
            .map_or(lexeme.column, |before| before.chars().count());
        let mut highlight = " ".repeat(column);
        highlight.push_str(&"^".red());
        highlight.push_str(&"~".repeat(lexeme.s.chars().count().saturating_sub(1)).yellow());
        format!(
            "at {}:{}:{}:\n{line}\n{highlight}",
            self.path,
            lexeme.line + 1,
            column + 1
        )
    }

    /// Feeds every line into `builder`. Operands are only checked for
    /// shape here; they resolve when the builder is built.
    pub fn assemble_into(&self, builder: &mut ProgramBuilder) -> Result<(), LoadError> {
        let opcodes = OpcodeTable::build_table();
        let mut operands: Vec<Lexeme> = vec![];

        for (line_number, line) in self.text.lines().enumerate() {
            let code = match line.find(COMMENT) {
                Some(start) => &line[..start],
                None => line,
            };
            let mut words = split_words(code, line_number).peekable();

            let mut glued = None;
            if let Some(first) = words.peek().copied() {
                if let Some((name, rest)) = first.s.split_once(LABEL_SUFFIX) {
                    words.next();
                    let label = Lexeme { s: name, ..first };
                    builder
                        .label(name)
                        .map_err(|err| err.with_context(&self.traceback(&label)))?;
                    // `name:MNEMONIC` with no space in between
                    if !rest.is_empty() {
                        glued = Some(Lexeme {
                            s: rest,
                            column: first.column + name.len() + LABEL_SUFFIX.len_utf8(),
                            ..first
                        });
                    }
                }
            }
            let Some(mnemonic) = glued.or_else(|| words.next()) else {
                continue;
            };
            let opcode = opcodes
                .get_opcode(mnemonic.s)
                .map_err(|err| err.with_context(&self.traceback(&mnemonic)))?;
            let operand = words.next();
            if let Some(operand) = operand.filter(|_| !opcode.uses_operand()) {
                warn_println!(
                    "[ {opcode} ] ignores its operand [ {} ]\n{}",
                    operand.s,
                    self.traceback(&operand)
                );
            }
            if let Some(extra) = words.next() {
                return Err(LoadError::new(
                    LoadErrorCode::IncorrectNumberOfOperands,
                    format!("[ {opcode} ] takes a single operand, found [ {} ]", extra.s),
                )
                .with_context(&self.traceback(&extra)));
            }
            operands.extend(operand);
            builder.instruction(opcode, operand.map_or(DEFAULT_OPERAND, |o| o.s));
        }
        verbose_println!("read [ {} ] words of program from {}", builder.position(), self.path);
        self.check_operands(builder, &operands)
    }

    // Resolution failures inside `build` have no position; probe them here
    // so the error can point at the offending token.
    fn check_operands(
        &self,
        builder: &ProgramBuilder,
        operands: &[Lexeme],
    ) -> Result<(), LoadError> {
        for lexeme in operands {
            if let Err(err) = builder.probe_operand(lexeme.s) {
                return Err(err.with_context(&self.traceback(lexeme)));
            }
        }
        Ok(())
    }
}

fn split_words(code: &str, line: usize) -> impl Iterator<Item = Lexeme<'_>> {
    let is_separator = |c: char| c.is_whitespace() || c == ',';
    let mut rest = code;
    let mut offset = 0;
    std::iter::from_fn(move || {
        let trimmed = rest.trim_start_matches(is_separator);
        offset += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            return None;
        }
        let end = trimmed.find(is_separator).unwrap_or(trimmed.len());
        let lexeme = Lexeme {
            s: &trimmed[..end],
            line,
            column: offset,
        };
        offset += end;
        rest = &trimmed[end..];
        Some(lexeme)
    })
}

pub fn load_source(source: &Source, memory_size: usize) -> Result<Program, LoadError> {
    let mut builder = ProgramBuilder::new(memory_size)?;
    source.assemble_into(&mut builder)?;
    builder.build()
}

pub fn load_str(text: &str, memory_size: usize) -> Result<Program, LoadError> {
    load_source(&Source::new("<inline>", text), memory_size)
}

pub fn load_file(path: &Path, memory_size: usize) -> Result<Program, LoadError> {
    load_source(&Source::open_file(path)?, memory_size)
}
