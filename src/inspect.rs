use crate::{
    constant::{Word, INSPECT_RADIUS},
    label::LabelTable,
    warn_println,
};
use std::{
    fmt,
    io::{self, Write},
    ops::Range,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub acc: Word,
    pub ix: Word,
    pub pc: Word,
    /// Always 0 or 1.
    pub flag: Word,
}

/// Read-only view of machine state handed to an [`Inspector`].
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub registers: Registers,
    pub memory: &'a [Word],
    pub labels: &'a LabelTable,
}

impl Snapshot<'_> {
    /// Addresses within `INSPECT_RADIUS` of `PC`, clipped to memory. Empty
    /// when `PC` is too far past the end for any address to qualify.
    pub fn window(&self) -> Range<usize> {
        let len = self.memory.len();
        let pc = usize::try_from(self.registers.pc).unwrap_or(usize::MAX);
        let start = pc.saturating_sub(INSPECT_RADIUS).min(len);
        let end = pc.saturating_add(INSPECT_RADIUS + 1).min(len);
        start..end
    }

    pub fn report(&self) -> Report<'_> {
        Report(*self)
    }
}

/// Human-oriented rendering of a [`Snapshot`].
pub struct Report<'a>(Snapshot<'a>);

const REGISTER_RULE: &str = "+--------------------------------------------------+";
const MEMORY_RULE: &str = "+-----------------------------------------------------------+";

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = &self.0;
        let registers = snapshot.registers;
        writeln!(f, "{REGISTER_RULE}")?;
        writeln!(f, "|                     VM State                     |")?;
        writeln!(f, "{REGISTER_RULE}")?;
        for (name, value) in [
            ("ACC", registers.acc),
            (" IX", registers.ix),
            (" PC", registers.pc),
            ("FLG", registers.flag),
        ] {
            writeln!(f, "| {name} |  {value:#018x} | {value:020} |")?;
        }
        writeln!(f, "{REGISTER_RULE}")?;
        writeln!(f)?;
        writeln!(f, "{MEMORY_RULE}")?;
        writeln!(f, "|                    Memory around PC                       |")?;
        writeln!(f, "{MEMORY_RULE}")?;
        for address in snapshot.window() {
            let value = snapshot.memory[address];
            write!(f, "| Mem[{address:04}] |  {value:#018x} | {value:020} |")?;
            if address as Word == registers.pc {
                write!(f, " <-- PC")?;
            }
            if let Some(name) = snapshot.labels.name_at(address) {
                write!(f, "  {name}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{MEMORY_RULE}")
    }
}

/// Receives a snapshot whenever the machine executes `ISP`.
pub trait Inspector {
    fn inspect(&mut self, snapshot: &Snapshot<'_>);
}

impl<F> Inspector for F
where
    F: FnMut(&Snapshot<'_>),
{
    fn inspect(&mut self, snapshot: &Snapshot<'_>) {
        self(snapshot)
    }
}

/// Writes a [`Report`] per inspection. Write failures are logged and
/// otherwise ignored.
pub struct ReportInspector<W: Write> {
    out: W,
}

impl<W: Write> ReportInspector<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ReportInspector<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Inspector for ReportInspector<W> {
    fn inspect(&mut self, snapshot: &Snapshot<'_>) {
        let written = writeln!(self.out, "\n{}", snapshot.report()).and_then(|()| self.out.flush());
        if let Err(err) = written {
            warn_println!("could not write inspector report :: {err}");
        }
    }
}

#[cfg(test)]
mod test;
