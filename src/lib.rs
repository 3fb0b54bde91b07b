//! A small accumulator machine with 64-bit words and a one-pass loader for
//! its assembly listings.
//!
//! ```
//! use accvm::{
//!     console::BufferConsole,
//!     inspect::ReportInspector,
//!     machine::{Exit, Machine},
//!     source::load_str,
//! };
//!
//! let program = load_str("LDM #3\nloop: DECA\nOUT\nCMPI #0\nJPN loop\nEND\n", 64).unwrap();
//! let mut machine = Machine::new(program);
//! let mut console = BufferConsole::new();
//! let mut inspector = ReportInspector::new(Vec::new());
//! let report = machine.run(&mut console, &mut inspector).unwrap();
//! assert_eq!(report.exit, Exit::Halted);
//! assert_eq!(console.output(), &[2, 1, 0]);
//! ```

pub mod console;
pub mod constant;
pub mod error;
pub mod inspect;
pub mod label;
pub mod log;
pub mod machine;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod source;
