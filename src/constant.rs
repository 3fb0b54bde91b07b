pub type Word = u64;
pub const WORD_BITS: u32 = Word::BITS;

pub const NAME: &str = "accvm";
pub const DEFAULT_MEMORY_SIZE: usize = 1024;
pub const MIN_MEMORY_SIZE: usize = INSTRUCTION_WORDS;
// opcode word + operand word
pub const INSTRUCTION_WORDS: usize = 2;

pub const DEC: char = '#';
pub const BINARY: char = 'B';
pub const HEX: char = '&';
pub const OCTAL: char = 'o';
pub const DEFAULT_OPERAND: &str = "#0";

pub const LABEL_SUFFIX: char = ':';
pub const COMMENT: &str = "//";

pub const INSPECT_RADIUS: usize = 5;
