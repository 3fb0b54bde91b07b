use crate::{
    constant::{Word, BINARY, DEC, HEX, OCTAL},
    error::{LoadError, LoadErrorCode},
    label::LabelTable,
};

fn radix_of(prefix: char) -> Option<(u32, &'static str)> {
    match prefix {
        DEC => Some((10, "decimal")),
        BINARY => Some((2, "binary")),
        HEX => Some((16, "hex")),
        OCTAL => Some((8, "octal")),
        _ => None,
    }
}

/// Resolves an operand token to the word stored after the opcode.
///
/// Labels are looked up first, then the leading character picks the
/// literal radix:
///
/// | prefix | radix |
/// |--------|-------|
/// | `#`    | 10    |
/// | `B`    | 2     |
/// | `&`    | 16    |
/// | `o`    | 8     |
///
/// A token that is neither a bound label nor a well-formed literal is a
/// fatal load error.
pub fn resolve(token: &str, labels: &LabelTable) -> Result<Word, LoadError> {
    if let Some(address) = labels.address_of(token) {
        return Ok(address as Word);
    }
    match parse_literal(token) {
        Some(parsed) => parsed,
        None => Err(LoadError::new(
            LoadErrorCode::InvalidOperand,
            format!("[ {token} ] is not a numeric literal or a defined label"),
        )),
    }
}

/// Parses `token` as a prefixed literal. Returns `None` when the first
/// character is not a literal prefix at all.
pub fn parse_literal(token: &str) -> Option<Result<Word, LoadError>> {
    let mut chars = token.chars();
    let prefix = chars.next()?;
    let (radix, kind) = radix_of(prefix)?;
    let digits = chars.as_str();

    if digits.is_empty() {
        return Some(Err(LoadError::new(
            LoadErrorCode::InvalidOperand,
            format!("[ {token} ] is an empty {kind} literal"),
        )));
    }
    // from_str_radix tolerates a leading sign, the literal grammar does not
    if let Some(bad) = digits.chars().find(|c| !c.is_digit(radix)) {
        return Some(Err(LoadError::new(
            LoadErrorCode::InvalidOperand,
            format!("[ {token} ] is an invalid {kind} literal :: [ {bad} ] is not a base {radix} digit"),
        )));
    }
    Some(Word::from_str_radix(digits, radix).map_err(|err| {
        LoadError::new(
            LoadErrorCode::InvalidOperand,
            format!("[ {token} ] is an invalid {kind} literal :: [ {err} ]"),
        )
    }))
}

/// True when `token` parses cleanly as a prefixed literal.
pub fn is_literal(token: &str) -> bool {
    matches!(parse_literal(token), Some(Ok(_)))
}
