use crate::{
    error::{LoadError, LoadErrorCode},
    operand,
};
use std::collections::{BTreeMap, HashMap};

/// Symbolic names bound to memory addresses.
///
/// Two views are kept in step: `by_address` drives display (at most one
/// name per address) and `by_name` drives operand resolution. Both are
/// filled during load and are read-only once the program is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    by_address: BTreeMap<usize, String>,
    by_name: HashMap<String, usize>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, address: usize) -> Result<(), LoadError> {
        validate_name(name)?;
        if let Some(existing) = self.by_name.get(name) {
            return Err(LoadError::new(
                LoadErrorCode::DuplicateLabel,
                format!("label [ {name} ] is already bound to address [ {existing} ]"),
            ));
        }
        if let Some(existing) = self.by_address.get(&address) {
            return Err(LoadError::new(
                LoadErrorCode::LabelCollision,
                format!("address [ {address} ] already carries label [ {existing} ], cannot add [ {name} ]"),
            ));
        }
        self.by_address.insert(address, name.to_string());
        self.by_name.insert(name.to_string(), address);
        Ok(())
    }

    pub fn address_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn name_at(&self, address: usize) -> Option<&str> {
        self.by_address.get(&address).map(String::as_str)
    }

    /// Labels in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.by_address
            .iter()
            .map(|(address, name)| (*address, name.as_str()))
    }

    pub fn highest_address(&self) -> Option<usize> {
        self.by_address.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), LoadError> {
    let invalid = |why: &str| {
        Err(LoadError::new(
            LoadErrorCode::InvalidLabelName,
            format!("[ {name} ] is not a valid label name :: {why}"),
        ))
    };
    let Some(first) = name.chars().next() else {
        return invalid("label names cannot be empty");
    };
    if first.is_ascii_digit() {
        return invalid("label names cannot start with a digit");
    }
    if let Some(bad) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return invalid(&format!("character [ {bad} ] is not allowed"));
    }
    if operand::is_literal(name) {
        return invalid("the name reads as a numeric literal");
    }
    Ok(())
}
