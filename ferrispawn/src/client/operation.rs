//! Calculator operations and the name table that resolves them.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{ClientError, Error};

/// The fixed set of operations the calculator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// All operations, in table order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Symbol sent to the calculator at its operation prompt.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    /// Canonical name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationTable::builtin().resolve(s)
    }
}

/// Lookup table from operation names and aliases to [`Operation`]s.
#[derive(Debug, Clone, Default)]
pub struct OperationTable {
    entries: IndexMap<String, Operation>,
}

impl OperationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every operation under its name, its symbol and a short alias.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for op in Operation::ALL {
            table.insert(op.name(), op);
            table.insert(op.symbol(), op);
        }
        table.insert("sub", Operation::Subtract);
        table.insert("mul", Operation::Multiply);
        table.insert("div", Operation::Divide);
        table
    }

    /// Register `name` as an alias for `op`. Names are case-insensitive.
    pub fn insert(&mut self, name: &str, op: Operation) {
        self.entries.insert(name.to_ascii_lowercase(), op);
    }

    /// Look up an operation by name.
    pub fn resolve(&self, name: &str) -> Result<Operation, Error> {
        self.entries
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| {
                ClientError::UnknownOperation {
                    name: name.to_string(),
                }
                .into()
            })
    }

    /// Registered names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_names_and_symbols() {
        let table = OperationTable::builtin();
        assert_eq!(table.resolve("add").unwrap(), Operation::Add);
        assert_eq!(table.resolve("+").unwrap(), Operation::Add);
        assert_eq!(table.resolve(" Divide ").unwrap(), Operation::Divide);
        assert_eq!(table.resolve("mul").unwrap(), Operation::Multiply);
    }

    #[test]
    fn test_unknown_operation() {
        let err = "modulo".parse::<Operation>().unwrap_err();
        assert!(matches!(
            err,
            Error::Client(ClientError::UnknownOperation { ref name }) if name == "modulo"
        ));
    }

    #[test]
    fn test_names_keep_order() {
        let table = OperationTable::builtin();
        let names: Vec<&str> = table.names().take(4).collect();
        assert_eq!(names, vec!["add", "+", "subtract", "-"]);
    }

    #[test]
    fn test_display_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
    }
}
