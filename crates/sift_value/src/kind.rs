use std::fmt;

/// Coarse classification of a [`Value`](crate::Value).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Record,
}

impl ValueKind {
    /// Lowercase name used in messages and pattern displays.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::List => "list",
            ValueKind::Record => "record",
        }
    }

    /// Scalars are never descended into.
    pub fn is_scalar(self) -> bool {
        !matches!(self, ValueKind::List | ValueKind::Record)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
