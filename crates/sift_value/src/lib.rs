//! Sift Value - runtime values queried by sift patterns.
//!
//! A `Value` is a scalar, a list, or a string-keyed record. Containers are
//! shared handles: cloning a `Value` never copies a list or record, it hands
//! out another reference to the same storage. This is what lets a value graph
//! contain cycles and shared subtrees, and what gives containers an identity
//! ([`NodeId`]) distinct from their contents.
//!
//! # Construction
//!
//! All heap-backed values go through factory methods:
//!
//! ```text
//! let name = Value::string("x");
//! let args = Value::list(vec![Value::int(1), Value::Null]);
//! let node = Value::record([("type", Value::string("Var")), ("name", name)]);
//! ```
//!
//! Cycles are tied after construction with [`Value::push`] and
//! [`Value::insert`]:
//!
//! ```text
//! let node = Value::empty_record();
//! node.insert("self", node.clone())?;
//! ```
//!
//! Reference cycles are never reclaimed; a client that builds one owns that
//! allocation for the life of the process unless it breaks the cycle itself.

mod composite;
mod errors;
mod heap;
mod kind;

use std::fmt;

use sift_stack::ensure_sufficient_stack;

pub use composite::{ListValue, NodeId, RecordValue};
pub use errors::ValueError;
pub use heap::Heap;
pub use kind::ValueKind;

/// A runtime value: scalar, list, or record.
#[derive(Clone)]
pub enum Value {
    // Scalars (inline)
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),

    // Heap-backed
    /// Immutable string.
    Str(Heap<str>),
    /// Ordered sequence.
    List(ListValue),
    /// String-keyed record.
    Record(RecordValue),
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(x: f64) -> Self {
        Value::Float(x)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::from_string(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListValue::new(items))
    }

    #[inline]
    pub fn empty_list() -> Self {
        Value::list(Vec::new())
    }

    /// Create a record from `(key, value)` pairs.
    ///
    /// Keys keep their first-insertion position; a repeated key overwrites the
    /// earlier value.
    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Record(RecordValue::new(entries))
    }

    #[inline]
    pub fn empty_record() -> Self {
        Value::record(std::iter::empty::<(String, Value)>())
    }
}

// Mutation (client-side construction only)

impl Value {
    /// Append `item` to this list.
    pub fn push(&self, item: Value) -> Result<(), ValueError> {
        match self {
            Value::List(list) => {
                list.push(item);
                Ok(())
            }
            other => Err(ValueError::NotAList {
                found: other.kind(),
            }),
        }
    }

    /// Set field `key` on this record, returning the previous value.
    pub fn insert(
        &self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, ValueError> {
        match self {
            Value::Record(record) => Ok(record.insert(key.into(), value)),
            other => Err(ValueError::NotARecord {
                found: other.kind(),
            }),
        }
    }
}

// Accessors

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Record(_) => ValueKind::Record,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Lists and records; the only values with an identity and children.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Record(_))
    }

    /// Container identity, `None` for scalars.
    pub fn identity(&self) -> Option<NodeId> {
        match self {
            Value::List(list) => Some(list.id()),
            Value::Record(record) => Some(record.id()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "ints are viewed as numbers, same as the equality rule"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Number of elements or fields; `None` for scalars.
    pub fn size(&self) -> Option<usize> {
        match self {
            Value::List(list) => Some(list.len()),
            Value::Record(record) => Some(record.len()),
            _ => None,
        }
    }

    pub fn get_index(&self, index: usize) -> Option<Value> {
        self.as_list()?.get(index)
    }

    pub fn get_field(&self, key: &str) -> Option<Value> {
        self.as_record()?.get(key)
    }

    /// Direct children: list elements in order, or record field values in
    /// key order. Scalars have none.
    pub fn children(&self) -> Vec<Value> {
        match self {
            Value::List(list) => list.snapshot(),
            Value::Record(record) => record.values(),
            _ => Vec::new(),
        }
    }

    /// Identity-aware equality.
    ///
    /// Scalars compare by value, with `Int` and `Float` compared as numbers.
    /// Strings compare by contents. Lists and records compare by identity, so
    /// this always terminates on cyclic values.
    #[allow(
        clippy::float_cmp,
        clippy::cast_precision_loss,
        reason = "numeric equality is exact by definition"
    )]
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => Heap::ptr_eq(a, b) || a == b,
            (Value::List(a), Value::List(b)) => a.id() == b.id(),
            (Value::Record(a), Value::Record(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

// Display

/// Writes `value`, printing `<cycle>` for a container already open on the
/// current path.
fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, path: &mut Vec<NodeId>) -> fmt::Result {
    ensure_sufficient_stack(|| {
        if let Some(id) = value.identity() {
            if path.contains(&id) {
                return f.write_str("<cycle>");
            }
        }
        match value {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::List(list) => {
                path.push(list.id());
                f.write_str("[")?;
                for (i, item) in list.snapshot().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_value(f, item, path)?;
                }
                path.pop();
                f.write_str("]")
            }
            Value::Record(record) => {
                path.push(record.id());
                f.write_str("{")?;
                for (i, (key, field)) in record.entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: ", &**key)?;
                    write_value(f, field, path)?;
                }
                path.pop();
                f.write_str("}")
            }
        }
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests;
