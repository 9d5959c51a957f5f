//! Container values: lists and records.
//!
//! Both are shared handles around a lock, so a client can tie a cycle after
//! construction (`node.insert("self", node.clone())`). Readers only ever hold
//! the lock long enough to clone out the handles they need; nothing in this
//! crate calls back into client code while a lock is held.
//!
//! Dropping the last handle to a container releases its descendants with an
//! explicit work list, so arbitrarily deep nesting never overflows the stack.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::heap::Heap;
use super::Value;

/// Identity of a container, stable for as long as any handle to it lives.
///
/// Two handles have the same `NodeId` exactly when they share storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

// ListValue

/// Shared, ordered sequence of values.
#[derive(Clone)]
pub struct ListValue {
    items: Heap<RwLock<Vec<Value>>>,
}

impl ListValue {
    pub(crate) fn new(items: Vec<Value>) -> Self {
        ListValue {
            items: Heap::new(RwLock::new(items)),
        }
    }

    pub fn id(&self) -> NodeId {
        NodeId(self.items.addr())
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Element at `index`, if present.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.read().get(index).cloned()
    }

    /// Copy of the element handles, in order.
    pub fn snapshot(&self) -> Vec<Value> {
        self.items.read().clone()
    }

    pub(crate) fn push(&self, item: Value) {
        self.items.write().push(item);
    }

    /// Move the elements into `out` if this is the last handle.
    fn take_children(&mut self, out: &mut Vec<Value>) {
        if let Some(items) = self.items.get_mut() {
            out.append(items.get_mut());
        }
    }
}

impl Drop for ListValue {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        release(pending);
    }
}

// RecordValue

#[derive(Default)]
struct Fields {
    /// Entries in insertion order.
    entries: Vec<(Heap<str>, Value)>,
    /// Key -> position in `entries`.
    index: FxHashMap<Heap<str>, usize>,
}

impl Fields {
    fn insert(&mut self, key: Heap<str>, value: Value) -> Option<Value> {
        if let Some(&pos) = self.index.get(&*key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }
}

/// Shared record of string-keyed fields.
///
/// Keys keep their insertion order; overwriting a key keeps its position.
#[derive(Clone)]
pub struct RecordValue {
    fields: Heap<RwLock<Fields>>,
}

impl RecordValue {
    pub(crate) fn new<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut fields = Fields::default();
        for (key, value) in entries {
            fields.insert(Heap::from_string(key.into()), value);
        }
        RecordValue {
            fields: Heap::new(RwLock::new(fields)),
        }
    }

    pub fn id(&self) -> NodeId {
        NodeId(self.fields.addr())
    }

    pub fn len(&self) -> usize {
        self.fields.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.read().entries.is_empty()
    }

    /// Whether `key` is one of this record's own fields.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.read().index.contains_key(key)
    }

    /// Field value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<Value> {
        let fields = self.fields.read();
        let pos = *fields.index.get(key)?;
        Some(fields.entries[pos].1.clone())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<Heap<str>> {
        self.fields
            .read()
            .entries
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Field values in key order.
    pub fn values(&self) -> Vec<Value> {
        self.fields
            .read()
            .entries
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Copy of the `(key, value)` handles in key order.
    pub fn entries(&self) -> Vec<(Heap<str>, Value)> {
        self.fields.read().entries.clone()
    }

    pub(crate) fn insert(&self, key: String, value: Value) -> Option<Value> {
        self.fields.write().insert(Heap::from_string(key), value)
    }

    /// Move the field values into `out` if this is the last handle.
    fn take_children(&mut self, out: &mut Vec<Value>) {
        if let Some(fields) = self.fields.get_mut() {
            let fields = fields.get_mut();
            fields.index.clear();
            out.extend(fields.entries.drain(..).map(|(_, value)| value));
        }
    }
}

impl Drop for RecordValue {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        release(pending);
    }
}

/// Drop a batch of values without recursing once per nesting level.
///
/// Every container is emptied into `pending` before it goes out of scope, so
/// its own `Drop` finds nothing left to release.
fn release(mut pending: Vec<Value>) {
    while let Some(value) = pending.pop() {
        match value {
            Value::List(mut list) => list.take_children(&mut pending),
            Value::Record(mut record) => record.take_children(&mut pending),
            _ => {}
        }
    }
}
