//! Match bindings.

use std::fmt;

use rustc_hash::FxHashMap;
use sift_value::Value;

use crate::Name;

/// Names bound by a successful match, each mapped to the value it matched.
///
/// Values are shared handles into the matched input, not copies. Bindings
/// hold no reference to the pattern that produced them.
#[derive(Clone, Default, PartialEq)]
pub struct Bindings {
    map: FxHashMap<Name, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    /// Value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(|name| &**name).collect();
        names.sort_unstable();
        names
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.map.iter().map(|(name, value)| (&**name, value))
    }

    /// Add or overwrite `name`.
    #[must_use]
    pub(crate) fn with(mut self, name: Name, value: Value) -> Self {
        self.map.insert(name, value);
        self
    }

    /// Union of both maps; entries from `later` win on collision.
    #[must_use]
    pub(crate) fn merge(mut self, later: Bindings) -> Self {
        if self.map.is_empty() {
            return later;
        }
        self.map.extend(later.map);
        self
    }
}

impl<K: Into<Name>> FromIterator<(K, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Bindings {
            map: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&str, &Value)> = self.iter().collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        f.debug_map().entries(entries).finish()
    }
}
