//! Lazy, cycle-safe search over a value graph.
//!
//! [`Search`] walks every node reachable from a root in depth-first
//! pre-order and yields the bindings of each node that unifies with the
//! pattern. It is an ordinary pull iterator: each `next()` resumes from its
//! own traversal stack and does only the work needed to find the next match,
//! so `search(..).next()` or `.take(n)` never touch the rest of the graph.
//!
//! # Cycles and sharing
//!
//! Each `Search` owns a set of container identities it has already entered.
//! A list or record met a second time, whether through a cycle or through a
//! second path to shared structure, is skipped without being unified or
//! descended into. Scalars have no identity and are unified wherever they
//! appear.
//!
//! # Order
//!
//! A node is unified before its children. List elements are visited in index
//! order, record fields in key insertion order.

use std::iter::FusedIterator;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use sift_value::{NodeId, Value};

use crate::{unify, Bindings, Pattern};

/// Pending nodes, next to visit on top.
type Pending = SmallVec<[Value; 16]>;

/// Search `value` and everything reachable from it for nodes matching `pattern`.
pub fn search(value: &Value, pattern: &Pattern) -> Search {
    Search::new(value, pattern)
}

/// Like [`search`], but also yields the matched node.
pub fn search_nodes(value: &Value, pattern: &Pattern) -> SearchNodes {
    Search::new(value, pattern).with_nodes()
}

/// Single-pass iterator over the bindings of every matching node.
///
/// Holds shared handles to the pattern and to not-yet-visited nodes until it
/// is dropped. Start a fresh search to traverse again.
pub struct Search {
    pattern: Pattern,
    pending: Pending,
    visited: FxHashSet<NodeId>,
}

impl Search {
    fn new(root: &Value, pattern: &Pattern) -> Self {
        debug!(pattern = pattern.tag(), root = ?root.kind(), "search started");
        let mut pending = Pending::new();
        pending.push(root.clone());
        Search {
            pattern: pattern.clone(),
            pending,
            visited: FxHashSet::default(),
        }
    }

    /// Yield `(node, bindings)` instead of bare bindings.
    pub fn with_nodes(self) -> SearchNodes {
        SearchNodes { inner: self }
    }

    /// Number of distinct containers entered so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    fn next_match(&mut self) -> Option<(Value, Bindings)> {
        while let Some(node) = self.pending.pop() {
            if let Some(id) = node.identity() {
                if !self.visited.insert(id) {
                    trace!(?id, "already visited, skipping");
                    continue;
                }
            }

            let found = unify(&node, &self.pattern);

            if node.is_container() {
                // Reversed so the first child is popped first.
                self.pending.extend(node.children().into_iter().rev());
            }

            if let Some(bindings) = found {
                trace!(bound = bindings.len(), "match");
                return Some((node, bindings));
            }
        }
        None
    }
}

impl Iterator for Search {
    type Item = Bindings;

    fn next(&mut self) -> Option<Bindings> {
        self.next_match().map(|(_, bindings)| bindings)
    }
}

impl FusedIterator for Search {}

/// [`Search`] adapter yielding each matching node with its bindings.
pub struct SearchNodes {
    inner: Search,
}

impl Iterator for SearchNodes {
    type Item = (Value, Bindings);

    fn next(&mut self) -> Option<(Value, Bindings)> {
        self.inner.next_match()
    }
}

impl FusedIterator for SearchNodes {}
