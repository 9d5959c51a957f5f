//! Structural unification of a value against a pattern.
//!
//! There is one failure kind, "no match", encoded as `None`. Combinators
//! evaluate left to right and stop at the first failing branch; `Or` runs
//! its left side to completion before trying the right.

use sift_stack::ensure_sufficient_stack;
use sift_value::Value;

use crate::{Bindings, Name, Pattern};

/// Match `value` against `pattern`, returning the bindings on success.
///
/// Neither argument is mutated. The only side effects are those of
/// `Satisfy` predicates, whose panics propagate to the caller.
#[tracing::instrument(level = "trace", skip_all, fields(pattern = pattern.tag()))]
pub fn unify(value: &Value, pattern: &Pattern) -> Option<Bindings> {
    unify_node(value, pattern)
}

/// Whether `value` matches `pattern`, discarding bindings.
pub fn is_match(value: &Value, pattern: &Pattern) -> bool {
    unify_node(value, pattern).is_some()
}

fn unify_node(value: &Value, pattern: &Pattern) -> Option<Bindings> {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Any => Some(Bindings::new()),

        Pattern::Bind { name, pattern } => {
            unify_node(value, pattern).map(|bindings| bindings.with(name.clone(), value.clone()))
        }

        Pattern::Or(left, right) => unify_node(value, left).or_else(|| unify_node(value, right)),

        Pattern::And(left, right) => {
            let left = unify_node(value, left)?;
            let right = unify_node(value, right)?;
            Some(left.merge(right))
        }

        // Whatever the inner pattern bound is dropped here.
        Pattern::Not(inner) => match unify_node(value, inner) {
            Some(_) => None,
            None => Some(Bindings::new()),
        },

        Pattern::Satisfy(predicate) => predicate.test(value).then(Bindings::new),

        Pattern::Array(patterns) => unify_array(value, patterns),

        Pattern::Record(pairs) => unify_record(value, pairs),
    })
}

/// Every element must match the pattern at its index. The list may be
/// shorter than the pattern list; trailing patterns are not consulted.
fn unify_array(value: &Value, patterns: &[Pattern]) -> Option<Bindings> {
    let Value::List(list) = value else {
        return None;
    };
    let items = list.snapshot();
    if items.len() > patterns.len() {
        return None;
    }
    items
        .iter()
        .zip(patterns)
        .try_fold(Bindings::new(), |acc, (item, pattern)| {
            Some(acc.merge(unify_node(item, pattern)?))
        })
}

/// Every named field must exist and match; other fields are ignored.
fn unify_record(value: &Value, pairs: &[(Name, Pattern)]) -> Option<Bindings> {
    let Value::Record(record) = value else {
        return None;
    };
    pairs.iter().try_fold(Bindings::new(), |acc, (name, pattern)| {
        let field = record.get(name)?;
        Some(acc.merge(unify_node(&field, pattern)?))
    })
}
