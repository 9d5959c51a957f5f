//! Algebraic properties of unification over generated acyclic values.

#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use proptest::prelude::*;
use sift_patterns::{is_match, search, unify, Bindings, Pattern, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..5).prop_map(Value::int),
        "[a-c]{0,2}".prop_map(Value::string),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::vec(("[a-c]", inner), 0..4).prop_map(Value::record),
        ]
    })
}

/// Patterns over the same small alphabet as `value()`, so both outcomes occur.
fn pattern() -> impl Strategy<Value = Pattern> {
    let leaf = prop_oneof![
        Just(Pattern::any()),
        (-5i64..5).prop_map(Pattern::eq),
        "[a-c]{0,2}".prop_map(Pattern::eq),
        Just(Pattern::satisfy(|v| v.is_container())),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            ("[x-z]", inner.clone()).prop_map(|(name, p)| Pattern::bind(name, p)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Pattern::or(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Pattern::and(l, r)),
            inner.clone().prop_map(Pattern::not),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Pattern::array),
            prop::collection::vec(("[a-c]", inner), 0..3).prop_map(Pattern::record),
        ]
    })
}

proptest! {
    #[test]
    fn any_always_matches(v in value()) {
        prop_assert_eq!(unify(&v, &Pattern::any()), Some(Bindings::new()));
    }

    #[test]
    fn bind_adds_exactly_the_value(v in value(), p in pattern()) {
        let plain = unify(&v, &p);
        let bound = unify(&v, &Pattern::bind("__whole", p));
        match (plain, bound) {
            (None, None) => {}
            (Some(plain), Some(bound)) => {
                prop_assert_eq!(bound.len(), plain.len() + 1);
                prop_assert_eq!(bound.get("__whole"), Some(&v));
                for (name, value) in plain.iter() {
                    prop_assert_eq!(bound.get(name), Some(value));
                }
            }
            (plain, bound) => prop_assert!(false, "disagree: {:?} vs {:?}", plain, bound),
        }
    }

    #[test]
    fn not_is_the_binding_free_complement(v in value(), p in pattern()) {
        let negated = unify(&v, &Pattern::not(p.clone()));
        if is_match(&v, &p) {
            prop_assert_eq!(negated, None);
        } else {
            prop_assert_eq!(negated, Some(Bindings::new()));
        }
    }

    #[test]
    fn and_right_bindings_win(v in value(), l in pattern(), r in pattern()) {
        let both = unify(&v, &Pattern::and(l.clone(), r.clone()));
        match (unify(&v, &l), unify(&v, &r)) {
            (Some(left), Some(right)) => {
                let both = both.unwrap();
                for (name, value) in right.iter() {
                    prop_assert_eq!(both.get(name), Some(value));
                }
                for (name, value) in left.iter() {
                    if !right.contains(name) {
                        prop_assert_eq!(both.get(name), Some(value));
                    }
                }
            }
            _ => prop_assert_eq!(both, None),
        }
    }

    #[test]
    fn or_is_left_then_right(v in value(), l in pattern(), r in pattern()) {
        let either = unify(&v, &Pattern::or(l.clone(), r.clone()));
        let expected = unify(&v, &l).or_else(|| unify(&v, &r));
        prop_assert_eq!(either, expected);
    }

    #[test]
    fn unify_is_repeatable(v in value(), p in pattern()) {
        prop_assert_eq!(unify(&v, &p), unify(&v, &p));
    }

    #[test]
    fn search_root_agrees_with_unify(v in value(), p in pattern()) {
        let first = search(&v, &p).next();
        if let Some(root) = unify(&v, &p) {
            prop_assert_eq!(first, Some(root));
        }
    }

    #[test]
    fn search_any_counts_every_node_of_a_tree(v in value()) {
        fn count(v: &Value) -> usize {
            1 + v.children().iter().map(count).sum::<usize>()
        }
        prop_assert_eq!(search(&v, &Pattern::any()).count(), count(&v));
    }
}
