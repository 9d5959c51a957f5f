#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn factory_methods() {
    assert_eq!(Value::string("hi").as_str(), Some("hi"));
    assert_eq!(Value::int(3).as_int(), Some(3));
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::list(vec![Value::Null]).size(), Some(1));
    assert_eq!(Value::empty_record().size(), Some(0));
    assert_eq!(Value::int(3).size(), None);
}

#[test]
fn kinds() {
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_eq!(Value::float(1.5).kind(), ValueKind::Float);
    assert_eq!(Value::string("s").kind(), ValueKind::Str);
    assert_eq!(Value::empty_list().kind(), ValueKind::List);
    assert_eq!(Value::empty_record().kind(), ValueKind::Record);
    assert!(ValueKind::Str.is_scalar());
    assert!(!ValueKind::Record.is_scalar());
}

#[test]
fn scalar_equality() {
    assert_eq!(Value::int(1), Value::int(1));
    assert_ne!(Value::int(1), Value::int(2));
    assert_eq!(Value::int(1), Value::float(1.0));
    assert_ne!(Value::float(f64::NAN), Value::float(f64::NAN));
    assert_eq!(Value::string("a"), Value::string("a"));
    assert_ne!(Value::string("1"), Value::int(1));
    assert_ne!(Value::Null, Value::Bool(false));
}

#[test]
fn containers_compare_by_identity() {
    let a = Value::list(vec![Value::int(1)]);
    let b = Value::list(vec![Value::int(1)]);
    assert_ne!(a, b);
    assert_eq!(a, a.clone());

    let r = Value::empty_record();
    assert_eq!(r.identity(), r.clone().identity());
    assert_eq!(Value::int(1).identity(), None);
}

#[test]
fn push_and_insert_tie_cycles() {
    let node = Value::empty_record();
    assert_eq!(node.insert("self", node.clone()), Ok(None));
    assert_eq!(node.get_field("self"), Some(node.clone()));

    let list = Value::empty_list();
    list.push(list.clone()).unwrap();
    assert_eq!(list.get_index(0), Some(list.clone()));
}

#[test]
fn mutation_of_wrong_kind_is_an_error() {
    assert_eq!(
        Value::int(1).push(Value::Null),
        Err(ValueError::NotAList {
            found: ValueKind::Int
        })
    );
    assert_eq!(
        Value::empty_list().insert("k", Value::Null),
        Err(ValueError::NotARecord {
            found: ValueKind::List
        })
    );
    assert_eq!(
        Value::Null.push(Value::Null).unwrap_err().to_string(),
        "cannot push onto a null value, expected a list"
    );
}

#[test]
fn children_in_order() {
    let record = Value::record([("b", Value::int(2)), ("a", Value::int(1))]);
    assert_eq!(record.children(), vec![Value::int(2), Value::int(1)]);

    let list = Value::list(vec![Value::int(1), Value::string("x")]);
    assert_eq!(list.children(), vec![Value::int(1), Value::string("x")]);

    assert!(Value::string("x").children().is_empty());
}

#[test]
fn display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::float(1.0).to_string(), "1.0");
    assert_eq!(Value::string("a\"b").to_string(), "\"a\\\"b\"");
    let v = Value::record([
        ("type", Value::string("Call")),
        ("args", Value::list(vec![Value::int(1), Value::Bool(false)])),
    ]);
    assert_eq!(v.to_string(), "{type: \"Call\", args: [1, false]}");
}

#[test]
fn display_marks_cycles() {
    let node = Value::record([("v", Value::int(1))]);
    node.insert("self", node.clone()).unwrap();
    assert_eq!(node.to_string(), "{v: 1, self: <cycle>}");
}

#[test]
fn display_repeats_shared_acyclic_subtrees() {
    let shared = Value::list(vec![Value::int(1)]);
    let root = Value::list(vec![shared.clone(), shared]);
    assert_eq!(root.to_string(), "[[1], [1]]");
}

#[test]
fn null_check() {
    assert!(Value::Null.is_null());
    assert!(!Value::Bool(false).is_null());
    assert!(!Value::int(0).is_null());
    assert!(!Value::empty_list().is_null());
}

#[test]
fn numbers_view_as_float() {
    assert_eq!(Value::float(2.5).as_float(), Some(2.5));
    assert_eq!(Value::int(-3).as_float(), Some(-3.0));
    assert_eq!(Value::string("1").as_float(), None);
    assert_eq!(Value::Null.as_float(), None);
}
