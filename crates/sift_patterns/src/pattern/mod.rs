//! Pattern model.
//!
//! A [`Pattern`] is a closed, immutable description of a shape a [`Value`]
//! may have. Sub-patterns sit behind `Arc`, so a pattern tree is cheap to
//! clone and can be shared freely between threads and between any number of
//! `unify`/`search` calls.
//!
//! Constructors validate nothing beyond arity and never fail.

use std::fmt;
use std::sync::Arc;

use sift_stack::ensure_sufficient_stack;
use sift_value::{Value, ValueKind};

/// Binding name.
pub type Name = Arc<str>;

type PredicateFn = dyn Fn(&Value) -> bool + Send + Sync;

/// Client-supplied test for [`Pattern::Satisfy`].
///
/// The engine calls it as given; if it panics, the panic unwinds out of
/// `unify` or `Search::next` untouched.
#[derive(Clone)]
pub struct Predicate {
    test: Arc<PredicateFn>,
    /// Shown by `Display`; purely diagnostic.
    label: Option<Arc<str>>,
}

impl Predicate {
    pub fn new(test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Predicate {
            test: Arc::new(test),
            label: None,
        }
    }

    /// Attach a label used when the owning pattern is displayed.
    #[must_use]
    pub fn labeled(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline]
    pub fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "Predicate({label})"),
            None => f.write_str("Predicate(..)"),
        }
    }
}

/// A structural pattern.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Matches every value.
    Any,
    /// Matches when `pattern` does, additionally binding the value to `name`.
    Bind { name: Name, pattern: Arc<Pattern> },
    /// Left if it matches, otherwise right.
    Or(Arc<Pattern>, Arc<Pattern>),
    /// Both must match the same value; right-hand bindings win on collision.
    And(Arc<Pattern>, Arc<Pattern>),
    /// Matches exactly when the inner pattern does not. Never binds.
    Not(Arc<Pattern>),
    /// Matches when the predicate holds. Never binds.
    Satisfy(Predicate),
    /// Positional match against a list no longer than the pattern list.
    Array(Arc<[Pattern]>),
    /// Partial match against a record's named fields.
    Record(Arc<[(Name, Pattern)]>),
}

// Variant constructors

impl Pattern {
    #[inline]
    pub fn any() -> Self {
        Pattern::Any
    }

    pub fn bind(name: impl Into<Name>, pattern: Pattern) -> Self {
        Pattern::Bind {
            name: name.into(),
            pattern: Arc::new(pattern),
        }
    }

    pub fn or(left: Pattern, right: Pattern) -> Self {
        Pattern::Or(Arc::new(left), Arc::new(right))
    }

    pub fn and(left: Pattern, right: Pattern) -> Self {
        Pattern::And(Arc::new(left), Arc::new(right))
    }

    pub fn not(pattern: Pattern) -> Self {
        Pattern::Not(Arc::new(pattern))
    }

    pub fn satisfy(test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Pattern::Satisfy(Predicate::new(test))
    }

    pub fn array(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Array(patterns.into_iter().collect())
    }

    pub fn record<K>(pairs: impl IntoIterator<Item = (K, Pattern)>) -> Self
    where
        K: Into<Name>,
    {
        Pattern::Record(
            pairs
                .into_iter()
                .map(|(name, pattern)| (name.into(), pattern))
                .collect(),
        )
    }
}

// Sugar (lowers to the variants above)

impl Pattern {
    /// `Satisfy` testing [`Value::equals`] against `expected`.
    pub fn eq(expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let label = format!("eq {expected}");
        Pattern::Satisfy(Predicate::new(move |value| value.equals(&expected)).labeled(label))
    }

    /// `Satisfy` testing the value's kind.
    pub fn kind(kind: ValueKind) -> Self {
        let label = format!("kind {kind}");
        Pattern::Satisfy(Predicate::new(move |value| value.kind() == kind).labeled(label))
    }

    /// Right-nested `Or` chain. An empty chain never matches.
    pub fn any_of(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        let mut rest: Vec<Pattern> = patterns.into_iter().collect();
        match rest.pop() {
            Some(last) => rest.into_iter().rev().fold(last, |acc, p| Pattern::or(p, acc)),
            None => Pattern::not(Pattern::Any),
        }
    }

    /// Right-nested `And` chain. An empty chain always matches.
    pub fn all_of(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        let mut rest: Vec<Pattern> = patterns.into_iter().collect();
        match rest.pop() {
            Some(last) => rest.into_iter().rev().fold(last, |acc, p| Pattern::and(p, acc)),
            None => Pattern::Any,
        }
    }
}

impl Pattern {
    /// Variant name, without payload.
    pub fn tag(&self) -> &'static str {
        match self {
            Pattern::Any => "Any",
            Pattern::Bind { .. } => "Bind",
            Pattern::Or(..) => "Or",
            Pattern::And(..) => "And",
            Pattern::Not(_) => "Not",
            Pattern::Satisfy(_) => "Satisfy",
            Pattern::Array(_) => "Array",
            Pattern::Record(_) => "Record",
        }
    }

    /// Move uniquely owned sub-patterns into `out`, leaving `Any` behind.
    fn take_children(&mut self, out: &mut Vec<Pattern>) {
        fn take(slot: &mut Pattern, out: &mut Vec<Pattern>) {
            if !matches!(slot, Pattern::Any) {
                out.push(std::mem::replace(slot, Pattern::Any));
            }
        }

        match self {
            Pattern::Any | Pattern::Satisfy(_) => {}
            Pattern::Bind { pattern: inner, .. } | Pattern::Not(inner) => {
                if let Some(inner) = Arc::get_mut(inner) {
                    take(inner, out);
                }
            }
            Pattern::Or(left, right) | Pattern::And(left, right) => {
                for side in [left, right] {
                    if let Some(side) = Arc::get_mut(side) {
                        take(side, out);
                    }
                }
            }
            Pattern::Array(patterns) => {
                if let Some(patterns) = Arc::get_mut(patterns) {
                    for pattern in patterns {
                        take(pattern, out);
                    }
                }
            }
            Pattern::Record(pairs) => {
                if let Some(pairs) = Arc::get_mut(pairs) {
                    for (_, pattern) in pairs {
                        take(pattern, out);
                    }
                }
            }
        }
    }
}

// Sub-patterns are released through a work list so deep trees do not
// overflow the stack when dropped.
impl Drop for Pattern {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut pattern) = pending.pop() {
            pattern.take_children(&mut pending);
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_to(f))
    }
}

impl Pattern {
    fn write_to(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Any => f.write_str("Any"),
            Pattern::Bind { name, pattern } => write!(f, "Bind({name}, {pattern})"),
            Pattern::Or(left, right) => write!(f, "Or({left}, {right})"),
            Pattern::And(left, right) => write!(f, "And({left}, {right})"),
            Pattern::Not(inner) => write!(f, "Not({inner})"),
            Pattern::Satisfy(predicate) => match predicate.label() {
                Some(label) => write!(f, "Satisfy({label})"),
                None => f.write_str("Satisfy"),
            },
            Pattern::Array(patterns) => {
                f.write_str("Array[")?;
                for (i, pattern) in patterns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{pattern}")?;
                }
                f.write_str("]")
            }
            Pattern::Record(pairs) => {
                f.write_str("Record{")?;
                for (i, (name, pattern)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {pattern}")?;
                }
                f.write_str("}")
            }
        }
    }
}
