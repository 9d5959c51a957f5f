//! Errors raised while building values.
//!
//! Matching never fails with an error; these only come from the client-side
//! mutation helpers used to assemble (possibly cyclic) values.

use crate::ValueKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// `push` on something other than a list.
    #[error("cannot push onto a {found} value, expected a list")]
    NotAList { found: ValueKind },

    /// `insert` on something other than a record.
    #[error("cannot insert a field into a {found} value, expected a record")]
    NotARecord { found: ValueKind },
}
