//! Sift Patterns - structural pattern matching over runtime values.
//!
//! This crate provides:
//! - The pattern model (`Pattern`, `Predicate`)
//! - Unification (`unify`, `is_match`) producing `Bindings`
//! - Lazy, cycle-safe graph search (`search`, `search_nodes`)
//!
//! # Example
//!
//! ```text
//! let calls_on_x = Pattern::record([
//!     ("type", Pattern::eq("Call")),
//!     ("args", Pattern::array([
//!         Pattern::bind("arg", Pattern::record([("name", Pattern::eq("x"))])),
//!         Pattern::any(),
//!     ])),
//! ]);
//!
//! for bindings in search(&tree, &calls_on_x) {
//!     println!("{}", bindings.get("arg").unwrap());
//! }
//! ```
//!
//! # Failure
//!
//! A non-matching value is not an error: `unify` returns `None` and `search`
//! yields nothing for that node. A panicking `Satisfy` predicate unwinds
//! through the engine unchanged.

mod bindings;
mod pattern;
mod search;
mod unify;

pub use bindings::Bindings;
pub use pattern::{Name, Pattern, Predicate};
pub use search::{search, search_nodes, Search, SearchNodes};
pub use unify::{is_match, unify};

// Re-exported so clients can build values without a separate dependency.
pub use sift_value::{NodeId, Value, ValueError, ValueKind};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=sift_patterns=trace`.
/// Safe to call any number of times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
