//! Core utilities and foundation types shared by the evalex crates.
//!
//! This crate provides the small set of primitives used throughout the
//! evaluator pipeline: byte-offset [`span::Span`]s for error reporting, and
//! an interned [`symbol::Symbol`] type for variable and host function names
//! so that context lookups compare integers rather than strings.

pub mod error;
pub mod span;
pub mod symbol;
pub mod value;

pub use error::{SymbolError, SymbolResult};
pub use rustc_hash::{FxHashMap, FxHashSet};
pub use span::Span;
pub use symbol::Symbol;
pub use value::{HostFn, HostRegistry, Params, Value};
