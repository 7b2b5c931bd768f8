//! Configuration shared by the `injector` workspace.
//!
//! The dispatch registry is configured once, when its method index is built.
//! The only tunable today is how the index reacts to two handlers that accept
//! the same parameter type. Values deserialize with `serde` so embedding
//! applications can carry them in their own configuration files, and the
//! policy enum also parses from plain text via `strum`.

mod defaults;
mod index;
mod policy;

pub use defaults::{DEFAULT_DUPLICATE_POLICY, default_duplicate_policy};
pub use index::IndexConfig;
pub use policy::{DuplicatePolicy, DuplicatePolicyParseError};
