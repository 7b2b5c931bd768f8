//! Runtime-type dispatch of targets to component handlers.
//!
//! The `injector` crate removes the boilerplate of calling "the right
//! injection method" for every concrete subtype. A component exposes a set of
//! single-argument handlers, each accepting one target type. Given any target,
//! the [`Registry`] walks the target's [`Lineage`] (its own type, then each
//! ancestor, nearest first) and invokes the first handler it finds.
//!
//! # Architecture
//!
//! - [`Target`] and [`impl_target!`] describe a value's type lineage. Subtypes
//!   are modelled by composition: a derived type embeds its parent.
//! - [`MethodIndex`] is the immutable parameter-type → [`Handler`] map, built
//!   once through an [`IndexBuilder`] configured by
//!   [`injector_config::IndexConfig`].
//! - [`Registry`] owns the component and its index and performs the
//!   dispatch. It also implements the object-safe [`Injector`] trait.
//!
//! Failures are reported as [`DispatchError`] values and never logged as
//! errors by the crate; diagnostic `tracing` events are emitted at debug
//! level.
//!
//! # Example
//!
//! ```rust
//! use injector::{MethodIndex, Registry, impl_target};
//!
//! #[derive(Default)]
//! struct Base {
//!     handled_by: Option<&'static str>,
//! }
//! struct Derived {
//!     base: Base,
//! }
//! struct Unrelated;
//!
//! impl_target!(Base);
//! impl_target!(Derived: Base => base);
//! impl_target!(Unrelated);
//!
//! struct Component;
//! impl Component {
//!     fn handle_base(&self, target: &mut Base) {
//!         target.handled_by = Some("handle_base");
//!     }
//! }
//!
//! let mut builder = MethodIndex::builder();
//! builder.register(Component::handle_base).expect("unique parameter type");
//! let registry = Registry::new(Component, builder.build());
//!
//! let mut derived = Derived { base: Base::default() };
//! registry.dispatch(&mut derived).expect("ancestor handler applies");
//! assert_eq!(derived.base.handled_by, Some("handle_base"));
//!
//! let error = registry.dispatch(&mut Unrelated).expect_err("no handler");
//! assert!(error.is_unresolved());
//! ```

pub mod error;
pub mod handler;
pub mod index;
pub mod inject;
pub mod lineage;
pub mod registry;

#[cfg(test)]
mod tests;

pub use self::error::{DispatchError, HandlerFault, IndexError, TargetViewError};
pub use self::handler::{CatchAll, Handler};
pub use self::index::{IndexBuilder, MethodIndex};
pub use self::inject::Injector;
pub use self::lineage::{Lineage, Target, TypeKey};
pub use self::registry::{Registry, Resolution};
pub use injector_config::{DuplicatePolicy, IndexConfig};
