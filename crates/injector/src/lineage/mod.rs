//! Runtime type identity and ancestor chains for dispatch targets.
//!
//! Rust has no class inheritance, so a "subtype" is modelled by composition:
//! a derived type embeds its parent in a field and exposes it through
//! [`Target::view_mut`]. Each concrete type publishes its [`Lineage`], an
//! ordered list of type keys starting with itself and followed by each
//! ancestor, nearest first. The lineage is computed once per type and cached
//! for the lifetime of the process.
//!
//! Implement [`Target`] with the [`impl_target!`](crate::impl_target) macro:
//!
//! ```
//! use injector::{TypeKey, impl_target, Target};
//!
//! struct Screen;
//! struct Settings {
//!     base: Screen,
//! }
//!
//! impl_target!(Screen);
//! impl_target!(Settings: Screen => base);
//!
//! let settings = Settings { base: Screen };
//! let keys: Vec<TypeKey> = settings.lineage().iter().collect();
//! assert_eq!(keys, vec![TypeKey::of::<Settings>(), TypeKey::of::<Screen>()]);
//! ```

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a `'static` type with a printable name for diagnostics.
///
/// Equality and hashing consider only the [`TypeId`]; the
/// name is carried so errors can say which type was involved.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Underlying type identifier.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name as reported by [`std::any::type_name`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

/// Ordered chain of type keys: the type itself, then each ancestor.
///
/// A lineage is never empty: it always contains the concrete type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    concrete: TypeKey,
    ancestors: Vec<TypeKey>,
}

impl Lineage {
    /// Lineage of a root type with no ancestors.
    #[must_use]
    pub fn root<T: 'static>() -> Self {
        Self {
            concrete: TypeKey::of::<T>(),
            ancestors: Vec::new(),
        }
    }

    /// Lineage of `T`, whose immediate parent has the given lineage.
    #[must_use]
    pub fn derived<T: 'static>(parent: &Self) -> Self {
        Self {
            concrete: TypeKey::of::<T>(),
            ancestors: parent.iter().collect(),
        }
    }

    /// Key of the concrete type this lineage describes.
    #[must_use]
    pub const fn concrete(&self) -> TypeKey {
        self.concrete
    }

    /// Immediate ancestor of the concrete type, if any.
    #[must_use]
    pub fn parent(&self) -> Option<TypeKey> {
        self.ancestors.first().copied()
    }

    /// Number of types in the chain, including the concrete type.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.ancestors.len() + 1
    }

    /// Iterates over the chain, nearest type first.
    pub fn iter(&self) -> impl Iterator<Item = TypeKey> + '_ {
        std::iter::once(self.concrete).chain(self.ancestors.iter().copied())
    }

    /// Returns the key at `depth` (0 is the concrete type).
    #[must_use]
    pub fn get(&self, depth: usize) -> Option<TypeKey> {
        depth
            .checked_sub(1)
            .map_or(Some(self.concrete), |index| self.ancestors.get(index).copied())
    }

    /// Returns `true` when `key` appears anywhere in the chain.
    #[must_use]
    pub fn contains(&self, key: TypeKey) -> bool {
        self.iter().any(|candidate| candidate == key)
    }
}

/// A value that can be dispatched by its runtime type.
///
/// Implementors are usually generated by [`impl_target!`](crate::impl_target).
/// Hand-written implementations must keep [`Target::lineage`] and
/// [`Target::view_mut`] consistent: for every `depth` below the lineage
/// depth, `view_mut(depth)` returns the value viewed as the type at
/// `lineage().get(depth)`.
pub trait Target: Any {
    /// Cached lineage of the concrete type.
    fn lineage(&self) -> &'static Lineage;

    /// Returns this value viewed as its ancestor at `depth`.
    ///
    /// Depth 0 is the value itself. Returns `None` past the root.
    fn view_mut(&mut self, depth: usize) -> Option<&mut dyn Any>;
}

/// Implements [`Target`] for a concrete type.
///
/// `impl_target!(Root)` declares a type with no ancestors.
/// `impl_target!(Child: Parent => field)` declares `Child` as a subtype of
/// `Parent`, where `field` is the `Child` field holding its `Parent` part.
///
/// The generated code caches the lineage in a `static`, so the macro must be
/// used with concrete types only, never inside a generic `impl`.
#[macro_export]
macro_rules! impl_target {
    ($ty:ty) => {
        impl $crate::Target for $ty {
            fn lineage(&self) -> &'static $crate::Lineage {
                static LINEAGE: ::std::sync::OnceLock<$crate::Lineage> =
                    ::std::sync::OnceLock::new();
                LINEAGE.get_or_init($crate::Lineage::root::<$ty>)
            }

            fn view_mut(&mut self, depth: usize) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                if depth == 0 {
                    ::std::option::Option::Some(self)
                } else {
                    ::std::option::Option::None
                }
            }
        }
    };
    ($ty:ty : $parent:ty => $field:ident) => {
        impl $crate::Target for $ty {
            fn lineage(&self) -> &'static $crate::Lineage {
                static LINEAGE: ::std::sync::OnceLock<$crate::Lineage> =
                    ::std::sync::OnceLock::new();
                LINEAGE.get_or_init(|| {
                    $crate::Lineage::derived::<$ty>(<$parent as $crate::Target>::lineage(
                        &self.$field,
                    ))
                })
            }

            fn view_mut(&mut self, depth: usize) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                if depth == 0 {
                    ::std::option::Option::Some(self)
                } else {
                    <$parent as $crate::Target>::view_mut(&mut self.$field, depth - 1)
                }
            }
        }
    };
}
