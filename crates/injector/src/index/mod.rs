//! Construction-time index of a component's handlers.
//!
//! The [`MethodIndex`] maps each accepted parameter type to exactly one
//! [`Handler`]. It is assembled through an [`IndexBuilder`], which enforces the
//! configured [`DuplicatePolicy`], and is immutable once built. Only
//! single-argument handlers can be expressed, so no filtering by arity is
//! needed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use injector_config::{DuplicatePolicy, IndexConfig};
use tracing::{debug, warn};

use crate::error::{HandlerFault, IndexError};
use crate::handler::{CatchAll, Handler};
use crate::lineage::{Lineage, Target, TypeKey};

/// Tracing target for index construction.
pub(crate) const INDEX_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::index");

/// Immutable mapping from parameter type to handler for component `C`.
///
/// # Example
///
/// ```
/// use injector::{MethodIndex, TypeKey};
///
/// struct Component;
/// struct Screen {
///     title: String,
/// }
///
/// let mut builder = MethodIndex::<Component>::builder();
/// builder
///     .register(|_: &Component, screen: &mut Screen| screen.title.push('!'))
///     .expect("first registration succeeds");
/// let index = builder.build();
/// assert!(index.handles(TypeKey::of::<Screen>()));
/// assert_eq!(index.len(), 1);
/// ```
pub struct MethodIndex<C> {
    component: TypeKey,
    handlers: HashMap<TypeKey, Handler<C>>,
    catch_all: Option<CatchAll<C>>,
}

/// Outcome of looking a lineage up in the index.
pub(crate) enum Resolved<'a, C> {
    /// An indexed handler matched the type at `depth`.
    Handler { depth: usize, handler: &'a Handler<C> },
    /// No type matched; the catch-all applies.
    CatchAll(&'a CatchAll<C>),
}

impl<C: 'static> MethodIndex<C> {
    /// Starts a builder using the default [`IndexConfig`].
    #[must_use]
    pub fn builder() -> IndexBuilder<C> {
        IndexBuilder::new(IndexConfig::default())
    }

    /// Starts a builder using the given configuration.
    #[must_use]
    pub fn builder_with(config: IndexConfig) -> IndexBuilder<C> {
        IndexBuilder::new(config)
    }

    /// Index with no handlers. Every dispatch against it is unresolved.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            component: TypeKey::of::<C>(),
            handlers: HashMap::new(),
            catch_all: None,
        }
    }

    /// Component type this index was built for.
    #[must_use]
    pub const fn component_type(&self) -> TypeKey {
        self.component
    }

    /// Returns the handler registered for exactly `parameter`.
    #[must_use]
    pub fn get(&self, parameter: TypeKey) -> Option<&Handler<C>> {
        self.handlers.get(&parameter)
    }

    /// Returns `true` when a handler accepts exactly `parameter`.
    #[must_use]
    pub fn handles(&self, parameter: TypeKey) -> bool {
        self.handlers.contains_key(&parameter)
    }

    /// Iterates over indexed parameter types in no particular order.
    pub fn parameter_types(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.handlers.keys().copied()
    }

    /// Returns `true` when a catch-all handler is registered.
    #[must_use]
    pub const fn has_catch_all(&self) -> bool {
        self.catch_all.is_some()
    }

    /// Number of indexed parameter types, excluding the catch-all.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no parameter type is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Finds the nearest handled type in `lineage`, falling back to the
    /// catch-all.
    pub(crate) fn resolve(&self, lineage: &Lineage) -> Option<Resolved<'_, C>> {
        lineage
            .iter()
            .enumerate()
            .find_map(|(depth, key)| {
                self.handlers
                    .get(&key)
                    .map(|handler| Resolved::Handler { depth, handler })
            })
            .or_else(|| self.catch_all.as_ref().map(Resolved::CatchAll))
    }
}

impl<C> fmt::Debug for MethodIndex<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MethodIndex")
            .field("component", &self.component)
            .field("parameters", &self.handlers.keys().collect::<Vec<_>>())
            .field("catch_all", &self.catch_all.is_some())
            .finish()
    }
}

/// Incrementally assembles a [`MethodIndex`].
///
/// Registration methods return `&mut Self` so several handlers can be chained
/// with `?`.
pub struct IndexBuilder<C> {
    policy: DuplicatePolicy,
    index: MethodIndex<C>,
}

impl<C: 'static> IndexBuilder<C> {
    /// Creates a builder applying `config`.
    #[must_use]
    pub fn new(config: IndexConfig) -> Self {
        Self {
            policy: config.duplicate_policy(),
            index: MethodIndex::empty(),
        }
    }

    /// Registers an infallible handler for parameter type `X`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DuplicateHandler`] when `X` already has a handler
    /// and the policy is [`DuplicatePolicy::Reject`].
    pub fn register<X, F>(&mut self, handler: F) -> Result<&mut Self, IndexError>
    where
        X: 'static,
        F: Fn(&C, &mut X) + Send + Sync + 'static,
    {
        self.register_handler(Handler::new(handler))
    }

    /// Registers a fallible handler for parameter type `X`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DuplicateHandler`] when `X` already has a handler
    /// and the policy is [`DuplicatePolicy::Reject`].
    pub fn register_fallible<X, E, F>(&mut self, handler: F) -> Result<&mut Self, IndexError>
    where
        X: 'static,
        E: Into<HandlerFault>,
        F: Fn(&C, &mut X) -> Result<(), E> + Send + Sync + 'static,
    {
        self.register_handler(Handler::fallible(handler))
    }

    /// Registers a prebuilt handler.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DuplicateHandler`] when the handler's parameter
    /// type is already indexed and the policy is [`DuplicatePolicy::Reject`].
    pub fn register_handler(&mut self, handler: Handler<C>) -> Result<&mut Self, IndexError> {
        let parameter = handler.parameter();
        let component = self.index.component;
        match self.index.handlers.entry(parameter) {
            Entry::Vacant(slot) => {
                slot.insert(handler);
            }
            Entry::Occupied(mut slot) => match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(IndexError::duplicate_handler(parameter, component));
                }
                DuplicatePolicy::Overwrite => {
                    warn!(
                        target: INDEX_TARGET,
                        component = %component,
                        parameter = %parameter,
                        "replacing existing handler"
                    );
                    slot.insert(handler);
                }
            },
        }
        debug!(
            target: INDEX_TARGET,
            component = %component,
            parameter = %parameter,
            "registered handler"
        );
        Ok(self)
    }

    /// Registers the handler used when no type in a target's lineage is
    /// indexed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DuplicateCatchAll`] when a catch-all is already
    /// registered and the policy is [`DuplicatePolicy::Reject`].
    pub fn register_catch_all<E, F>(&mut self, handler: F) -> Result<&mut Self, IndexError>
    where
        E: Into<HandlerFault>,
        F: Fn(&C, &mut dyn Target) -> Result<(), E> + Send + Sync + 'static,
    {
        let component = self.index.component;
        if self.index.catch_all.is_some() {
            if self.policy == DuplicatePolicy::Reject {
                return Err(IndexError::duplicate_catch_all(component));
            }
            warn!(
                target: INDEX_TARGET,
                component = %component,
                "replacing existing catch-all handler"
            );
        }
        self.index.catch_all = Some(CatchAll::new(handler));
        debug!(target: INDEX_TARGET, component = %component, "registered catch-all handler");
        Ok(self)
    }

    /// Duplicate policy in force for this builder.
    #[must_use]
    pub const fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Finalizes the index.
    #[must_use]
    pub fn build(self) -> MethodIndex<C> {
        debug!(
            target: INDEX_TARGET,
            component = %self.index.component,
            handlers = self.index.len(),
            catch_all = self.index.has_catch_all(),
            "built method index"
        );
        self.index
    }
}

impl<C: 'static> Default for IndexBuilder<C> {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl<C> fmt::Debug for IndexBuilder<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("IndexBuilder")
            .field("policy", &self.policy)
            .field("index", &self.index)
            .finish()
    }
}
