//! Errors raised while building a method index or dispatching a target.
//!
//! All errors use `thiserror`-derived enums with structured context so callers
//! can inspect the failure programmatically. Handler faults are boxed trait
//! objects so any `Send + Sync` error type can travel through the dispatcher
//! and remain reachable via [`std::error::Error::source`].

use thiserror::Error;

use crate::lineage::TypeKey;

/// Fault raised by a handler, or by the dispatcher while preparing its
/// argument.
pub type HandlerFault = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`Registry::dispatch`](crate::Registry::dispatch).
///
/// Both kinds are fatal to the dispatch call that produced them. Whether an
/// unresolved target type is a programming error or an expected condition is
/// the caller's decision.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Neither the target's type nor any of its ancestors has a handler.
    #[error("no handler for target type `{target}` in component `{component}`")]
    UnresolvedTargetType {
        /// Concrete runtime type of the target.
        target: TypeKey,
        /// Type of the component that was searched.
        component: TypeKey,
    },

    /// A handler was resolved but invoking it failed.
    #[error(
        "handler for `{handled_as}` in component `{component}` failed on target `{target}`: {source}"
    )]
    InvocationFailed {
        /// Concrete runtime type of the target.
        target: TypeKey,
        /// Parameter type of the handler that was invoked.
        handled_as: TypeKey,
        /// Type of the component owning the handler.
        component: TypeKey,
        /// Original fault.
        #[source]
        source: HandlerFault,
    },
}

impl DispatchError {
    /// Creates a new `UnresolvedTargetType` error.
    #[must_use]
    pub const fn unresolved(target: TypeKey, component: TypeKey) -> Self {
        Self::UnresolvedTargetType { target, component }
    }

    /// Creates a new `InvocationFailed` error.
    #[must_use]
    pub fn invocation_failed(
        target: TypeKey,
        handled_as: TypeKey,
        component: TypeKey,
        source: impl Into<HandlerFault>,
    ) -> Self {
        Self::InvocationFailed {
            target,
            handled_as,
            component,
            source: source.into(),
        }
    }

    /// Returns `true` for [`DispatchError::UnresolvedTargetType`].
    #[must_use]
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::UnresolvedTargetType { .. })
    }

    /// Returns `true` for [`DispatchError::InvocationFailed`].
    #[must_use]
    pub const fn is_invocation_failure(&self) -> bool {
        matches!(self, Self::InvocationFailed { .. })
    }

    /// Concrete runtime type of the target that failed to dispatch.
    #[must_use]
    pub const fn target(&self) -> TypeKey {
        match self {
            Self::UnresolvedTargetType { target, .. } | Self::InvocationFailed { target, .. } => {
                *target
            }
        }
    }

    /// Type of the component involved in the failed dispatch.
    #[must_use]
    pub const fn component(&self) -> TypeKey {
        match self {
            Self::UnresolvedTargetType { component, .. }
            | Self::InvocationFailed { component, .. } => *component,
        }
    }
}

/// Access fault: the target could not be viewed as the handler's parameter
/// type.
///
/// Raised when a [`Target`](crate::Target) implementation returns no view at
/// the resolved depth, or a view of a different type than its lineage
/// promised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("target has no `{expected}` view at lineage depth {depth}")]
pub struct TargetViewError {
    /// Type the handler expected to receive.
    pub expected: TypeKey,
    /// Lineage depth at which the view was requested.
    pub depth: usize,
}

impl TargetViewError {
    /// Creates a new view error.
    #[must_use]
    pub const fn new(expected: TypeKey, depth: usize) -> Self {
        Self { expected, depth }
    }
}

/// Errors raised while building a method index.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    /// A handler is already registered for this parameter type and the
    /// configured policy rejects duplicates.
    #[error("component `{component}` already has a handler for `{parameter}`")]
    DuplicateHandler {
        /// Parameter type registered twice.
        parameter: TypeKey,
        /// Component type being indexed.
        component: TypeKey,
    },

    /// A catch-all handler is already registered and the configured policy
    /// rejects duplicates.
    #[error("component `{component}` already has a catch-all handler")]
    DuplicateCatchAll {
        /// Component type being indexed.
        component: TypeKey,
    },
}

impl IndexError {
    /// Creates a new `DuplicateHandler` error.
    #[must_use]
    pub const fn duplicate_handler(parameter: TypeKey, component: TypeKey) -> Self {
        Self::DuplicateHandler {
            parameter,
            component,
        }
    }

    /// Creates a new `DuplicateCatchAll` error.
    #[must_use]
    pub const fn duplicate_catch_all(component: TypeKey) -> Self {
        Self::DuplicateCatchAll { component }
    }
}

#[cfg(test)]
mod tests;
