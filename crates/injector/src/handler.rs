//! Type-erased handler references.
//!
//! A [`Handler`] wraps a typed `Fn(&C, &mut X)` so handlers for different
//! parameter types can live in one index. The erased form receives the target
//! as `&mut dyn Any` and downcasts it back to `X` before calling the typed
//! function.

use std::any::Any;
use std::convert::Infallible;
use std::fmt;

use crate::error::{HandlerFault, TargetViewError};
use crate::lineage::{Target, TypeKey};

type ErasedHandler<C> =
    dyn Fn(&C, &mut dyn Any, usize) -> Result<(), HandlerFault> + Send + Sync + 'static;

type ErasedCatchAll<C> =
    dyn Fn(&C, &mut dyn Target) -> Result<(), HandlerFault> + Send + Sync + 'static;

/// An invocable bound to exactly one parameter type of component `C`.
pub struct Handler<C> {
    parameter: TypeKey,
    call: Box<ErasedHandler<C>>,
}

impl<C: 'static> Handler<C> {
    /// Wraps an infallible handler for parameter type `X`.
    #[must_use]
    pub fn new<X, F>(handler: F) -> Self
    where
        X: 'static,
        F: Fn(&C, &mut X) + Send + Sync + 'static,
    {
        Self::fallible(move |component: &C, target: &mut X| {
            handler(component, target);
            Ok::<(), Infallible>(())
        })
    }

    /// Wraps a fallible handler for parameter type `X`.
    ///
    /// Any error the handler returns is boxed into a [`HandlerFault`].
    #[must_use]
    pub fn fallible<X, E, F>(handler: F) -> Self
    where
        X: 'static,
        E: Into<HandlerFault>,
        F: Fn(&C, &mut X) -> Result<(), E> + Send + Sync + 'static,
    {
        let parameter = TypeKey::of::<X>();
        let call = move |component: &C, view: &mut dyn Any, depth: usize| -> Result<(), HandlerFault> {
            let target = view
                .downcast_mut::<X>()
                .ok_or_else(|| TargetViewError::new(parameter, depth))?;
            handler(component, target).map_err(Into::into)
        };
        Self {
            parameter,
            call: Box::new(call),
        }
    }

    /// Parameter type this handler accepts.
    #[must_use]
    pub const fn parameter(&self) -> TypeKey {
        self.parameter
    }

    /// Invokes the handler with a target viewed at the given lineage depth.
    pub(crate) fn invoke(
        &self,
        component: &C,
        view: &mut dyn Any,
        depth: usize,
    ) -> Result<(), HandlerFault> {
        (self.call)(component, view, depth)
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Handler")
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}

/// Handler consulted when no type in a target's lineage is indexed.
///
/// It plays the part of a handler for the universal root type and receives
/// the whole target.
pub struct CatchAll<C> {
    call: Box<ErasedCatchAll<C>>,
}

impl<C: 'static> CatchAll<C> {
    /// Wraps a fallible catch-all handler.
    #[must_use]
    pub fn new<E, F>(handler: F) -> Self
    where
        E: Into<HandlerFault>,
        F: Fn(&C, &mut dyn Target) -> Result<(), E> + Send + Sync + 'static,
    {
        let call = move |component: &C, target: &mut dyn Target| -> Result<(), HandlerFault> {
            handler(component, target).map_err(Into::into)
        };
        Self {
            call: Box::new(call),
        }
    }

    /// Key reported as the handled type for catch-all dispatches.
    #[must_use]
    pub fn parameter() -> TypeKey {
        TypeKey::of::<dyn Target>()
    }

    pub(crate) fn invoke(&self, component: &C, target: &mut dyn Target) -> Result<(), HandlerFault> {
        (self.call)(component, target)
    }
}

impl<C> fmt::Debug for CatchAll<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("CatchAll").finish_non_exhaustive()
    }
}
