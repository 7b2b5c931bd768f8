//! Component registry and type-lineage dispatcher.
//!
//! A [`Registry`] owns one component together with its [`MethodIndex`]. Each
//! dispatch walks the target's lineage nearest-first, invokes the first
//! indexed handler it finds, and reports either an unresolved target type or
//! the handler's failure. Nothing is cached between calls beyond the index
//! and the per-type lineage.

use tracing::debug;

use crate::error::{DispatchError, HandlerFault, TargetViewError};
use crate::handler::CatchAll;
use crate::index::{MethodIndex, Resolved};
use crate::inject::Injector;
use crate::lineage::{Target, TypeKey};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Handler chosen for a target, without invoking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An indexed handler for a type in the target's lineage.
    Handler {
        /// Parameter type of the chosen handler.
        handled_as: TypeKey,
        /// Distance from the target's concrete type (0 is an exact match).
        depth: usize,
    },
    /// The catch-all handler, used after the lineage was exhausted.
    CatchAll,
}

impl Resolution {
    /// Parameter type of the chosen handler.
    #[must_use]
    pub fn handled_as(&self) -> TypeKey {
        match self {
            Self::Handler { handled_as, .. } => *handled_as,
            Self::CatchAll => CatchAll::<()>::parameter(),
        }
    }

    /// Returns `true` when the target's own type was handled directly.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Handler { depth: 0, .. })
    }
}

/// Dispatches targets to the most specific handler of an owned component.
///
/// # Example
///
/// ```
/// use injector::{MethodIndex, Registry, impl_target};
///
/// #[derive(Default)]
/// struct Screen {
///     injected: bool,
/// }
/// struct SettingsScreen {
///     base: Screen,
/// }
/// impl_target!(Screen);
/// impl_target!(SettingsScreen: Screen => base);
///
/// struct AppComponent;
/// impl AppComponent {
///     fn inject_screen(&self, screen: &mut Screen) {
///         screen.injected = true;
///     }
/// }
///
/// let mut builder = MethodIndex::builder();
/// builder
///     .register(AppComponent::inject_screen)
///     .expect("unique parameter type");
/// let registry = Registry::new(AppComponent, builder.build());
///
/// let mut settings = SettingsScreen { base: Screen::default() };
/// registry.dispatch(&mut settings).expect("ancestor handler resolves");
/// assert!(settings.base.injected);
/// ```
#[derive(Debug)]
pub struct Registry<C> {
    component: C,
    index: MethodIndex<C>,
}

impl<C: 'static> Registry<C> {
    /// Creates a registry that dispatches to `component` through `index`.
    ///
    /// Never fails: an empty index yields a registry whose dispatches are all
    /// unresolved.
    #[must_use]
    pub const fn new(component: C, index: MethodIndex<C>) -> Self {
        Self { component, index }
    }

    /// Creates a registry with no handlers.
    #[must_use]
    pub fn without_handlers(component: C) -> Self {
        Self::new(component, MethodIndex::empty())
    }

    /// Returns the component handlers are invoked against.
    #[must_use]
    pub const fn component(&self) -> &C {
        &self.component
    }

    /// Type of the owned component.
    #[must_use]
    pub const fn component_type(&self) -> TypeKey {
        self.index.component_type()
    }

    /// Returns the method index.
    #[must_use]
    pub const fn index(&self) -> &MethodIndex<C> {
        &self.index
    }

    /// Consumes the registry and returns its component.
    #[must_use]
    pub fn into_component(self) -> C {
        self.component
    }

    /// Determines which handler a dispatch of `target` would invoke.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnresolvedTargetType`] when no type in the
    /// target's lineage is indexed and there is no catch-all.
    pub fn resolve(&self, target: &dyn Target) -> Result<Resolution, DispatchError> {
        let lineage = target.lineage();
        match self.index.resolve(lineage) {
            Some(Resolved::Handler { depth, handler }) => Ok(Resolution::Handler {
                handled_as: handler.parameter(),
                depth,
            }),
            Some(Resolved::CatchAll(_)) => Ok(Resolution::CatchAll),
            None => Err(DispatchError::unresolved(
                lineage.concrete(),
                self.component_type(),
            )),
        }
    }

    /// Invokes the most specific handler for `target`.
    ///
    /// The lineage is walked nearest-first; the first indexed type wins and
    /// its handler runs exactly once. The catch-all, when registered, runs
    /// only after every type in the lineage missed.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnresolvedTargetType`] when nothing matches,
    /// or [`DispatchError::InvocationFailed`] when the target cannot be
    /// viewed as the handler's parameter type or the handler returns an
    /// error. No other handler is tried after a failure.
    ///
    /// # Panics
    ///
    /// Does not panic itself. A panic raised inside a handler is not turned
    /// into [`DispatchError::InvocationFailed`]; it unwinds through this call
    /// and leaves the registry usable for later dispatches.
    pub fn dispatch(&self, target: &mut dyn Target) -> Result<(), DispatchError> {
        let lineage = target.lineage();
        let concrete = lineage.concrete();
        let component = self.component_type();

        match self.index.resolve(lineage) {
            Some(Resolved::Handler { depth, handler }) => {
                let handled_as = handler.parameter();
                debug!(
                    target: DISPATCH_TARGET,
                    target_type = %concrete,
                    handled_as = %handled_as,
                    depth,
                    "dispatching to handler"
                );
                let outcome = target.view_mut(depth).map_or_else(
                    || Err(HandlerFault::from(TargetViewError::new(handled_as, depth))),
                    |view| handler.invoke(&self.component, view, depth),
                );
                outcome.map_err(|source| {
                    DispatchError::invocation_failed(concrete, handled_as, component, source)
                })
            }
            Some(Resolved::CatchAll(catch_all)) => {
                debug!(
                    target: DISPATCH_TARGET,
                    target_type = %concrete,
                    "dispatching to catch-all handler"
                );
                catch_all.invoke(&self.component, target).map_err(|source| {
                    DispatchError::invocation_failed(
                        concrete,
                        CatchAll::<C>::parameter(),
                        component,
                        source,
                    )
                })
            }
            None => {
                debug!(
                    target: DISPATCH_TARGET,
                    target_type = %concrete,
                    component = %component,
                    "no handler in lineage"
                );
                Err(DispatchError::unresolved(concrete, component))
            }
        }
    }
}

impl<C: 'static> Injector for Registry<C> {
    fn inject(&self, target: &mut dyn Target) -> Result<(), DispatchError> {
        self.dispatch(target)
    }
}
