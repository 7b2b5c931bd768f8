//! Object-safe entry point for dispatching without naming the component.

use crate::error::DispatchError;
use crate::lineage::Target;

/// Something that can inject into a target chosen by its runtime type.
///
/// Base types hold a `&dyn Injector` and call [`Injector::inject`] on
/// themselves, leaving the choice of handler to the most specific type in
/// their lineage.
///
/// # Example
///
/// ```
/// use injector::{DispatchError, Injector, MethodIndex, Registry, impl_target};
///
/// #[derive(Default)]
/// struct Activity {
///     ready: bool,
/// }
/// impl_target!(Activity);
///
/// impl Activity {
///     fn on_create(&mut self, injector: &dyn Injector) -> Result<(), DispatchError> {
///         injector.inject(self)
///     }
/// }
///
/// struct Component;
/// let mut builder = MethodIndex::builder();
/// builder
///     .register(|_: &Component, activity: &mut Activity| activity.ready = true)
///     .expect("unique parameter type");
/// let registry = Registry::new(Component, builder.build());
///
/// let mut activity = Activity::default();
/// activity.on_create(&registry).expect("handler resolves");
/// assert!(activity.ready);
/// ```
pub trait Injector {
    /// Dispatches `target` to the most specific applicable handler.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when no handler applies or the handler
    /// fails.
    fn inject(&self, target: &mut dyn Target) -> Result<(), DispatchError>;
}

impl<I: Injector + ?Sized> Injector for &I {
    fn inject(&self, target: &mut dyn Target) -> Result<(), DispatchError> {
        (**self).inject(target)
    }
}

impl<I: Injector + ?Sized> Injector for std::sync::Arc<I> {
    fn inject(&self, target: &mut dyn Target) -> Result<(), DispatchError> {
        (**self).inject(target)
    }
}
