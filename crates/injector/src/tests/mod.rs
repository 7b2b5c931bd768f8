//! Crate-level fixtures, end-to-end tests and behaviour scenarios.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::index::MethodIndex;
use crate::registry::Registry;
use crate::{DispatchError, impl_target};


// ---------------------------------------------------------------------------
// Shared target hierarchy: Screen <- Settings <- Advanced, plus Unrelated.
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub(crate) struct Screen {
    pub(crate) handled_by: Vec<&'static str>,
}

#[derive(Debug, Default)]
pub(crate) struct Settings {
    pub(crate) base: Screen,
}

#[derive(Debug, Default)]
pub(crate) struct Advanced {
    pub(crate) base: Settings,
}

#[derive(Debug, Default)]
pub(crate) struct Unrelated;

impl_target!(Screen);
impl_target!(Settings: Screen => base);
impl_target!(Advanced: Settings => base);
impl_target!(Unrelated);

impl Advanced {
    pub(crate) fn handled_by(&self) -> &[&'static str] {
        &self.base.base.handled_by
    }
}

/// Component that records which handler ran.
#[derive(Debug, Default)]
pub(crate) struct RecordingComponent {
    pub(crate) calls: Mutex<Vec<&'static str>>,
    pub(crate) invocations: AtomicUsize,
}

impl RecordingComponent {
    fn record(&self, name: &'static str) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().expect("calls mutex poisoned").push(name);
    }

    pub(crate) fn inject_screen(&self, screen: &mut Screen) {
        self.record("inject_screen");
        screen.handled_by.push("inject_screen");
    }

    pub(crate) fn inject_settings(&self, settings: &mut Settings) {
        self.record("inject_settings");
        settings.base.handled_by.push("inject_settings");
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(crate) fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

/// Registry with a handler for `Screen` only.
pub(crate) fn screen_registry() -> Registry<RecordingComponent> {
    let mut builder = MethodIndex::builder();
    builder
        .register(RecordingComponent::inject_screen)
        .expect("register screen handler");
    Registry::new(RecordingComponent::default(), builder.build())
}

/// Registry with handlers for `Screen` and `Settings`.
pub(crate) fn layered_registry() -> Registry<RecordingComponent> {
    let mut builder = MethodIndex::builder();
    builder
        .register(RecordingComponent::inject_screen)
        .expect("register screen handler")
        .register(RecordingComponent::inject_settings)
        .expect("register settings handler");
    Registry::new(RecordingComponent::default(), builder.build())
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_exact_ancestor_and_unrelated() {
    let registry = screen_registry();

    let mut screen = Screen::default();
    registry.dispatch(&mut screen).expect("exact dispatch");
    assert_eq!(screen.handled_by, vec!["inject_screen"]);

    let mut settings = Settings::default();
    registry.dispatch(&mut settings).expect("ancestor dispatch");
    assert_eq!(settings.base.handled_by, vec!["inject_screen"]);

    let err = registry
        .dispatch(&mut Unrelated)
        .expect_err("unrelated target should fail");
    assert!(matches!(err, DispatchError::UnresolvedTargetType { .. }));

    assert_eq!(registry.component().invocation_count(), 2);
}

#[test]
fn registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry<RecordingComponent>>();

    let registry = layered_registry();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut advanced = Advanced::default();
                registry.dispatch(&mut advanced).expect("dispatch");
                assert_eq!(advanced.handled_by(), ["inject_settings"]);
            });
        }
    });
    assert_eq!(registry.component().invocation_count(), 4);
}
