//! Unit tests for dispatch and index error types.

use std::error::Error as _;

use rstest::rstest;

use super::*;
use crate::tests::{RecordingComponent, Screen, Unrelated};

fn unresolved() -> DispatchError {
    DispatchError::unresolved(
        TypeKey::of::<Unrelated>(),
        TypeKey::of::<RecordingComponent>(),
    )
}

fn invocation_failure() -> DispatchError {
    DispatchError::invocation_failed(
        TypeKey::of::<Screen>(),
        TypeKey::of::<Screen>(),
        TypeKey::of::<RecordingComponent>(),
        "database offline",
    )
}

#[test]
fn unresolved_message_names_target_and_component() {
    let message = unresolved().to_string();
    assert!(
        message.contains("Unrelated"),
        "expected target in message: {message}"
    );
    assert!(
        message.contains("RecordingComponent"),
        "expected component in message: {message}"
    );
}

#[test]
fn invocation_failure_chains_original_fault() {
    let error = invocation_failure();
    let source = error.source().expect("source should be chained");
    assert_eq!(source.to_string(), "database offline");
    assert!(
        error.to_string().contains("database offline"),
        "expected fault in message: {error}"
    );
}

#[rstest]
#[case::unresolved(unresolved(), true, false)]
#[case::invocation(invocation_failure(), false, true)]
fn kind_predicates(
    #[case] error: DispatchError,
    #[case] is_unresolved: bool,
    #[case] is_invocation_failure: bool,
) {
    assert_eq!(error.is_unresolved(), is_unresolved);
    assert_eq!(error.is_invocation_failure(), is_invocation_failure);
    assert_eq!(error.component(), TypeKey::of::<RecordingComponent>());
}

#[rstest]
#[case::unresolved(unresolved(), TypeKey::of::<Unrelated>())]
#[case::invocation(invocation_failure(), TypeKey::of::<Screen>())]
fn target_accessor_reports_concrete_type(#[case] error: DispatchError, #[case] expected: TypeKey) {
    assert_eq!(error.target(), expected);
}

#[test]
fn errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DispatchError>();
    assert_send_sync::<IndexError>();
    assert_send_sync::<TargetViewError>();
}

#[test]
fn target_view_error_includes_depth() {
    let error = TargetViewError::new(TypeKey::of::<Screen>(), 2);
    let message = error.to_string();
    assert!(message.contains("Screen"), "expected type in message: {message}");
    assert!(message.contains('2'), "expected depth in message: {message}");
}

#[test]
fn duplicate_handler_message_names_parameter() {
    let error = IndexError::duplicate_handler(
        TypeKey::of::<Screen>(),
        TypeKey::of::<RecordingComponent>(),
    );
    let message = error.to_string();
    assert!(
        message.contains("Screen") && message.contains("already has a handler"),
        "unexpected message: {message}"
    );
}

#[test]
fn duplicate_catch_all_message_names_component() {
    let error = IndexError::duplicate_catch_all(TypeKey::of::<RecordingComponent>());
    assert!(error.to_string().contains("catch-all"));
}
