#![allow(clippy::unwrap_used, clippy::expect_used)]

use nutricart_core::errors::{ExError, ExErrorKind, NutriCartError};
use nutricart_core::logging_facility::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use nutricart_core::logging_facility::test_capture::init_test_capture;
use nutricart_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, user_id = 7);

    capture.assert_event_exists(op_name, EVENT_START);
    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].fields.get("user_id"), Some(&"7".to_string()));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1);
    assert_eq!(
        end_events[0].fields.get("duration_ms"),
        Some(&"42".to_string())
    );
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    log_op_error!(op_name, NutriCartError::EmptyCart, duration_ms = 1);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(error_events.len(), 1);
    assert_eq!(
        error_events[0].fields.get("err_code"),
        Some(&"ERR_EMPTY_CART".to_string())
    );
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_4";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].component(), Some("logging_facility_tests"));
}

#[test]
fn test_error_event_names_failed_step_and_entity() {
    let capture = init_test_capture();
    let op_name = "test_error_context_unique_5";

    let err = ExError::new(ExErrorKind::Concurrency)
        .with_op("insert_order")
        .with_entity_id("1004")
        .with_message("order id already taken");
    log_op_error!(op_name, err, duration_ms = 2, user_id = 1);

    let errors = capture.errors_with_code(op_name, "ERR_CONCURRENCY");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err_op"), Some("insert_order"));
    assert_eq!(errors[0].field("err_entity"), Some("1004"));
    assert_eq!(errors[0].field("err_message"), Some("order id already taken"));
    assert_eq!(errors[0].field("user_id"), Some("1"));
}

#[test]
fn test_bracketed_operation_passes() {
    let capture = init_test_capture();
    let op_name = "test_bracketed_unique_6";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 0);
    log_op_start!(op_name);
    log_op_error!(op_name, NutriCartError::EmptyCart, duration_ms = 0);

    assert_eq!(capture.boundaries(op_name), ["start", "end", "start", "end_error"]);
    capture.assert_bracketed(op_name);
}

#[test]
#[should_panic(expected = "never closed")]
fn test_unclosed_operation_is_reported() {
    let capture = init_test_capture();
    let op_name = "test_unclosed_unique_7";

    log_op_start!(op_name);
    capture.assert_bracketed(op_name);
}
