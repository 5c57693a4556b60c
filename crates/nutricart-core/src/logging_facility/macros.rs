//! Operation boundary macros
//!
//! Checkout, catalog reads, identity calls and seed imports each emit one
//! `start` event and then exactly one `end` or `end_error` event. All three
//! carry `component` (the calling module) and `op`; extra `key = value`
//! fields pass straight through to `tracing`.

/// Opening boundary of an operation.
///
/// ```
/// # use nutricart_core::log_op_start;
/// log_op_start!("item_search");
/// log_op_start!("commit_order", user_id = 7, cart_len = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Successful close, always with the elapsed milliseconds.
///
/// ```
/// # use nutricart_core::log_op_end;
/// log_op_end!("orders_for_user", duration_ms = 3, row_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Failed close. `$err` is anything convertible into `ExError`.
///
/// Besides the stable code, the event records the inner step that failed
/// (`err_op`, e.g. `insert_order`) and the order id, user id or item name
/// it concerned (`err_entity`), empty when unknown.
///
/// ```
/// # use nutricart_core::{log_op_error, errors::NutriCartError};
/// log_op_error!("commit_order", NutriCartError::EmptyCart, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_code = ex_err.code(),
            err_op = ex_err.op().unwrap_or(""),
            err_entity = ex_err.entity_id().unwrap_or(""),
            err_message = ex_err.message(),
            $($($field)*)?
        );
    }};
}
