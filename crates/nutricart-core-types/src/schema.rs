//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across the engine, the HTTP
//! layer and the test capture helpers.

// Fields on every boundary event
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Fields added to end_error events
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_OP: &str = "err_op";
pub const FIELD_ERR_ENTITY: &str = "err_entity";
pub const FIELD_ERR_MESSAGE: &str = "err_message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
