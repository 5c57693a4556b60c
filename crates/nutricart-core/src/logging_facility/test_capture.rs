//! In-memory event capture for logging assertions
//!
//! Installs one process-wide layer that keeps every event. Tests then look
//! events up by `op` and check the boundary sequence an operation emitted,
//! e.g. that a rejected checkout closed with `end_error` and
//! `err_code = ERR_EMPTY_CART`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use nutricart_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_ERR_CODE, FIELD_EVENT, FIELD_OP,
};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event, every field rendered as text.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn component(&self) -> Option<&str> {
        self.field(FIELD_COMPONENT)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    /// `start`, `end` or `end_error` for boundary events.
    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl Visit for FieldVisitor {
    // Integers and bools arrive here too; their Debug form is the plain value.
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    log: EventLog,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        };
        if let Ok(mut log) = self.log.lock() {
            log.push(captured);
        }
    }
}

/// Shared handle onto the captured events.
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Events whose `op` equals `op`, in emission order.
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// The `event` values `op` emitted, in order, e.g. `["start", "end"]`.
    pub fn boundaries(&self, op: &str) -> Vec<String> {
        self.events_for_op(op)
            .iter()
            .filter_map(|e| e.event().map(str::to_string))
            .collect()
    }

    /// Closing `end_error` events for `op` carrying `code`.
    pub fn errors_with_code(&self, op: &str, code: &str) -> Vec<CapturedEvent> {
        self.events_for_op(op)
            .into_iter()
            .filter(|e| e.event() == Some(EVENT_END_ERROR) && e.field(FIELD_ERR_CODE) == Some(code))
            .collect()
    }

    /// # Panics
    ///
    /// Panics unless `op` emitted an event named `event`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let seen = self.boundaries(op);
        assert!(
            seen.iter().any(|e| e == event),
            "op={} never emitted event={}; saw {:?}",
            op,
            event,
            seen
        );
    }

    /// # Panics
    ///
    /// Panics unless every `start` for `op` is followed by one `end` or
    /// `end_error` before the next `start`. Only meaningful for op names no
    /// other concurrently running test uses.
    pub fn assert_bracketed(&self, op: &str) {
        let seen = self.boundaries(op);
        let mut open = false;
        for event in &seen {
            match event.as_str() {
                EVENT_START => {
                    assert!(!open, "op={} started twice without closing: {:?}", op, seen);
                    open = true;
                }
                EVENT_END | EVENT_END_ERROR => {
                    assert!(open, "op={} closed without a start: {:?}", op, seen);
                    open = false;
                }
                _ => {}
            }
        }
        assert!(!open, "op={} never closed: {:?}", op, seen);
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer on first call and return the shared handle.
///
/// All tests in a binary share one buffer, so assert on op names the test
/// owns.
///
/// ```
/// use nutricart_core::logging_facility::test_capture::init_test_capture;
/// use nutricart_core::{log_op_end, log_op_start};
///
/// let capture = init_test_capture();
/// log_op_start!("doc_seed_import");
/// log_op_end!("doc_seed_import", duration_ms = 1);
/// assert_eq!(capture.boundaries("doc_seed_import"), ["start", "end"]);
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let log = EventLog::default();
            // A subscriber installed elsewhere wins; events then go uncaptured.
            let _ = tracing_subscriber::registry()
                .with(CaptureLayer { log: log.clone() })
                .try_init();
            TestCapture { log }
        })
        .clone()
}
