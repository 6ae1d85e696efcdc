#![allow(clippy::unwrap_used, clippy::expect_used)]

use flowdump_core::descriptor::SessionDescriptor;
use flowdump_core::errors::FlowDumpError;
use flowdump_core::logging_facility::test_capture::init_test_capture;
use flowdump_core::trigger::{CommandOutcome, CommandRunner, SessionTrigger};
use flowdump_core::{log_op_end, log_op_error, log_op_start};
use flowdump_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use tempfile::TempDir;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = FlowDumpError::Config {
        message: "bad".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event captured");

    assert_eq!(
        error_event.fields.get("err.code"),
        Some(&"ERR_CONFIG".to_string())
    );
}

struct Failing;

impl CommandRunner for Failing {
    fn run(&self, _program: &str, _args: &[String]) -> std::io::Result<CommandOutcome> {
        Ok(CommandOutcome {
            success: false,
            status: "exit status: 2".to_string(),
            stderr: "table not found".to_string(),
        })
    }
}

#[test]
fn test_trigger_logs_start_and_error_for_its_session() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let trigger = SessionTrigger::new(
        dir.path().join("request.json"),
        "REQ",
        vec!["swssconfig".to_string()],
        Failing,
    );
    let desc = SessionDescriptor::new(true, 5, 5).unwrap();

    assert!(trigger.trigger(&desc).is_err());

    let for_session = |event: &str| {
        capture.count_events(|e| {
            e.op.as_deref() == Some("trigger_session")
                && e.event.as_deref() == Some(event)
                && e.session.as_deref() == Some(desc.session.as_str())
        })
    };
    assert_eq!(for_session(EVENT_START), 1);
    assert_eq!(for_session(EVENT_END_ERROR), 1);
    assert_eq!(for_session(EVENT_END), 0);
}
