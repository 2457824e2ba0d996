use std::sync::Arc;

use cef_audit::{
    CefConfig, EmitError, EmitErrorKind, Emitter, EmitterRegistry, EventDescriptor,
    EventDispatcher, EventRecord, FieldSchema, FieldValue, MemoryEmitter, Outcome, RequestContext,
    Severity, UserRef,
};

fn default_dispatcher(emitters: Vec<Box<dyn Emitter>>) -> EventDispatcher {
    EventDispatcher::new(
        Arc::new(CefConfig::default()),
        EventDescriptor::new("login_failed", "auth.login.failed", Severity::new(6))
            .with_outcome(Outcome::Failure),
        FieldSchema::cef_extensions(),
        emitters,
    )
}

#[test]
fn end_to_end_emit_with_no_context() {
    // A bare event: msg plus a path-qualified fname, no user, no request.
    let sink = Arc::new(MemoryEmitter::new());
    let dispatcher = default_dispatcher(vec![Box::new(Arc::clone(&sink))]);

    let before = chrono::Utc::now().timestamp();
    let fields = EventRecord::new()
        .with("msg", "login failed")
        .with("fname", "/var/log/app/auth.py");
    dispatcher.emit(fields, None, None).unwrap();
    let after = chrono::Utc::now().timestamp();

    let message = &sink.messages()[0];

    assert!(message.starts_with(
        "CEF:0|Garpix|Django Application|1.0.0|auth.login.failed|login_failed|6|"
    ));
    assert!(message.contains("msg=login failed"));
    assert!(message.contains("fname=auth.py"));
    assert!(message.contains("outcome=failure"));

    // Identity fields are explicit nulls without a user; suser sorts last,
    // so its empty value closes the message.
    assert!(message.ends_with("suser="));
    assert!(message.contains("suid= "));
    assert!(message.contains("src= "));

    // Host fields are derived from system introspection.
    if let Some(hostname) = cef_audit::local_hostname() {
        assert!(message.contains(&format!("dhost={}", hostname)));
    }
    if let Some(ip) = cef_audit::outbound_ip() {
        assert!(message.contains(&format!("dst={}", ip)));
    }

    // end is within the call window.
    let end_field = message
        .split_whitespace()
        .find_map(|pair| pair.strip_prefix("end="))
        .expect("end field present");
    let end: i64 = end_field.parse().expect("end is an integer timestamp");
    assert!((before..=after).contains(&end));
}

#[test]
fn request_and_user_context_drive_the_record() {
    let sink = Arc::new(MemoryEmitter::new());
    let dispatcher = default_dispatcher(vec![Box::new(Arc::clone(&sink))]);

    let request = RequestContext::new()
        .with_absolute_uri("https://app.example.com/accounts/login/")
        .with_method("POST")
        .with_scheme("https")
        .with_host("app.example.com:443")
        .with_server_meta("SERVER_PORT", "443")
        .with_server_meta("SERVER_ADDR", "10.20.0.4")
        .with_server_meta("HTTP_X_FORWARDED_FOR", "203.0.113.9, 10.20.0.1");

    let fields = EventRecord::new()
        .with("msg", "bad password")
        .with("suser", "should-be-replaced");
    dispatcher
        .emit(fields, Some(&UserRef::new("alice", 7)), Some(&request))
        .unwrap();

    let message = &sink.messages()[0];

    assert!(message.contains("request=https://app.example.com/accounts/login/"));
    assert!(message.contains("requestMethod=POST"));
    assert!(message.contains("app=https"));
    assert!(message.contains("dhost=app.example.com"));
    assert!(message.contains("dpt=443"));
    assert!(message.contains("dst=10.20.0.4"));
    assert!(message.contains("src=203.0.113.9"));
    assert!(message.contains("suser=alice"));
    assert!(message.contains("suid=7"));
    assert!(!message.contains("should-be-replaced"));
}

#[test]
fn every_configured_emitter_receives_the_same_message() {
    let first = Arc::new(MemoryEmitter::new());
    let second = Arc::new(MemoryEmitter::new());
    let dispatcher = default_dispatcher(vec![
        Box::new(Arc::clone(&first)),
        Box::new(Arc::clone(&second)),
    ]);

    dispatcher
        .emit(EventRecord::new().with("msg", "one"), None, None)
        .unwrap();
    dispatcher
        .emit(EventRecord::new().with("msg", "two"), None, None)
        .unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first.messages(), second.messages());
}

struct FailingEmitter;

impl Emitter for FailingEmitter {
    fn emit(&self, _message: &str) -> Result<(), EmitError> {
        Err(EmitError::with_message(
            EmitErrorKind::Io,
            "collector unreachable",
        ))
    }
}

#[test]
fn emitter_failure_reaches_the_caller_and_stops_later_sinks() {
    let tail = Arc::new(MemoryEmitter::new());
    let dispatcher =
        default_dispatcher(vec![Box::new(FailingEmitter), Box::new(Arc::clone(&tail))]);

    let err = dispatcher
        .emit(EventRecord::new(), None, None)
        .unwrap_err();

    assert_eq!(err.kind(), EmitErrorKind::Io);
    assert_eq!(err.message(), Some("collector unreachable"));
    assert!(tail.is_empty());
}

#[test]
fn startup_flow_resolves_emitters_through_the_registry() {
    let mut registry = EmitterRegistry::default();
    let observed = Arc::new(MemoryEmitter::new());
    let handle = Arc::clone(&observed);
    registry.register("memory", move || Box::new(Arc::clone(&handle)));

    let dispatcher = default_dispatcher(registry.build_all(&["memory"]).unwrap());
    dispatcher
        .emit(EventRecord::new().with("msg", "configured"), None, None)
        .unwrap();

    assert_eq!(observed.len(), 1);

    // A misspelled key fails at startup, before any event is emitted.
    assert!(registry.build_all(&["memry"]).is_err());
}

#[test]
fn emit_under_an_installed_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let sink = Arc::new(MemoryEmitter::new());
    let dispatcher = default_dispatcher(vec![Box::new(Arc::clone(&sink))]);

    dispatcher
        .emit(EventRecord::new().with("msg", "traced"), None, None)
        .unwrap();

    assert_eq!(sink.len(), 1);
}

#[test]
fn caller_supplied_extension_fields_pass_through() {
    let sink = Arc::new(MemoryEmitter::new());
    let dispatcher = default_dispatcher(vec![Box::new(Arc::clone(&sink))]);

    let fields = EventRecord::new()
        .with("cs1", "tenant-42")
        .with("reason", "lockout")
        .with("end", 1_700_000_000i64);
    dispatcher.emit(fields, None, None).unwrap();

    let message = &sink.messages()[0];
    assert!(message.contains("cs1=tenant-42"));
    assert!(message.contains("reason=lockout"));
    assert!(message.contains("end=1700000000"));
}

#[test]
fn normalize_is_observable_without_delivery() {
    let dispatcher = default_dispatcher(Vec::new());

    let record = dispatcher.normalize(
        EventRecord::new().with("fname", "a/b/c.txt"),
        None,
        None,
    );

    assert_eq!(record.get("fname"), Some(&FieldValue::from("c.txt")));
    assert_eq!(record.get("outcome"), Some(&FieldValue::from("failure")));
}
