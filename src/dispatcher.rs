//! Event normalization and dispatch.
//!
//! One [`EventDispatcher`] exists per event type. It is configured once at
//! startup and then called with partial field data; each call derives the
//! missing canonical fields from the supplied context, truncates the result
//! against the schema, encodes it, and hands it to every configured emitter
//! in order.

use std::sync::Arc;

use crate::config::CefConfig;
use crate::context::{RequestContext, UserRef};
use crate::emitter::{EmitError, Emitter};
use crate::encoder::encode;
use crate::event::EventDescriptor;
use crate::host;
use crate::record::{EventRecord, FieldValue};
use crate::schema::FieldSchema;
use crate::truncate::truncate;

/// Instance fields every outgoing record carries, as nulls when underivable.
const CANONICAL_FIELDS: [&str; 9] = [
    "dhost", "dpt", "dst", "end", "fname", "msg", "src", "suid", "suser",
];

/// Normalizes partial event data and forwards it to the configured sinks.
///
/// The dispatcher owns no per-call state: configuration, descriptor, schema,
/// and the emitter list are fixed at construction and shared read-only, so
/// concurrent `emit` calls are safe as long as each emitter is (which the
/// [`Emitter`] bound requires).
///
/// # Derivation policy
///
/// Context-derived fields overwrite caller-supplied values (`suser`, `suid`,
/// `request`, `requestMethod`, `app`, `dhost`, `dpt`, `dst` when the
/// corresponding capability is present); fallback fields (`dhost`, `dst`,
/// `end`, `src`) are only filled in when still absent or falsy.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cef_audit::{
///     CefConfig, EventDescriptor, EventDispatcher, EventRecord, FieldSchema, MemoryEmitter,
///     Severity, UserRef,
/// };
///
/// let sink = Arc::new(MemoryEmitter::new());
/// let dispatcher = EventDispatcher::new(
///     Arc::new(CefConfig::default()),
///     EventDescriptor::new("login_failed", "auth.login.failed", Severity::new(6)),
///     FieldSchema::cef_extensions(),
///     vec![Box::new(Arc::clone(&sink))],
/// );
///
/// let fields = EventRecord::new().with("msg", "bad password");
/// dispatcher
///     .emit(fields, Some(&UserRef::new("alice", 7)), None)
///     .unwrap();
///
/// let message = &sink.messages()[0];
/// assert!(message.contains("suser=alice"));
/// assert!(message.contains("suid=7"));
/// ```
pub struct EventDispatcher {
    config: Arc<CefConfig>,
    descriptor: EventDescriptor,
    schema: FieldSchema,
    emitters: Vec<Box<dyn Emitter>>,
}

impl EventDispatcher {
    /// Creates a dispatcher for one event type.
    pub fn new(
        config: Arc<CefConfig>,
        descriptor: EventDescriptor,
        schema: FieldSchema,
        emitters: Vec<Box<dyn Emitter>>,
    ) -> Self {
        Self {
            config,
            descriptor,
            schema,
            emitters,
        }
    }

    /// The descriptor this dispatcher stamps into its headers.
    pub fn descriptor(&self) -> &EventDescriptor {
        &self.descriptor
    }

    /// Normalizes, encodes, and delivers one event.
    ///
    /// Delivery is synchronous and in configured emitter order. Normalization
    /// itself cannot fail; the only error source is delivery.
    ///
    /// # Errors
    ///
    /// The first emitter failure propagates unchanged and emitters later in
    /// the list are not invoked.
    pub fn emit(
        &self,
        fields: EventRecord,
        user: Option<&UserRef>,
        request: Option<&RequestContext>,
    ) -> Result<(), EmitError> {
        let record = self.normalize(fields, user, request);
        let message = encode(&self.config, &self.descriptor, &record);

        tracing::debug!(
            event = %self.descriptor.name(),
            emitters = self.emitters.len(),
            "dispatching audit event"
        );

        for emitter in &self.emitters {
            emitter.emit(&message)?;
        }
        Ok(())
    }

    /// Derives the canonical field set from partial data and context.
    ///
    /// Exposed so the derivation policy can be exercised without I/O; `emit`
    /// is `normalize` plus encoding and delivery.
    pub fn normalize(
        &self,
        mut fields: EventRecord,
        user: Option<&UserRef>,
        request: Option<&RequestContext>,
    ) -> EventRecord {
        strip_fname_path(&mut fields);
        apply_user(&mut fields, user);
        apply_request(&mut fields, request);
        fill_host_defaults(&mut fields, request);
        self.fill_classification(&mut fields);
        truncate(&fields, &self.schema)
    }

    /// Ensures classification and canonical instance fields are populated.
    fn fill_classification(&self, fields: &mut EventRecord) {
        if !fields.contains("outcome") {
            fields.set("outcome", self.descriptor.outcome().to_string());
        }
        for name in CANONICAL_FIELDS {
            if !fields.contains(name) {
                fields.set(name, FieldValue::Null);
            }
        }
    }
}

/// Reduces a supplied `fname` to its final path segment.
///
/// Applies whenever `fname` is a string, regardless of its current value.
fn strip_fname_path(fields: &mut EventRecord) {
    if let Some(name) = fields.get("fname").and_then(FieldValue::as_str) {
        let basename = name.rsplit('/').next().unwrap_or(name).to_string();
        fields.set("fname", basename);
    }
}

/// Attributes the event to the authenticated user, overwriting any
/// caller-supplied `suser`/`suid`.
fn apply_user(fields: &mut EventRecord, user: Option<&UserRef>) {
    if let Some(user) = user {
        fields.set("suser", user.username.clone());
        fields.set("suid", user.id);
    }
}

/// Copies request capabilities into the record, one field per capability.
///
/// Each present capability overwrites unconditionally; absent capabilities
/// are skipped.
fn apply_request(fields: &mut EventRecord, request: Option<&RequestContext>) {
    let Some(request) = request else {
        return;
    };

    if let Some(uri) = request.absolute_uri() {
        fields.set("request", uri);
    }
    if let Some(method) = request.method() {
        fields.set("requestMethod", method);
    }
    if let Some(scheme) = request.scheme() {
        fields.set("app", scheme);
    }
    if let Some(host) = request.host() {
        // Host headers may carry a :port suffix; dhost is the name alone.
        let name = host.split(':').next().unwrap_or(host);
        fields.set("dhost", name);
    }
    if let Some(meta) = request.server_meta() {
        fields.set("dpt", FieldValue::from(meta.get("SERVER_PORT").cloned()));
        fields.set("dst", FieldValue::from(meta.get("SERVER_ADDR").cloned()));
    }
}

/// Fills `dhost`/`dst`/`end`/`src` from system introspection when the
/// request left them falsy.
fn fill_host_defaults(fields: &mut EventRecord, request: Option<&RequestContext>) {
    if !fields.is_truthy("dhost") {
        fields.set("dhost", FieldValue::from(host::local_hostname()));
    }
    if !fields.is_truthy("dst") {
        fields.set("dst", FieldValue::from(host::outbound_ip()));
    }
    if !fields.is_truthy("end") {
        fields.set("end", chrono::Utc::now().timestamp());
    }
    if !fields.is_truthy("src") {
        fields.set("src", FieldValue::from(host::client_ip(request)));
    }
}
