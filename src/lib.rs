//! Security-audit event emission in Common Event Format (CEF).
//!
//! This crate normalizes loosely-typed audit event data from a web
//! application into the canonical CEF field set and delivers it to one or
//! more configured sinks:
//!
//! - **Normalization**: missing fields are derived from the authenticated
//!   user, the HTTP request, and host introspection
//! - **Truncation**: string fields are cut to their schema-declared
//!   maximum lengths
//! - **Dispatch**: the encoded CEF line is handed to every configured
//!   emitter, in order, synchronously
//!
//! # Core Types
//!
//! - [`EventDispatcher`]: per-event-type normalizer and dispatcher
//! - [`EventRecord`] / [`FieldValue`]: one event's field mapping
//! - [`FieldSchema`] / [`truncate`]: max-length constraints and the filter
//! - [`UserRef`] / [`RequestContext`]: contextual capabilities consumed
//!   during normalization
//! - [`Emitter`] / [`EmitterRegistry`]: delivery sinks and their
//!   configuration-key factory
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use cef_audit::{
//!     CefConfig, EmitterRegistry, EventDescriptor, EventDispatcher, EventRecord, FieldSchema,
//!     RequestContext, Severity, UserRef,
//! };
//!
//! // Built once at startup, shared for the process lifetime.
//! let config = Arc::new(CefConfig::default());
//! let registry = EmitterRegistry::default();
//!
//! let login_failed = EventDispatcher::new(
//!     Arc::clone(&config),
//!     EventDescriptor::new("login_failed", "auth.login.failed", Severity::new(6)),
//!     FieldSchema::cef_extensions(),
//!     registry.build_all(&["stream"]).expect("known emitter keys"),
//! );
//!
//! // Per request: partial fields plus context.
//! let request = RequestContext::new()
//!     .with_method("POST")
//!     .with_host("app.example.com")
//!     .with_server_meta("REMOTE_ADDR", "203.0.113.9");
//!
//! let fields = EventRecord::new().with("msg", "bad password");
//! login_failed
//!     .emit(fields, Some(&UserRef::new("alice", 7)), Some(&request))
//!     .expect("stream emitter is writable");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod dispatcher;
mod emitter;
mod encoder;
mod event;
mod host;
mod record;
mod schema;
mod truncate;

pub use config::{CefConfig, ConfigError, EmitterRegistry};
pub use context::{RequestContext, UserRef};
pub use dispatcher::EventDispatcher;
pub use emitter::{EmitError, EmitErrorKind, Emitter, MemoryEmitter, StreamEmitter};
pub use encoder::encode;
pub use event::{EventDescriptor, Outcome, Severity};
pub use host::{client_ip, local_hostname, outbound_ip};
pub use record::{EventRecord, FieldValue};
pub use schema::FieldSchema;
pub use truncate::truncate;
