//! Contextual objects an event can be enriched from.
//!
//! The dispatcher accepts two optional pieces of context per call: the
//! authenticated user and the HTTP request being audited. Both are plain
//! owned structs so the crate stays decoupled from any web framework's
//! request and session types; framework integrations populate them from
//! their own request objects.

use std::collections::HashMap;

/// The authenticated user an event is attributed to.
///
/// When supplied, the dispatcher writes `suser` and `suid` from this value,
/// replacing anything the caller put in those fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    /// Login name, becomes the `suser` field.
    pub username: String,
    /// Stable numeric identifier, becomes the `suid` field.
    pub id: i64,
}

impl UserRef {
    /// Creates a user reference.
    pub fn new(username: impl Into<String>, id: i64) -> Self {
        Self {
            username: username.into(),
            id,
        }
    }
}

/// Request details an event can be derived from.
///
/// Every part is optional: a capability the integration did not populate is
/// simply skipped during normalization, never an error. This mirrors how a
/// framework request object may or may not expose a URI builder, a scheme,
/// or server metadata depending on where in the stack it was captured.
///
/// # Examples
///
/// ```
/// use cef_audit::RequestContext;
///
/// let request = RequestContext::new()
///     .with_absolute_uri("https://app.example.com/login")
///     .with_method("POST")
///     .with_scheme("https")
///     .with_host("app.example.com:443")
///     .with_server_meta("SERVER_PORT", "443")
///     .with_server_meta("REMOTE_ADDR", "203.0.113.9");
///
/// assert_eq!(request.method(), Some("POST"));
/// assert_eq!(request.server_meta().unwrap().get("SERVER_PORT").map(String::as_str), Some("443"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    absolute_uri: Option<String>,
    method: Option<String>,
    scheme: Option<String>,
    host: Option<String>,
    server_meta: Option<HashMap<String, String>>,
}

impl RequestContext {
    /// Creates a request context with no capabilities populated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fully-qualified URI of the request.
    pub fn with_absolute_uri(mut self, uri: impl Into<String>) -> Self {
        self.absolute_uri = Some(uri.into());
        self
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the URL scheme (`http`, `https`).
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the host header value; a `:port` suffix is allowed and stripped
    /// during normalization.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Adds one server-metadata entry (`SERVER_PORT`, `SERVER_ADDR`,
    /// `REMOTE_ADDR`, `HTTP_X_FORWARDED_FOR`, ...).
    ///
    /// The first call marks the metadata capability as present; a request
    /// built without any entries reports no metadata at all, which is
    /// different from metadata that is present but missing a key.
    pub fn with_server_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.server_meta
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// The absolute URI, if the integration built one.
    pub fn absolute_uri(&self) -> Option<&str> {
        self.absolute_uri.as_deref()
    }

    /// The HTTP method, if captured.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// The URL scheme, if captured.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The host header value, if captured.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The server metadata map, if the capability is present.
    pub fn server_meta(&self) -> Option<&HashMap<String, String>> {
        self.server_meta.as_ref()
    }
}
