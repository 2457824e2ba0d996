//! Host introspection: hostname, outbound address, client address.
//!
//! These are best-effort lookups; each returns `None` rather than an error
//! when the answer cannot be determined, and normalization records the
//! corresponding field as null.

use std::net::UdpSocket;

use crate::context::RequestContext;

/// Returns the machine's configured hostname.
pub fn local_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .map(|h| h.to_string_lossy().into_owned())
}

/// Returns the local IP address used for outbound traffic.
///
/// Binds a UDP socket and asks the OS which local address it would route an
/// external destination through; no packet is ever sent. Returns `None` on
/// hosts with no usable route.
pub fn outbound_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip().to_string())
}

/// Derives the client address from request server metadata.
///
/// Prefers the first entry of a comma-separated `HTTP_X_FORWARDED_FOR`
/// header, falling back to `REMOTE_ADDR`. Returns `None` when there is no
/// request, no metadata capability, or neither key is present.
///
/// # Examples
///
/// ```
/// use cef_audit::{client_ip, RequestContext};
///
/// let request = RequestContext::new()
///     .with_server_meta("HTTP_X_FORWARDED_FOR", "203.0.113.9, 10.0.0.1")
///     .with_server_meta("REMOTE_ADDR", "10.0.0.1");
///
/// assert_eq!(client_ip(Some(&request)), Some("203.0.113.9".to_string()));
/// assert_eq!(client_ip(None), None);
/// ```
pub fn client_ip(request: Option<&RequestContext>) -> Option<String> {
    let meta = request?.server_meta()?;

    if let Some(forwarded) = meta.get("HTTP_X_FORWARDED_FOR") {
        let first = forwarded.split(',').next().map(str::trim);
        if let Some(ip) = first.filter(|s| !s.is_empty()) {
            return Some(ip.to_string());
        }
    }

    meta.get("REMOTE_ADDR").cloned()
}
