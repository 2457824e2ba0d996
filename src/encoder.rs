//! CEF message encoding.
//!
//! Messages have the shape:
//!
//! ```text
//! CEF:Version|Device Vendor|Device Product|Device Version|Signature ID|Name|Severity|Extension
//! ```
//!
//! Header fields escape `|` and `\`; extension values escape `\` and `=`.
//! Newlines are escaped in both positions so a record always occupies one
//! line on a stream sink.

use std::fmt::Write as FmtWrite;

use crate::config::CefConfig;
use crate::event::EventDescriptor;
use crate::record::EventRecord;

/// Formats a normalized record as a single CEF message line.
///
/// Extension pairs are rendered in the record's sorted key order; null
/// values render as an empty `key=` pair so the canonical field set stays
/// visible in the output.
///
/// # Examples
///
/// ```
/// use cef_audit::{encode, CefConfig, EventDescriptor, EventRecord, Severity};
///
/// let config = CefConfig::default();
/// let descriptor = EventDescriptor::new("login", "auth.login", Severity::new(3));
/// let record = EventRecord::new().with("msg", "signed in");
///
/// let message = encode(&config, &descriptor, &record);
/// assert_eq!(
///     message,
///     "CEF:0|Garpix|Django Application|1.0.0|auth.login|login|3|msg=signed in"
/// );
/// ```
pub fn encode(config: &CefConfig, descriptor: &EventDescriptor, record: &EventRecord) -> String {
    let mut output = String::with_capacity(256);

    let _ = write!(
        output,
        "CEF:{}|{}|{}|{}|{}|{}|{}|",
        config.cef_version,
        escape_header(&config.device_vendor),
        escape_header(&config.device_product),
        escape_header(&config.device_version),
        escape_header(descriptor.signature_id()),
        escape_header(descriptor.name()),
        descriptor.severity(),
    );

    let extensions: Vec<String> = record
        .iter()
        .map(|(name, value)| format!("{}={}", name, escape_extension(&value.to_string())))
        .collect();
    output.push_str(&extensions.join(" "));

    output
}

/// Escape special characters in CEF header fields.
fn escape_header(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape special characters in CEF extension values.
fn escape_extension(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '=' => result.push_str("\\="),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            _ => result.push(c),
        }
    }
    result
}
