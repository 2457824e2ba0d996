//! Field truncation against a schema of maximum lengths.

use crate::record::{EventRecord, FieldValue};
use crate::schema::FieldSchema;

/// Returns a copy of `record` with over-length string values cut down to
/// their schema-declared maximum.
///
/// For each field whose name the schema declares with a limit `n`, and whose
/// value is a string longer than `n` characters, the value is replaced with
/// its first `n` characters. Fields unknown to the schema, fields declared
/// without a limit, and non-string values pass through unchanged. The input
/// record is never mutated, and no input can make this fail.
///
/// Truncation counts characters rather than bytes, so a multi-byte code
/// point is either kept whole or dropped.
///
/// # Examples
///
/// ```
/// use cef_audit::{truncate, EventRecord, FieldSchema, FieldValue};
///
/// let schema = FieldSchema::new().with_limit("msg", 5);
/// let record = EventRecord::new()
///     .with("msg", "hello world")
///     .with("suid", 42i64);
///
/// let cleaned = truncate(&record, &schema);
/// assert_eq!(cleaned.get("msg"), Some(&FieldValue::from("hello")));
/// assert_eq!(cleaned.get("suid"), Some(&FieldValue::from(42i64)));
/// ```
pub fn truncate(record: &EventRecord, schema: &FieldSchema) -> EventRecord {
    record
        .iter()
        .map(|(name, value)| {
            let value = match (schema.max_len(name), value) {
                (Some(max_len), FieldValue::Str(s)) if s.chars().count() > max_len => {
                    FieldValue::Str(s.chars().take(max_len).collect())
                }
                _ => value.clone(),
            };
            (name.to_string(), value)
        })
        .collect()
}
