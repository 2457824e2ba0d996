use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// The value of a single event field.
///
/// CEF extension values are strings or integers on the wire; `Null` marks a
/// canonical field the event could not derive (it is still emitted so every
/// record presents the full field set).
///
/// # Examples
///
/// ```
/// use cef_audit::FieldValue;
///
/// let v = FieldValue::from("192.0.2.10");
/// assert!(v.is_truthy());
/// assert_eq!(v.as_str(), Some("192.0.2.10"));
///
/// assert!(!FieldValue::Null.is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value.
    Str(String),
    /// An integer value (user ids, ports, Unix timestamps).
    Int(i64),
    /// An absent value, emitted as an empty extension.
    Null,
}

impl FieldValue {
    /// Returns `true` unless the value is null, an empty string, or zero.
    ///
    /// The derivation steps in the dispatcher only fill a field in when it
    /// is not truthy, so an explicitly supplied empty string or zero is
    /// treated the same as an absent field.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Str(s) => !s.is_empty(),
            FieldValue::Int(n) => *n != 0,
            FieldValue::Null => false,
        }
    }

    /// Returns the string contents, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer contents, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns `true` if the value is [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => FieldValue::Str(s),
            None => FieldValue::Null,
        }
    }
}

/// One audit event instance: a mapping from field name to [`FieldValue`].
///
/// Keys are kept sorted so the encoded extension order is deterministic.
/// Records are cheap, ephemeral values: the dispatcher builds one per call,
/// hands it off, and discards it.
///
/// # Examples
///
/// ```
/// use cef_audit::{EventRecord, FieldValue};
///
/// let record = EventRecord::new()
///     .with("msg", "login failed")
///     .with("suid", 7i64);
///
/// assert_eq!(record.get("msg"), Some(&FieldValue::from("login failed")));
/// assert!(record.is_truthy("suid"));
/// assert!(!record.is_truthy("src"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl EventRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Inserts a field, replacing any existing value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style insert for constructing records inline.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns `true` if the record contains a field named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns `true` if `name` is present and its value is truthy.
    ///
    /// A missing field counts as falsy, matching the fill-in checks the
    /// dispatcher performs during normalization.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(FieldValue::is_truthy)
    }

    /// Iterates over fields in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldValue)> for EventRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
