use std::collections::HashMap;

/// Maximum-length constraints for event fields, keyed by field name.
///
/// The schema is a lookup table the truncation filter consults; fields absent
/// from the schema, or present with no declared limit, are unbounded. The
/// core never modifies a schema after construction.
///
/// # Examples
///
/// ```
/// use cef_audit::FieldSchema;
///
/// let schema = FieldSchema::cef_extensions();
/// assert_eq!(schema.max_len("msg"), Some(1023));
/// assert_eq!(schema.max_len("customField"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    limits: HashMap<String, Option<usize>>,
}

impl FieldSchema {
    /// Creates an empty schema with no constraints.
    pub fn new() -> Self {
        Self {
            limits: HashMap::new(),
        }
    }

    /// Declares a field with a maximum string length.
    pub fn with_limit(mut self, name: impl Into<String>, max_len: usize) -> Self {
        self.limits.insert(name.into(), Some(max_len));
        self
    }

    /// Declares a field with no length limit.
    ///
    /// Unbounded declarations behave the same as absent ones for truncation;
    /// they exist so a schema can enumerate its full field dictionary.
    pub fn with_unbounded(mut self, name: impl Into<String>) -> Self {
        self.limits.insert(name.into(), None);
        self
    }

    /// Returns the declared maximum length for `name`.
    ///
    /// `None` means the field is unknown to the schema or declared without
    /// a limit; either way it passes through truncation unchanged.
    pub fn max_len(&self, name: &str) -> Option<usize> {
        self.limits.get(name).copied().flatten()
    }

    /// Returns `true` if the schema declares `name` at all.
    pub fn declares(&self, name: &str) -> bool {
        self.limits.contains_key(name)
    }

    /// The CEF extension dictionary limits for the fields this crate emits.
    ///
    /// Lengths follow the ArcSight extension dictionary for the standard
    /// keys; address-valued and integer-valued keys carry no string limit.
    pub fn cef_extensions() -> Self {
        Self::new()
            .with_limit("act", 63)
            .with_limit("app", 31)
            .with_limit("dhost", 1023)
            .with_limit("duser", 1023)
            .with_limit("fname", 1023)
            .with_limit("msg", 1023)
            .with_limit("outcome", 63)
            .with_limit("reason", 31)
            .with_limit("request", 1023)
            .with_limit("requestMethod", 31)
            .with_limit("shost", 1023)
            .with_limit("suser", 1023)
            .with_unbounded("dpt")
            .with_unbounded("dst")
            .with_unbounded("end")
            .with_unbounded("src")
            .with_unbounded("suid")
    }
}
