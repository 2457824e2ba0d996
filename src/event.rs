//! Event classification: what kind of event a dispatcher emits.

use std::fmt;

/// CEF severity on the 0-10 scale.
///
/// 0-3 is informational, 4-6 warning, 7-8 high, 9-10 critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Severity(u8);

impl Severity {
    /// Creates a severity value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is greater than 10; severities outside the CEF
    /// scale are a programming error, not an input condition.
    pub fn new(value: u8) -> Self {
        assert!(value <= 10, "CEF severity must be in 0..=10");
        Self(value)
    }

    /// Returns the numeric severity.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of the audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Operation succeeded
    Success,
    /// Operation failed or was refused
    Failure,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
        }
    }
}

/// Identity and classification of one event type.
///
/// One descriptor exists per dispatcher instance and is fixed for the
/// process lifetime: its fields become the signature-id, name, and severity
/// slots of every CEF header the dispatcher produces, and `outcome` is the
/// default written into records that do not carry one.
///
/// # Examples
///
/// ```
/// use cef_audit::{EventDescriptor, Outcome, Severity};
///
/// let descriptor = EventDescriptor::new("login_failed", "auth.login.failed", Severity::new(6))
///     .with_outcome(Outcome::Failure);
///
/// assert_eq!(descriptor.name(), "login_failed");
/// assert_eq!(descriptor.outcome(), Outcome::Failure);
/// ```
#[derive(Debug, Clone)]
pub struct EventDescriptor {
    name: String,
    signature_id: String,
    severity: Severity,
    outcome: Outcome,
}

impl EventDescriptor {
    /// Creates a descriptor with the default `success` outcome.
    pub fn new(
        name: impl Into<String>,
        signature_id: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            signature_id: signature_id.into(),
            severity,
            outcome: Outcome::Success,
        }
    }

    /// Sets the default outcome for records that do not supply one.
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Human-readable event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique identifier for the event type.
    pub fn signature_id(&self) -> &str {
        &self.signature_id
    }

    /// Event severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Default outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_display() {
        assert_eq!(Severity::new(0).to_string(), "0");
        assert_eq!(Severity::new(10).to_string(), "10");
    }

    #[test]
    #[should_panic(expected = "CEF severity must be in 0..=10")]
    fn severity_rejects_out_of_scale() {
        let _ = Severity::new(11);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Success.to_string(), "success");
        assert_eq!(Outcome::Failure.to_string(), "failure");
    }

    #[test]
    fn descriptor_defaults_to_success() {
        let descriptor = EventDescriptor::new("login", "auth.login", Severity::new(3));

        assert_eq!(descriptor.name(), "login");
        assert_eq!(descriptor.signature_id(), "auth.login");
        assert_eq!(descriptor.severity(), Severity::new(3));
        assert_eq!(descriptor.outcome(), Outcome::Success);
    }

    #[test]
    fn descriptor_with_outcome() {
        let descriptor = EventDescriptor::new("login", "auth.login", Severity::new(6))
            .with_outcome(Outcome::Failure);

        assert_eq!(descriptor.outcome(), Outcome::Failure);
    }
}
