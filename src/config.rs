//! Process-wide dispatcher configuration.
//!
//! Built once at startup and shared by reference for the process lifetime;
//! nothing here is mutated after construction, so dispatchers can share a
//! single [`CefConfig`] across threads without locking.

use std::collections::HashMap;
use std::fmt;

use crate::emitter::{Emitter, StreamEmitter};

/// Device identity stamped into every CEF header.
///
/// # Examples
///
/// ```
/// use cef_audit::CefConfig;
///
/// let config = CefConfig::default();
/// assert_eq!(config.device_vendor, "Garpix");
/// assert_eq!(config.device_product, "Django Application");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CefConfig {
    /// Device vendor name for the CEF header.
    pub device_vendor: String,
    /// Device product name for the CEF header.
    pub device_product: String,
    /// Device version for the CEF header.
    pub device_version: String,
    /// CEF protocol version in the `CEF:N` prefix.
    pub cef_version: u8,
}

impl Default for CefConfig {
    fn default() -> Self {
        Self {
            device_vendor: "Garpix".to_string(),
            device_product: "Django Application".to_string(),
            device_version: "1.0.0".to_string(),
            cef_version: 0,
        }
    }
}

/// Error raised while resolving startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An emitter identifier has no registered factory.
    UnknownEmitter {
        /// The identifier that failed to resolve.
        key: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownEmitter { key } => {
                write!(f, "no emitter registered under '{}'", key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

type EmitterFactory = Box<dyn Fn() -> Box<dyn Emitter> + Send + Sync>;

/// Maps emitter identifiers from configuration to constructors.
///
/// Configuration names sinks by key (`"stream"`, `"syslog"`, ...); the
/// registry resolves each key to a factory at startup, so a typo surfaces
/// as a [`ConfigError`] before the first event is ever emitted rather than
/// at emit time.
///
/// # Examples
///
/// ```
/// use cef_audit::{EmitterRegistry, MemoryEmitter};
///
/// let mut registry = EmitterRegistry::default();
/// registry.register("memory", || Box::new(MemoryEmitter::new()));
///
/// let emitters = registry.build_all(&["stream", "memory"]).unwrap();
/// assert_eq!(emitters.len(), 2);
///
/// assert!(registry.build("nonexistent").is_err());
/// ```
pub struct EmitterRegistry {
    factories: HashMap<String, EmitterFactory>,
}

impl EmitterRegistry {
    /// Creates a registry with no factories.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under `key`, replacing any previous registration.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Emitter> + Send + Sync + 'static,
    {
        self.factories.insert(key.into(), Box::new(factory));
    }

    /// Constructs the emitter registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEmitter`] if no factory is registered.
    pub fn build(&self, key: &str) -> Result<Box<dyn Emitter>, ConfigError> {
        self.factories
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| ConfigError::UnknownEmitter {
                key: key.to_string(),
            })
    }

    /// Constructs one emitter per key, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::UnknownEmitter`] encountered.
    pub fn build_all<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> Result<Vec<Box<dyn Emitter>>, ConfigError> {
        keys.iter().map(|key| self.build(key.as_ref())).collect()
    }
}

impl Default for EmitterRegistry {
    /// A registry that knows the built-in `"stream"` emitter (stderr),
    /// the default sink when configuration names none.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("stream", || Box::new(StreamEmitter::stderr()));
        registry
    }
}

impl fmt::Debug for EmitterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("EmitterRegistry").field("keys", &keys).finish()
    }
}
