use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

/// Error returned when an emitter fails to deliver a message.
///
/// # Examples
///
/// ```
/// use cef_audit::{EmitError, EmitErrorKind};
///
/// let error = EmitError::new(EmitErrorKind::Io);
/// assert_eq!(error.kind(), EmitErrorKind::Io);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitError {
    kind: EmitErrorKind,
    message: Option<String>,
}

impl EmitError {
    /// Creates a new emit error with the specified kind.
    pub fn new(kind: EmitErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a new emit error with a custom message.
    pub fn with_message(kind: EmitErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> EmitErrorKind {
        self.kind
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = &self.message {
            write!(f, "emit error ({}): {}", self.kind, msg)
        } else {
            write!(f, "emit error ({})", self.kind)
        }
    }
}

impl std::error::Error for EmitError {}

impl From<io::Error> for EmitError {
    fn from(err: io::Error) -> Self {
        EmitError::with_message(EmitErrorKind::Io, err.to_string())
    }
}

/// Kind of emit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitErrorKind {
    /// I/O error while writing to the sink.
    Io,
    /// The sink is no longer usable (e.g. its writer lock is poisoned).
    Closed,
}

impl fmt::Display for EmitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::Closed => write!(f, "sink closed"),
        }
    }
}

/// A delivery sink for formatted event messages.
///
/// Each configured sink receives the complete CEF line and performs its own
/// delivery; success and failure handling past the returned `Result` is the
/// emitter's business. Implementations must be safe to share across threads
/// — the dispatcher holds them for the process lifetime and may be called
/// concurrently.
pub trait Emitter: Send + Sync {
    /// Delivers one formatted event message.
    ///
    /// # Errors
    ///
    /// Returns `EmitError` if delivery fails. The dispatcher does not catch
    /// or retry; the error propagates to the caller of `emit`.
    fn emit(&self, message: &str) -> Result<(), EmitError>;
}

/// Shared emitters can be handed to a dispatcher while the caller keeps a
/// handle, which is how tests observe delivered messages.
impl<E: Emitter + ?Sized> Emitter for std::sync::Arc<E> {
    fn emit(&self, message: &str) -> Result<(), EmitError> {
        (**self).emit(message)
    }
}

/// An emitter that writes each message as one line to an [`io::Write`]
/// stream, flushing after every message.
///
/// This is the default sink: audit lines go to standard error the way a
/// stream log handler would, and any writer (a file, a pipe, a connected
/// socket) can be substituted.
///
/// # Examples
///
/// ```
/// use cef_audit::{Emitter, StreamEmitter};
///
/// let emitter = StreamEmitter::stderr();
/// emitter.emit("CEF:0|Garpix|Django Application|1.0.0|auth.login|login|3|")
///     .expect("stderr is writable");
/// ```
pub struct StreamEmitter<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> StreamEmitter<W> {
    /// Creates a stream emitter over an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl StreamEmitter<io::Stdout> {
    /// Creates a stream emitter that writes to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamEmitter<io::Stderr> {
    /// Creates a stream emitter that writes to stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> Emitter for StreamEmitter<W> {
    fn emit(&self, message: &str) -> Result<(), EmitError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| EmitError::with_message(EmitErrorKind::Closed, "writer lock poisoned"))?;
        writeln!(writer, "{}", message)?;
        writer.flush()?;
        Ok(())
    }
}

/// An emitter that collects messages into an in-memory vector.
///
/// Useful in tests and demos to observe exactly what a dispatcher produced.
///
/// # Examples
///
/// ```
/// use cef_audit::{Emitter, MemoryEmitter};
///
/// let emitter = MemoryEmitter::new();
/// emitter.emit("CEF:0|a|b|c|d|e|3|msg=hi").unwrap();
///
/// assert_eq!(emitter.len(), 1);
/// assert!(emitter.messages()[0].ends_with("msg=hi"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    messages: Mutex<Vec<String>>,
}

impl MemoryEmitter {
    /// Creates an empty in-memory emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the collected messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Returns the number of collected messages.
    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if no messages have been collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&self, message: &str) -> Result<(), EmitError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| EmitError::with_message(EmitErrorKind::Closed, "buffer lock poisoned"))?;
        messages.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_error_creation() {
        let error = EmitError::new(EmitErrorKind::Io);
        assert_eq!(error.kind(), EmitErrorKind::Io);
        assert_eq!(error.message(), None);
    }

    #[test]
    fn emit_error_with_message() {
        let error = EmitError::with_message(EmitErrorKind::Io, "disk full");
        assert_eq!(error.kind(), EmitErrorKind::Io);
        assert_eq!(error.message(), Some("disk full"));
    }

    #[test]
    fn emit_error_display() {
        let error = EmitError::new(EmitErrorKind::Closed);
        let output = format!("{}", error);
        assert!(output.contains("sink closed"));
    }

    #[test]
    fn emit_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe gone");
        let error = EmitError::from(io_err);

        assert_eq!(error.kind(), EmitErrorKind::Io);
        assert!(error.message().unwrap().contains("pipe gone"));
    }

    #[test]
    fn stream_emitter_writes_one_line_per_message() {
        let emitter = StreamEmitter::new(Vec::new());
        emitter.emit("first").unwrap();
        emitter.emit("second").unwrap();

        let written = emitter.writer.into_inner().unwrap();
        assert_eq!(String::from_utf8(written).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn memory_emitter_collects_in_order() {
        let emitter = MemoryEmitter::new();
        assert!(emitter.is_empty());

        emitter.emit("one").unwrap();
        emitter.emit("two").unwrap();

        assert_eq!(emitter.len(), 2);
        assert_eq!(emitter.messages(), vec!["one", "two"]);
    }

    #[test]
    fn emitters_are_object_safe() {
        let emitters: Vec<Box<dyn Emitter>> = vec![
            Box::new(MemoryEmitter::new()),
            Box::new(StreamEmitter::new(Vec::new())),
        ];

        for emitter in &emitters {
            emitter.emit("probe").unwrap();
        }
    }
}
