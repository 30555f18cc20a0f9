//! The backend that performs actual output.

use std::error::Error;
use std::fmt::Write as _;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::severity::Severity;

/// An error attached to a record, whose description travels with the message.
pub type Failure<'a> = &'a (dyn Error + 'static);

/// Output backend for records that passed the gate.
///
/// Implementations must tolerate concurrent calls; the gate adds no locking.
pub trait LogSink: Send + Sync {
    fn write(&self, severity: Severity, tag: &str, message: &str, failure: Option<Failure<'_>>);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn write(&self, severity: Severity, tag: &str, message: &str, failure: Option<Failure<'_>>) {
        (**self).write(severity, tag, message, failure)
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, severity: Severity, tag: &str, message: &str, failure: Option<Failure<'_>>) {
        (**self).write(severity, tag, message, failure)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write(&self, severity: Severity, tag: &str, message: &str, failure: Option<Failure<'_>>) {
        (**self).write(severity, tag, message, failure)
    }
}

/// Renders an error followed by its chain of sources, `outer: cause: root`.
pub fn render_failure(failure: Failure<'_>) -> String {
    let mut rendered = failure.to_string();
    let mut source = failure.source();
    while let Some(cause) = source {
        let _ = write!(rendered, ": {cause}");
        source = cause.source();
    }
    rendered
}

/// One record as received by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub tag: String,
    pub message: String,
    pub failure: Option<String>,
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out everything written so far.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Removes and returns everything written so far.
    pub fn drain(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl LogSink for MemorySink {
    fn write(&self, severity: Severity, tag: &str, message: &str, failure: Option<Failure<'_>>) {
        let record = Record {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
            failure: failure.map(render_failure),
        };
        self.records.lock().push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn failure_chain_is_rendered() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "peer reset",
        ));
        assert_eq!(render_failure(&err), "request failed: peer reset");
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.write(Severity::Info, "A", "first", None);
        let err = std::io::Error::other("boom");
        sink.write(Severity::Error, "B", "second", Some(&err));

        let records = sink.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tag, "A");
        assert_eq!(records[0].failure, None);
        assert_eq!(records[1].severity, Severity::Error);
        assert_eq!(records[1].failure.as_deref(), Some("boom"));
        assert!(sink.is_empty());
    }

    #[test]
    fn shared_sink_through_arc() {
        let sink = Arc::new(MemorySink::new());
        let handle: Arc<dyn LogSink> = sink.clone();
        handle.write(Severity::Warn, "C", "shared", None);
        assert_eq!(sink.len(), 1);
    }
}
