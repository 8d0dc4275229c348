//! Core logging types: summary entries, status, and the [`Log`] trait.

/// Per-collection result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Collection source path.
    pub name: String,
    /// Final status of the collection.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or failure count).
    pub message: Option<String>,
}

/// Status of a processed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Every target was handled without error.
    Ok,
    /// The collection root is absent from this checkout.
    Skipped,
    /// At least one target failed.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) writes through `tracing`; tests swap in
/// an in-memory implementation to assert on what was reported.
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a collection result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
