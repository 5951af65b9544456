/// Defines the severity levels for log messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Designates very fine-grained informational events.
    Trace,
    /// Designates fine-grained informational events that are most useful to debug the collector.
    Debug,
    /// Designates progress messages, such as a captured frame or a gesture change.
    Info,
    /// Designates suspicious input that is still accepted, such as an empty bounding box.
    Warn,
    /// Designates failures that end the capture session.
    Error,
}
