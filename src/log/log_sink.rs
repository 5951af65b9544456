use crate::log::log_level::LogLevel;

/// Destination for log records. Implementations must never block the caller
/// for long: the capture loop logs from its own thread between frames.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
