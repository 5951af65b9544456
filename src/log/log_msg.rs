use crate::log::log_level::LogLevel;

/// A single log record travelling from a `LoggerHandle` to the logger worker.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// Severity of the record.
    pub level: LogLevel,
    /// Wall-clock time of the event in milliseconds since the UNIX epoch.
    pub ts_ms: u128,
    /// Message content.
    pub text: String,
    /// Origin of the record, typically `module_path!()`.
    pub target: &'static str,
}

impl LogMsg {
    /// Creates a new `LogMsg`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let msg = LogMsg::new(
    ///     LogLevel::Info,
    ///     "captured thumbs_up_0.jpg",
    ///     module_path!(),
    ///     1_760_000_000_000,
    /// );
    /// ```
    pub fn new(
        level: LogLevel,
        text: impl Into<String>,
        target: &'static str,
        ts_ms: u128,
    ) -> Self {
        Self {
            level,
            ts_ms,
            text: text.into(),
            target,
        }
    }

    /// Formats the record as one line of the log file (without newline).
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "[{:?}] {} | {} | {}",
            self.level, self.ts_ms, self.target, self.text
        )
    }
}
