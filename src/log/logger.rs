use crate::{
    config::LogSettings,
    log::{log_level::LogLevel, log_msg::LogMsg, logger_handle::LoggerHandle},
};

use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::mpsc::{self, TrySendError},
    thread::{self, JoinHandle},
    time::{SystemTime, UNIX_EPOCH},
};

// -----------------------------------------------------------------------------
// COMPILE-TIME CONFIGURATION
// -----------------------------------------------------------------------------

/// Flush to disk every 20 lines if debugging/tracing.
#[cfg(feature = "log-debug")]
const FLUSH_BATCH_SIZE: u32 = 20;

/// Flush to disk every 100 lines by default.
#[cfg(not(feature = "log-debug"))]
const FLUSH_BATCH_SIZE: u32 = 100;

/// Default capacity of the log channel.
pub const DEFAULT_CAPACITY: usize = 1024;

// -----------------------------------------------------------------------------

/// Bounded, non-blocking logger that writes to a per-process log file.
///
/// A background worker thread consumes `LogMsg` values from a bounded channel
/// and appends them to the log file. When `echo` is enabled, records of level
/// `Info` and above are also printed to stderr so the operator sees capture
/// confirmations in the terminal.
pub struct Logger {
    handle: LoggerHandle,
    thread: Option<JoinHandle<()>>,
    file_path: PathBuf,
}

impl Logger {
    /// Starts the logger as described by the `[Logging]` settings.
    #[must_use]
    pub fn start(settings: &LogSettings, cap: usize) -> Self {
        let name = Some(settings.file_name.as_str());
        match &settings.dir {
            Some(dir) => Self::start_in_dir(dir, name, cap, settings.echo),
            None => Self::start_default(name, cap, settings.echo),
        }
    }

    /// Creates a `logs/` directory next to the executable and starts the logger there.
    ///
    /// # Example Filename
    /// `target/debug/logs/gesture_collector-20261014_093045-pid1234.log`
    #[must_use]
    pub fn start_default(app_name: Option<&str>, cap: usize, echo: bool) -> Self {
        let base = exe_dir_fallback_cwd().join("logs");
        Self::start_in_dir(base, app_name, cap, echo)
    }

    /// Starts the logger in a specific directory, creating it if missing.
    ///
    /// The file name is derived from the optional `app_name`, the current UTC
    /// time and the process id.
    pub fn start_in_dir<D: AsRef<Path>>(
        dir: D,
        app_name: Option<&str>,
        cap: usize,
        echo: bool,
    ) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let _ = fs::create_dir_all(&dir);

        let ts = timestamp_for_filename();
        let pid = std::process::id();

        let fname = if let Some(name) = app_name {
            format!("{name}-{ts}-pid{pid}.log")
        } else {
            format!("{ts}-pid{pid}.log")
        };

        let file_path = dir.join(&fname);

        let (tx, rx) = mpsc::sync_channel::<LogMsg>(cap.max(1));
        let handle = LoggerHandle { tx };

        let file_path_clone = file_path.clone();

        let thread = thread::Builder::new()
            .name("logger-worker".into())
            .spawn(move || {
                // Try target file -> temp file -> sink (never panic).
                let writer: Box<dyn Write + Send> = if let Ok(f) = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&file_path_clone)
                {
                    Box::new(f)
                } else {
                    let fallback = std::env::temp_dir().join("gesture_collector-fallback.log");
                    match OpenOptions::new().create(true).append(true).open(&fallback) {
                        Ok(f) => Box::new(f),
                        Err(_) => Box::new(io::sink()),
                    }
                };

                let mut out: BufWriter<Box<dyn Write + Send>> = BufWriter::new(writer);
                let mut lines_written: u32 = 0;

                while let Ok(m) = rx.recv() {
                    let line = m.to_line();
                    let _ = writeln!(&mut out, "{line}");
                    lines_written = lines_written.wrapping_add(1);

                    // Warn/Error are flushed right away; the rest in batches.
                    if matches!(m.level, LogLevel::Warn | LogLevel::Error)
                        || lines_written.is_multiple_of(FLUSH_BATCH_SIZE)
                    {
                        let _ = out.flush();
                    }

                    if echo && m.level >= LogLevel::Info {
                        eprintln!("[{:?}] {}", m.level, m.text);
                    }
                }

                let _ = out.flush();
            })
            .ok();

        Self {
            handle,
            thread,
            file_path,
        }
    }

    /// Attempts to enqueue a log message without blocking the current thread.
    ///
    /// # Errors
    /// Returns [`TrySendError<LogMsg>`] when the queue is full or the worker is gone.
    pub fn try_log<S: Into<String>>(
        &self,
        level: LogLevel,
        text: S,
        target: &'static str,
    ) -> Result<(), TrySendError<LogMsg>> {
        self.handle.try_log(level, text, target)
    }

    /// Returns a cloneable handle to the logger sink.
    #[must_use]
    pub fn handle(&self) -> LoggerHandle {
        self.handle.clone()
    }

    /// Returns the path of the active log file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Closes the channel and waits for the worker to flush the file.
    ///
    /// Every handle obtained through [`handle`](Self::handle) must be dropped
    /// before calling this, otherwise the worker keeps waiting for messages.
    pub fn shutdown(self) {
        let Self { handle, thread, .. } = self;
        drop(handle);
        if let Some(t) = thread {
            let _ = t.join();
        }
    }
}

/// Locates the directory of the executable (target/{debug,release}),
/// or falls back to the current working directory on error.
fn exe_dir_fallback_cwd() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Generates a human-readable timestamp for filenames.
///
/// Output Format: `YYYYMMDD_HHMMSS` (e.g., `20261014_093045`)
fn timestamp_for_filename() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    unix_to_utc(secs).map_or_else(
        |_| format!("unix_{secs}"),
        |tm| {
            format!(
                "{:04}{:02}{:02}_{:02}{:02}{:02}",
                tm.year, tm.mon, tm.day, tm.hour, tm.min, tm.sec
            )
        },
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SimpleUtc {
    year: i32,
    mon: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
}

#[derive(Debug)]
enum UtcConvError {
    Year,
    Month,
    Day,
}

/// Converts a UNIX timestamp to a Gregorian UTC date (civil-from-days).
///
/// # Errors
///
/// Returns a [`UtcConvError`] if a computed component does not fit its type.
#[allow(clippy::many_single_char_names)]
fn unix_to_utc(mut s: u64) -> Result<SimpleUtc, UtcConvError> {
    #[allow(clippy::cast_possible_truncation)]
    let sec = (s % 60) as u32;
    s /= 60;
    #[allow(clippy::cast_possible_truncation)]
    let min = (s % 60) as u32;
    s /= 60;
    #[allow(clippy::cast_possible_truncation)]
    let hour = (s % 24) as u32;
    s /= 24;

    let z: i128 = i128::from(s) + 719_468;

    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = mp + if mp < 10 { 3 } else { -9 }; // [1, 12]

    let year_i = y + i128::from(m <= 2);

    let year = i32::try_from(year_i).map_err(|_| UtcConvError::Year)?;
    let mon = u32::try_from(m).map_err(|_| UtcConvError::Month)?;
    let day = u32::try_from(d).map_err(|_| UtcConvError::Day)?;

    Ok(SimpleUtc {
        year,
        mon,
        day,
        hour,
        min,
        sec,
    })
}
