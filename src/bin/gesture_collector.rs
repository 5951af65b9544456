//! Interactive dataset collector.
//!
//! Usage: `gesture_collector [CONFIG]`. Without an argument,
//! `gesture_collector.conf` in the working directory is used when present,
//! otherwise the built-in defaults.
//!
//! Keys in the preview window: `c` capture and draw a box, `n` next gesture,
//! `q` quit.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use gesture_collector::{
    annotation::Dataset,
    camera_manager::CameraManager,
    config::{CollectorSettings, Config},
    display::{HighGuiConsole, JpegFrameStore},
    log::{
        log_sink::LogSink,
        logger::{DEFAULT_CAPACITY, Logger},
    },
    session::{CaptureSession, ExitReason, SessionError},
    sink_error,
};

const DEFAULT_CONFIG_FILE: &str = "gesture_collector.conf";

fn load_config() -> Config {
    let args: Vec<String> = env::args().collect();

    if let Some(path) = args.get(1) {
        eprintln!("Loading configuration from {path}");
        return Config::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading config: {e}. Using defaults.");
            Config::empty()
        });
    }

    if Path::new(DEFAULT_CONFIG_FILE).is_file() {
        Config::load(DEFAULT_CONFIG_FILE).unwrap_or_else(|e| {
            eprintln!("Error loading config: {e}. Using defaults.");
            Config::empty()
        })
    } else {
        Config::empty()
    }
}

fn run(settings: &CollectorSettings, log_sink: Arc<dyn LogSink>) -> Result<(), String> {
    let dataset = Dataset::prepare(&settings.dataset_dir).map_err(|e| e.to_string())?;
    // An unavailable camera ends the session on its first read, like a dead stream.
    let camera = CameraManager::open(settings.device_id, Arc::clone(&log_sink));
    if !camera.is_open() {
        eprintln!("Camera {} could not be opened", settings.device_id);
    }
    let console = HighGuiConsole::new(
        settings.window_title.as_str(),
        settings.roi_window_title.as_str(),
        settings.key_wait_ms,
    )
    .map_err(|e| e.to_string())?;

    let session = CaptureSession::new(camera, console, JpegFrameStore::new(), dataset, log_sink);
    match session.run() {
        Ok(report) => {
            let why = match report.exit {
                ExitReason::Quit => "operator quit".to_owned(),
                ExitReason::SourceExhausted(e) => format!("camera stopped ({e})"),
            };
            eprintln!(
                "Session ended: {why}. {} images annotated in {}",
                report.captured,
                report.annotations_path.display()
            );
            Ok(())
        }
        Err(SessionError::Gui(e)) => Err(format!("display error: {e}")),
        Err(SessionError::Annotation(e)) => Err(format!("annotation error: {e}")),
    }
}

fn main() -> ExitCode {
    let settings = match CollectorSettings::from_config(&load_config()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let logger = Logger::start(&settings.log, DEFAULT_CAPACITY);
    eprintln!("Logging to {}", logger.file_path().display());

    let log_sink: Arc<dyn LogSink> = Arc::new(logger.handle());
    let result = run(&settings, Arc::clone(&log_sink));
    if let Err(e) = &result {
        sink_error!(log_sink, "{}", e);
    }
    drop(log_sink);
    logger.shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gesture_collector: {e}");
            ExitCode::FAILURE
        }
    }
}
