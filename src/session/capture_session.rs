use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    annotation::Dataset,
    camera_manager::{CameraError, FrameSource},
    display::{FrameStore, OperatorConsole},
    log::log_sink::LogSink,
};
use crate::{sink_debug, sink_error, sink_info, sink_warn};

use super::{command::Command, session_error::SessionError, session_state::SessionState};

/// Why the capture loop stopped.
#[derive(Debug)]
pub enum ExitReason {
    /// The operator pressed the quit key.
    Quit,
    /// The frame source failed; the stream is considered exhausted.
    SourceExhausted(CameraError),
}

/// Outcome of a session that ended without an error.
#[derive(Debug)]
pub struct SessionReport {
    pub exit: ExitReason,
    /// Number of annotated images written.
    pub captured: usize,
    pub annotations_path: PathBuf,
}

/// Interactive loop that turns operator keystrokes into labeled images.
///
/// Each iteration reads one frame, previews it with the active gesture,
/// polls one key and dispatches it. However the loop ends, [`run`](Self::run)
/// releases the source, closes the console and writes `annotations.json`.
pub struct CaptureSession<S, C, W> {
    source: S,
    console: C,
    store: W,
    dataset: Dataset,
    state: SessionState,
    log_sink: Arc<dyn LogSink>,
}

impl<S, C, W> CaptureSession<S, C, W>
where
    S: FrameSource,
    C: OperatorConsole<S::Frame>,
    W: FrameStore<S::Frame>,
{
    pub fn new(
        source: S,
        console: C,
        store: W,
        dataset: Dataset,
        log_sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            source,
            console,
            store,
            dataset,
            state: SessionState::new(),
            log_sink,
        }
    }

    /// Runs until the operator quits or the source runs dry.
    ///
    /// # Errors
    /// Returns [`SessionError::Gui`] when previewing, polling, writing an
    /// image or selecting a region fails, and [`SessionError::Annotation`]
    /// when `annotations.json` cannot be written. Cleanup and the annotation
    /// save are attempted before any error is returned.
    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        sink_info!(
            self.log_sink,
            "[SESSION] started, dataset at {}, gesture {}",
            self.dataset.root().display(),
            self.state.current_gesture()
        );

        let outcome = self.drive();

        self.source.release();
        self.console.close_all();

        let annotations_path = self.dataset.annotations_path();
        let saved = self.state.annotations().save(&annotations_path);
        match &saved {
            Ok(()) => sink_info!(
                self.log_sink,
                "[SESSION] wrote {} annotations to {}",
                self.state.annotations().len(),
                annotations_path.display()
            ),
            Err(e) => sink_error!(self.log_sink, "[SESSION] saving annotations failed: {}", e),
        }

        let exit = outcome.inspect_err(|e| {
            sink_error!(self.log_sink, "[SESSION] aborted: {}", e);
        })?;
        saved?;

        Ok(SessionReport {
            exit,
            captured: self.state.annotations().len(),
            annotations_path,
        })
    }

    fn drive(&mut self) -> Result<ExitReason, SessionError> {
        loop {
            let frame = match self.source.read_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    sink_warn!(self.log_sink, "[SESSION] frame source ended: {}", e);
                    return Ok(ExitReason::SourceExhausted(e));
                }
            };

            self.console.show(&frame, self.state.current_gesture())?;

            match Command::from_key(self.console.poll_key()?) {
                Some(Command::Capture) => self.capture(&frame)?,
                Some(Command::NextGesture) => {
                    self.state.advance_gesture();
                    sink_info!(
                        self.log_sink,
                        "[SESSION] gesture is now {}",
                        self.state.current_gesture()
                    );
                }
                Some(Command::Quit) => {
                    sink_debug!(self.log_sink, "[SESSION] quit requested");
                    return Ok(ExitReason::Quit);
                }
                None => {}
            }
        }
    }

    fn capture(&mut self, frame: &S::Frame) -> Result<(), SessionError> {
        let file_name = self.state.next_frame_name();
        let path = self.dataset.image_path(&file_name);
        self.store.write_frame(&path, frame)?;

        let bbox = match self.console.select_region(frame) {
            Ok(bbox) => bbox,
            Err(e) => {
                // Keep the image set in sync with the annotations.
                if let Err(rm) = fs::remove_file(&path) {
                    sink_warn!(
                        self.log_sink,
                        "[SESSION] {} left on disk without annotation: {}",
                        path.display(),
                        rm
                    );
                }
                return Err(e.into());
            }
        };

        if bbox.is_degenerate() {
            sink_warn!(
                self.log_sink,
                "[SESSION] {} has an empty bounding box {:?}, recorded as is",
                file_name,
                <[i32; 4]>::from(bbox)
            );
        }
        sink_info!(
            self.log_sink,
            "[SESSION] captured {} bbox={:?}",
            file_name,
            <[i32; 4]>::from(bbox)
        );

        self.state.record_capture(file_name, bbox);
        Ok(())
    }
}
