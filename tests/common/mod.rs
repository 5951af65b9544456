//! Scripted stand-ins for the camera, the HighGUI console and the JPEG store.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use gesture_collector::{
    annotation::{BoundingBox, Dataset},
    camera_manager::{CameraError, FrameSource},
    display::{FrameStore, GuiError, OperatorConsole},
    log::{NoopLogSink, log_level::LogLevel, log_sink::LogSink},
    session::CaptureSession,
};

/// Frames are just sequence numbers.
pub type Frame = u32;

pub const KEY_CAPTURE: i32 = b'c' as i32;
pub const KEY_NEXT: i32 = b'n' as i32;
pub const KEY_QUIT: i32 = b'q' as i32;
pub const NO_KEY: i32 = -1;

/// Everything the fakes observed, shared with the test after `run` consumed them.
#[derive(Debug, Default)]
pub struct Tally {
    pub reads: u32,
    pub releases: u32,
    pub closes: u32,
    pub shown: Vec<(Frame, String)>,
    pub roi_frames: Vec<Frame>,
    pub written: Vec<PathBuf>,
}

pub type SharedTally = Rc<RefCell<Tally>>;

pub struct ScriptedSource {
    remaining: u32,
    next: Frame,
    opened: bool,
    tally: SharedTally,
}

impl ScriptedSource {
    /// Yields `frames` frames, then reports the stream as exhausted.
    pub fn new(frames: u32, tally: SharedTally) -> Self {
        Self {
            remaining: frames,
            next: 0,
            opened: true,
            tally,
        }
    }

    /// A device that failed to open, as `CameraManager::open` reports it.
    pub fn never_opened(tally: SharedTally) -> Self {
        Self {
            opened: false,
            ..Self::new(0, tally)
        }
    }
}

impl FrameSource for ScriptedSource {
    type Frame = Frame;

    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        self.tally.borrow_mut().reads += 1;
        if !self.opened {
            return Err(CameraError::CameraOff);
        }
        if self.remaining == 0 {
            return Err(CameraError::NotFrame);
        }
        self.remaining -= 1;
        let frame = self.next;
        self.next += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        self.tally.borrow_mut().releases += 1;
    }
}

pub struct ScriptedConsole {
    keys: VecDeque<i32>,
    regions: VecDeque<Result<BoundingBox, GuiError>>,
    fail_show_on: Option<Frame>,
    tally: SharedTally,
}

impl ScriptedConsole {
    pub fn new(keys: &[i32], tally: SharedTally) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            regions: VecDeque::new(),
            fail_show_on: None,
            tally,
        }
    }

    /// Boxes returned by successive selections; all-zero once exhausted.
    pub fn with_regions(mut self, regions: Vec<Result<BoundingBox, GuiError>>) -> Self {
        self.regions = regions.into();
        self
    }

    pub fn failing_show_on(mut self, frame: Frame) -> Self {
        self.fail_show_on = Some(frame);
        self
    }
}

impl OperatorConsole<Frame> for ScriptedConsole {
    fn show(&mut self, frame: &Frame, gesture: &str) -> Result<(), GuiError> {
        if self.fail_show_on == Some(*frame) {
            return Err(GuiError::Render {
                window: "Data Collection".into(),
                reason: "display lost".into(),
            });
        }
        self.tally
            .borrow_mut()
            .shown
            .push((*frame, gesture.to_owned()));
        Ok(())
    }

    fn poll_key(&mut self) -> Result<i32, GuiError> {
        Ok(self.keys.pop_front().unwrap_or(NO_KEY))
    }

    fn select_region(&mut self, frame: &Frame) -> Result<BoundingBox, GuiError> {
        self.tally.borrow_mut().roi_frames.push(*frame);
        self.regions
            .pop_front()
            .unwrap_or(Ok(BoundingBox::default()))
    }

    fn close_all(&mut self) {
        self.tally.borrow_mut().closes += 1;
    }
}

/// Writes the frame number as file content.
pub struct DiskStore {
    fail_on: Option<String>,
    touch_disk: bool,
    tally: SharedTally,
}

impl DiskStore {
    pub fn new(tally: SharedTally) -> Self {
        Self {
            fail_on: None,
            touch_disk: true,
            tally,
        }
    }

    /// Reports success without creating any file.
    pub fn without_files(tally: SharedTally) -> Self {
        Self {
            touch_disk: false,
            ..Self::new(tally)
        }
    }

    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.fail_on = Some(file_name.to_owned());
        self
    }
}

impl FrameStore<Frame> for DiskStore {
    fn write_frame(&mut self, path: &Path, frame: &Frame) -> Result<(), GuiError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if self.fail_on.as_deref() == Some(name) {
            return Err(GuiError::ImageWrite {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            });
        }
        if self.touch_disk {
            fs::write(path, frame.to_string()).map_err(|e| GuiError::ImageWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        self.tally.borrow_mut().written.push(path.to_path_buf());
        Ok(())
    }
}

pub fn tally() -> SharedTally {
    Rc::new(RefCell::new(Tally::default()))
}

/// Keeps every record for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub records: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .expect("sink lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, level: LogLevel, msg: &str, _target: &'static str) {
        self.records
            .lock()
            .expect("sink lock")
            .push((level, msg.to_owned()));
    }
}

pub fn session(
    source: ScriptedSource,
    console: ScriptedConsole,
    store: DiskStore,
    root: &Path,
) -> CaptureSession<ScriptedSource, ScriptedConsole, DiskStore> {
    session_logging_to(source, console, store, root, Arc::new(NoopLogSink))
}

pub fn session_logging_to(
    source: ScriptedSource,
    console: ScriptedConsole,
    store: DiskStore,
    root: &Path,
    log_sink: Arc<dyn LogSink>,
) -> CaptureSession<ScriptedSource, ScriptedConsole, DiskStore> {
    let dataset = Dataset::prepare(root).expect("dataset dir");
    CaptureSession::new(source, console, store, dataset, log_sink)
}

/// Names of the `.jpg` files present in `dir`.
pub fn images_in(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .expect("read dataset dir")
        .filter_map(Result::ok)
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| n.ends_with(".jpg"))
        .collect()
}
