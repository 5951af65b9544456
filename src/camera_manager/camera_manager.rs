//! Camera manager module using `OpenCV`.
//!
//! Wraps `OpenCV's` `VideoCapture` for the capture session: opens the device
//! once, hands out raw BGR frames and releases the device exactly once, either
//! explicitly through [`FrameSource::release`] or when dropped.

use opencv::{
    core,
    prelude::*,
    videoio::{self, VideoCapture, VideoCaptureTrait, VideoCaptureTraitConst},
};

use std::sync::Arc;

use crate::log::log_sink::LogSink;
use crate::{sink_debug, sink_info, sink_warn};

use super::{camera_error::CameraError, frame_source::FrameSource};

/// Manages a single camera device.
pub struct CameraManager {
    cam: Option<VideoCapture>,
    device_id: usize,
    logger: Arc<dyn LogSink>,
}

impl CameraManager {
    /// Opens the camera with the given device index (0 is the system default).
    ///
    /// # Errors
    ///
    /// Returns `CameraError::InvalidDeviceId` if the index does not fit an `i32`,
    /// `CameraError::InitializationFailed` if `OpenCV` fails to create the
    /// capture object or query its size, and `CameraError::OpenFailed` if the
    /// device cannot be opened.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let camera = CameraManager::new(0, Arc::new(NoopLogSink))?;
    /// # Ok::<(), CameraError>(())
    /// ```
    pub fn new(device_id: usize, logger: Arc<dyn LogSink>) -> Result<Self, CameraError> {
        let device_id_i32 =
            i32::try_from(device_id).map_err(|_| CameraError::InvalidDeviceId(device_id))?;
        let cam = videoio::VideoCapture::new(device_id_i32, videoio::CAP_ANY)
            .map_err(|e| CameraError::InitializationFailed(e.to_string()))?;

        if !cam.is_opened().unwrap_or(false) {
            return Err(CameraError::OpenFailed(device_id));
        }

        let width = cam
            .get(videoio::CAP_PROP_FRAME_WIDTH)
            .map_err(|e| CameraError::InitializationFailed(e.to_string()))?;
        let height = cam
            .get(videoio::CAP_PROP_FRAME_HEIGHT)
            .map_err(|e| CameraError::InitializationFailed(e.to_string()))?;

        sink_info!(
            logger,
            "[CAMERA] opened device {} at {}x{}",
            device_id,
            width,
            height
        );

        Ok(Self {
            cam: Some(cam),
            device_id,
            logger,
        })
    }

    /// Like [`new`](Self::new), but a device that cannot be opened yields a
    /// closed manager whose first read reports `CameraError::CameraOff`.
    ///
    /// The session then ends on its first frame like any exhausted stream.
    #[must_use]
    pub fn open(device_id: usize, logger: Arc<dyn LogSink>) -> Self {
        match Self::new(device_id, Arc::clone(&logger)) {
            Ok(manager) => manager,
            Err(e) => {
                sink_warn!(logger, "[CAMERA] device {} unavailable: {}", device_id, e);
                Self {
                    cam: None,
                    device_id,
                    logger,
                }
            }
        }
    }

    /// Whether the device is open and not yet released.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.cam.is_some()
    }

    /// Captures a single frame from the camera.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::CaptureFailed` if `OpenCV` reports a read error,
    /// `CameraError::NotFrame` if the device returned no image, and
    /// `CameraError::CameraOff` if the camera was never opened or has been released.
    pub fn get_frame(&mut self) -> Result<core::Mat, CameraError> {
        let Some(cam) = &mut self.cam else {
            return Err(CameraError::CameraOff);
        };
        let mut frame = core::Mat::default();
        let grabbed = cam
            .read(&mut frame)
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
        if grabbed && !frame.empty() {
            Ok(frame)
        } else {
            Err(CameraError::NotFrame)
        }
    }
}

impl FrameSource for CameraManager {
    type Frame = core::Mat;

    fn read_frame(&mut self) -> Result<core::Mat, CameraError> {
        self.get_frame()
    }

    fn release(&mut self) {
        if let Some(mut cam) = self.cam.take() {
            if let Err(e) = cam.release() {
                sink_warn!(
                    self.logger,
                    "[CAMERA] release of device {} failed: {}",
                    self.device_id,
                    e
                );
            } else {
                sink_debug!(self.logger, "[CAMERA] released device {}", self.device_id);
            }
        }
    }
}

impl Drop for CameraManager {
    /// Releases the camera if the session did not already do it.
    fn drop(&mut self) {
        self.release();
    }
}
