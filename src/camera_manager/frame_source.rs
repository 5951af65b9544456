use super::camera_error::CameraError;

/// A stream of frames the capture session pulls from, one per iteration.
///
/// Any `Err` from [`read_frame`](Self::read_frame) ends the session: the
/// stream is treated as exhausted and never retried.
pub trait FrameSource {
    type Frame;

    /// Blocks until the next frame is available.
    ///
    /// # Errors
    /// Returns a [`CameraError`] at end of stream or on device failure.
    fn read_frame(&mut self) -> Result<Self::Frame, CameraError>;

    /// Releases the underlying device. Calling it again is a no-op.
    fn release(&mut self);
}
