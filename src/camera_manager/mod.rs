//! Camera access through `OpenCV`, behind the [`FrameSource`] trait.
pub mod camera_error;
#[allow(clippy::module_inception)]
pub mod camera_manager;
pub mod frame_source;

pub use camera_error::CameraError;
pub use camera_manager::CameraManager;
pub use frame_source::FrameSource;
