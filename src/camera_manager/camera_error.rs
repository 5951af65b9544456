use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("Camera initialization failed: {0}")]
    InitializationFailed(String),
    #[error("Failed to open camera with device_id: {0}")]
    OpenFailed(usize),
    #[error("Failed to capture frame: {0}")]
    CaptureFailed(String),
    #[error("No valid frame available")]
    NotFrame,
    #[error("Camera not initialized")]
    CameraOff,
    #[error("Invalid Device ID: {0}")]
    InvalidDeviceId(usize),
}
