//! The capture session: operator commands, session state and the main loop.
pub mod capture_session;
pub mod command;
pub mod session_error;
pub mod session_state;

pub use capture_session::{CaptureSession, ExitReason, SessionReport};
pub use command::Command;
pub use session_error::SessionError;
pub use session_state::SessionState;
