//! Operator display and image output.
//!
//! [`OperatorConsole`] and [`FrameStore`] are the seams the capture session
//! talks to; [`HighGuiConsole`] and [`JpegFrameStore`] implement them with
//! `OpenCV` HighGUI and imgcodecs.
pub mod console;
pub mod frame_store;
pub mod gui_error;
pub mod highgui_console;
pub mod jpeg_frame_store;

pub use console::OperatorConsole;
pub use frame_store::FrameStore;
pub use gui_error::GuiError;
pub use highgui_console::HighGuiConsole;
pub use jpeg_frame_store::JpegFrameStore;
