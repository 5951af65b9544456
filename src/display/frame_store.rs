use std::path::Path;

use super::gui_error::GuiError;

/// Persists captured frames as image files.
pub trait FrameStore<F> {
    /// Writes `frame` to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Returns [`GuiError::ImageWrite`] when encoding or writing fails.
    fn write_frame(&mut self, path: &Path, frame: &F) -> Result<(), GuiError>;
}
