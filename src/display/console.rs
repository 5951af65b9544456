use crate::annotation::BoundingBox;

use super::gui_error::GuiError;

/// Operator-facing window: live preview, keyboard and region selection.
pub trait OperatorConsole<F> {
    /// Shows `frame` with `Gesture: <gesture>` drawn over it. The frame itself
    /// is left untouched.
    ///
    /// # Errors
    /// Returns [`GuiError::Render`] when the window cannot be updated.
    fn show(&mut self, frame: &F, gesture: &str) -> Result<(), GuiError>;

    /// Waits briefly for a keystroke and returns the raw key code, or a
    /// negative value when no key was pressed.
    ///
    /// # Errors
    /// Returns [`GuiError::KeyPoll`] when the event loop fails.
    fn poll_key(&mut self) -> Result<i32, GuiError>;

    /// Lets the operator draw a rectangle over `frame`. Blocks until the
    /// selection is confirmed or cancelled; a cancelled selection yields
    /// whatever box the window reports, usually all zeros.
    ///
    /// # Errors
    /// Returns [`GuiError::RegionSelection`] when the selection window fails.
    fn select_region(&mut self, frame: &F) -> Result<BoundingBox, GuiError>;

    /// Closes every window opened by this console.
    fn close_all(&mut self);
}
