/// Key that captures and annotates the current frame.
pub const CAPTURE_KEY: u8 = b'c';
/// Key that selects the next gesture.
pub const NEXT_GESTURE_KEY: u8 = b'n';
/// Key that ends the session.
pub const QUIT_KEY: u8 = b'q';

/// Operator command decoded from a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Capture,
    NextGesture,
    Quit,
}

impl Command {
    /// Decodes a raw HighGUI key code. Only the low byte is significant;
    /// negative codes mean no key was pressed.
    #[must_use]
    pub fn from_key(code: i32) -> Option<Self> {
        if code < 0 {
            return None;
        }
        match code.to_le_bytes()[0] {
            CAPTURE_KEY => Some(Self::Capture),
            NEXT_GESTURE_KEY => Some(Self::NextGesture),
            QUIT_KEY => Some(Self::Quit),
            _ => None,
        }
    }
}
