use std::path::PathBuf;

use opencv::Error as CvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("Failed to render window {window:?}: {reason}")]
    Render { window: String, reason: String },
    #[error("Failed to poll keyboard: {0}")]
    KeyPoll(String),
    #[error("Region selection failed: {0}")]
    RegionSelection(String),
    #[error("Failed to write image {path}: {reason}")]
    ImageWrite { path: PathBuf, reason: String },
}

impl GuiError {
    pub(crate) fn render(window: &str, e: &CvError) -> Self {
        Self::Render {
            window: window.to_owned(),
            reason: e.to_string(),
        }
    }
}
