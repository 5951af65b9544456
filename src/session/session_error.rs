use thiserror::Error;

use crate::{annotation::AnnotationError, display::GuiError};

/// Failure that aborts a capture session.
///
/// Camera read failures are not errors: they end the session normally and
/// show up as [`ExitReason::SourceExhausted`](super::ExitReason::SourceExhausted).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Gui(#[from] GuiError),
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
}
