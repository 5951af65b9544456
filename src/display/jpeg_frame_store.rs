use std::path::Path;

use opencv::{
    core::{Mat, Vector},
    imgcodecs,
};

use super::{frame_store::FrameStore, gui_error::GuiError};

/// Writes frames through `imgcodecs::imwrite`; the format follows the file
/// extension, `.jpg` for every name the session generates.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegFrameStore;

impl JpegFrameStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FrameStore<Mat> for JpegFrameStore {
    fn write_frame(&mut self, path: &Path, frame: &Mat) -> Result<(), GuiError> {
        let path_str = path.to_str().ok_or_else(|| GuiError::ImageWrite {
            path: path.to_path_buf(),
            reason: "path is not valid UTF-8".into(),
        })?;
        let params = Vector::<i32>::new();
        let written =
            imgcodecs::imwrite(path_str, frame, &params).map_err(|e| GuiError::ImageWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        if written {
            Ok(())
        } else {
            Err(GuiError::ImageWrite {
                path: path.to_path_buf(),
                reason: "encoder refused the frame".into(),
            })
        }
    }
}
