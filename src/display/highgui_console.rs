use opencv::{
    core::{Mat, Point, Rect, Scalar},
    highgui, imgproc,
    prelude::*,
};

use crate::annotation::BoundingBox;

use super::{console::OperatorConsole, gui_error::GuiError};

/// Position of the gesture overlay, top-left of the text baseline.
const OVERLAY_ORIGIN: (i32, i32) = (10, 30);
const OVERLAY_SCALE: f64 = 1.0;
const OVERLAY_THICKNESS: i32 = 2;

/// `OpenCV` HighGUI implementation of [`OperatorConsole`].
pub struct HighGuiConsole {
    window_title: String,
    roi_window_title: String,
    key_wait_ms: i32,
}

impl HighGuiConsole {
    /// Creates the main preview window.
    ///
    /// # Errors
    /// Returns [`GuiError::Render`] if the window cannot be created.
    pub fn new(
        window_title: impl Into<String>,
        roi_window_title: impl Into<String>,
        key_wait_ms: i32,
    ) -> Result<Self, GuiError> {
        let window_title = window_title.into();
        highgui::named_window(&window_title, highgui::WINDOW_AUTOSIZE)
            .map_err(|e| GuiError::render(&window_title, &e))?;
        Ok(Self {
            window_title,
            roi_window_title: roi_window_title.into(),
            key_wait_ms: key_wait_ms.max(1),
        })
    }

    fn draw_overlay(canvas: &mut Mat, gesture: &str) -> opencv::Result<()> {
        imgproc::put_text(
            canvas,
            &format!("Gesture: {gesture}"),
            Point::new(OVERLAY_ORIGIN.0, OVERLAY_ORIGIN.1),
            imgproc::FONT_HERSHEY_SIMPLEX,
            OVERLAY_SCALE,
            // BGR green
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            OVERLAY_THICKNESS,
            imgproc::LINE_8,
            false,
        )
    }
}

fn rect_to_bbox(r: Rect) -> BoundingBox {
    BoundingBox::new(r.x, r.y, r.width, r.height)
}

impl OperatorConsole<Mat> for HighGuiConsole {
    fn show(&mut self, frame: &Mat, gesture: &str) -> Result<(), GuiError> {
        let mut canvas = frame
            .try_clone()
            .map_err(|e| GuiError::render(&self.window_title, &e))?;
        Self::draw_overlay(&mut canvas, gesture)
            .map_err(|e| GuiError::render(&self.window_title, &e))?;
        highgui::imshow(&self.window_title, &canvas)
            .map_err(|e| GuiError::render(&self.window_title, &e))
    }

    fn poll_key(&mut self) -> Result<i32, GuiError> {
        highgui::wait_key(self.key_wait_ms).map_err(|e| GuiError::KeyPoll(e.to_string()))
    }

    fn select_region(&mut self, frame: &Mat) -> Result<BoundingBox, GuiError> {
        // Crosshair on, drawn from the corner, usage notice printed on stdout.
        let rect = highgui::select_roi(&self.roi_window_title, frame, true, false, true)
            .map_err(|e| GuiError::RegionSelection(e.to_string()))?;
        let _ = highgui::destroy_window(&self.roi_window_title);
        Ok(rect_to_bbox(rect))
    }

    fn close_all(&mut self) {
        let _ = highgui::destroy_all_windows();
    }
}
