use crate::{
    annotation::{Annotation, AnnotationSet, BoundingBox},
    gesture,
};

/// Mutable state of one capture session, owned by the loop.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    gesture_index: usize,
    frame_count: u32,
    annotations: AnnotationSet,
}

impl SessionState {
    /// Starts at the first gesture with no captures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn gesture_index(&self) -> usize {
        self.gesture_index
    }

    #[must_use]
    pub const fn current_gesture(&self) -> &'static str {
        gesture::name(self.gesture_index)
    }

    #[must_use]
    pub const fn frame_count(&self) -> u32 {
        self.frame_count
    }

    #[must_use]
    pub const fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// Name for the next capture, `<gesture>_<counter>.jpg`.
    ///
    /// After cycling back to a gesture the counter starts at 0 again, so names
    /// already recorded in this session are skipped by advancing the counter.
    pub fn next_frame_name(&mut self) -> String {
        loop {
            let name = frame_file_name(self.current_gesture(), self.frame_count);
            if !self.annotations.contains(&name) {
                return name;
            }
            self.frame_count += 1;
        }
    }

    /// Records the annotation for a written image and bumps the counter.
    pub fn record_capture(&mut self, file_name: impl Into<String>, bbox: BoundingBox) {
        self.annotations.insert(
            file_name,
            Annotation {
                gesture: self.current_gesture().to_owned(),
                bbox,
            },
        );
        self.frame_count += 1;
    }

    /// Selects the next gesture in the catalog and resets the counter.
    pub fn advance_gesture(&mut self) {
        self.gesture_index = gesture::next_index(self.gesture_index);
        self.frame_count = 0;
    }
}

/// File name of the `index`-th capture of `gesture`.
#[must_use]
pub fn frame_file_name(gesture: &str, index: u32) -> String {
    format!("{gesture}_{index}.jpg")
}
