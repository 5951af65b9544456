use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{annotation_error::AnnotationError, bounding_box::BoundingBox};

/// Label and box recorded for one captured image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub gesture: String,
    pub bbox: BoundingBox,
}

/// Mapping from image filename to its [`Annotation`].
///
/// Serialized as a JSON object keyed by filename. Keys are kept sorted so the
/// written file is stable across runs with the same captures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet {
    entries: BTreeMap<String, Annotation>,
}

impl AnnotationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `annotation` under `file_name`, returning any entry it replaced.
    pub fn insert(
        &mut self,
        file_name: impl Into<String>,
        annotation: Annotation,
    ) -> Option<Annotation> {
        self.entries.insert(file_name.into(), annotation)
    }

    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<&Annotation> {
        self.entries.get(file_name)
    }

    #[must_use]
    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Writes the set as JSON to `path`, replacing an existing file.
    ///
    /// # Errors
    /// Returns [`AnnotationError`] if the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<(), AnnotationError> {
        let file = File::create(path).map_err(|e| AnnotationError::io(path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer(&mut out, self).map_err(|e| AnnotationError::json(path, e))?;
        out.flush().map_err(|e| AnnotationError::io(path, e))
    }

    /// Reads a set previously written by [`save`](Self::save).
    ///
    /// # Errors
    /// Returns [`AnnotationError`] if the file is missing or not valid JSON
    /// of the expected shape.
    pub fn load(path: &Path) -> Result<Self, AnnotationError> {
        let file = File::open(path).map_err(|e| AnnotationError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| AnnotationError::json(path, e))
    }
}
