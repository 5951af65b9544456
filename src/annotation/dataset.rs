use std::fs;
use std::path::{Path, PathBuf};

use super::annotation_error::AnnotationError;

/// Name of the annotation file written inside the dataset directory.
pub const ANNOTATIONS_FILE: &str = "annotations.json";

/// Dataset directory holding captured images and `annotations.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    root: PathBuf,
}

impl Dataset {
    /// Uses `root` as dataset directory, creating it (and parents) if absent.
    ///
    /// # Errors
    /// Returns [`AnnotationError::Io`] when the directory cannot be created.
    pub fn prepare(root: impl Into<PathBuf>) -> Result<Self, AnnotationError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| AnnotationError::io(&root, e))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn image_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    #[must_use]
    pub fn annotations_path(&self) -> PathBuf {
        self.root.join(ANNOTATIONS_FILE)
    }
}
