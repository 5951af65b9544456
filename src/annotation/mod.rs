//! Annotation records and the on-disk dataset layout.
pub mod annotation_error;
pub mod annotation_set;
pub mod bounding_box;
pub mod dataset;

pub use annotation_error::AnnotationError;
pub use annotation_set::{Annotation, AnnotationSet};
pub use bounding_box::BoundingBox;
pub use dataset::{ANNOTATIONS_FILE, Dataset};
