//! Gesture Collector is a webcam tool for building hand-gesture datasets.
//!
//! The operator cycles through a fixed catalog of gestures, captures frames
//! with `c`, draws a bounding box over each capture and quits with `q`. Every
//! capture is stored as a JPEG in the dataset directory and described in
//! `annotations.json`, written when the session ends.

/// Annotation records, JSON persistence and dataset layout.
pub mod annotation;
/// Manages camera access and video frame acquisition.
pub mod camera_manager;
/// Handles configuration loading and management.
pub mod config;
/// Preview window, keyboard, region selection and image output.
pub mod display;
/// The fixed gesture catalog.
pub mod gesture;
/// Logging utilities for the application.
pub mod log;
/// The interactive capture loop.
pub mod session;
