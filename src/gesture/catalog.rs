/// Number of gesture categories.
pub const GESTURE_COUNT: usize = 5;

/// Gesture labels in selection order. Index 0 is active at startup.
pub const GESTURES: [&str; GESTURE_COUNT] = [
    "thumbs_up",
    "open_palm",
    "closed_fist",
    "peace_sign",
    "pointing_finger",
];

/// Returns the label at `index`, wrapping out-of-range indices.
#[must_use]
pub const fn name(index: usize) -> &'static str {
    GESTURES[index % GESTURE_COUNT]
}

/// Index selected after `index` when the operator asks for the next gesture.
#[must_use]
pub const fn next_index(index: usize) -> usize {
    (index + 1) % GESTURE_COUNT
}

/// Whether `label` is one of the catalog names.
#[must_use]
pub fn is_known(label: &str) -> bool {
    GESTURES.contains(&label)
}
