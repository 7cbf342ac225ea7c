//! Geometric transforms: rotation and flip.
//!
//! # Coordinate System
//!
//! - Rotation angles are quarter turns in degrees, counter-clockwise
//! - Origin is top-left corner, y grows downward
//! - Rotation resizes the canvas to the rotated bounds, so 90 and 270 swap the sides

mod flip;
mod rotation;

pub use flip::{apply_flip, FlipAxis};
pub(crate) use rotation::sample_bilinear;
pub use rotation::{compute_rotated_bounds, rotate, RotationAngle};
