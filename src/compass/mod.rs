//! Heading compass overlay.

pub mod renderer;

pub use renderer::{CompassFace, CompassRenderer, arrow_marker, face_rotation, triangle_marker};
