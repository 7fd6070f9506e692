//! Photo-level orchestration: overlays, placement and output.

pub mod compositor;
pub mod output;

pub use compositor::{Overlays, StampCompositor, StampServices, caption_runs, compose};
pub use output::{default_output_path, write_atomic};
