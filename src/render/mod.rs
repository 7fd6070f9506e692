pub mod canvas;
pub mod composite;
pub mod text;

pub use canvas::{Canvas, round_corners, rounded_rect_coverage};
pub use composite::{apply_coverage, blit_over, copy_into, multiply_opacity, over};
pub use text::{TextAnchor, TextRun, TextStyle, render_text};
