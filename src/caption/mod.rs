//! Caption text for the info bar.

pub mod layout;

pub use layout::{format_datetime, layout, layout_with_style};
