//! Unicode utilities for grapheme clusters and display width.

mod grapheme;
mod width;

pub use grapheme::graphemes;
pub use width::{WidthMethod, display_width};
