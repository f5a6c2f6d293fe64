// Text layout primitives for the PDF renderer: glyph widths and line wrapping.

pub mod font_metrics;
pub mod wrap;

pub use font_metrics::{get_metrics, FontFace};
pub use wrap::wrap_lines;
