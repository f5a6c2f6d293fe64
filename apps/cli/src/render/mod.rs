// Document rendering: data → block list → PDF bytes.
// Rendering is pure; the same input always produces the same bytes.

pub mod cover_letter;
pub mod pdf;
pub mod resume;
pub mod template;

pub use cover_letter::{render_cover_letter, CoverLetter};
pub use resume::render_resume;
