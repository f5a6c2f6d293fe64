// Input stage: file loading, schema validation and the no-AI text parser.

pub mod heuristic;
pub mod loader;

pub use loader::{ensure_exists, load_base_data, load_job_inputs, Source};
