//! CLI library for testing purposes

pub mod dump;
pub mod inputs;
pub mod translate;

pub use dump::{DumpFormat, render_dump};
pub use inputs::open_backends;
pub use translate::{TranslateRequest, run_translate};
