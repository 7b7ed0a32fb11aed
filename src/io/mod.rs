//! Reading form definitions and writing results in JSON, YAML or TOML.

mod format;
pub mod input;
pub mod output;

pub use format::DocumentFormat;
pub use input::{parse_document_any, parse_document_str};
pub use output::{OutputDestination, OutputOptions, emit, emit_text};
