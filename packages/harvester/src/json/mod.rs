//! JSON output generation for country files.

mod writer;

pub use writer::{generate_json, FileNaming, JsonOutput};
