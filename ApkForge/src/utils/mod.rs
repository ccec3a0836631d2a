//! Utility functions

pub mod archive;
pub mod path;

pub use archive::{extract_archive, strip_entries};
pub use path::{file_stem_string, scratch_dir_beside};
