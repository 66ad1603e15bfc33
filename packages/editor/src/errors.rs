//! Error types for the editor

use std::path::PathBuf;
use thiserror::Error;

use confix_parser::ParseError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Could not read '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse '{}': {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write value at '{path}'")]
    InvalidTarget { path: String },
}
