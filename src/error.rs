use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for media-maker operations
#[derive(Error, Diagnostic, Debug)]
pub enum MediaError {
    #[error("File not found: {}", path.display())]
    #[diagnostic(code(media::not_found), help("Check the path and try again"))]
    NotFound { path: PathBuf },

    #[error("IO error with {}: {message}", path.display())]
    #[diagnostic(code(media::io))]
    Io { path: PathBuf, message: String },

    #[error("Could not decode {}: {message}", path.display())]
    #[diagnostic(code(media::decode))]
    Decode { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(media::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(media::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, MediaError>;
