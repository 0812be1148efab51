use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GystError {
    #[error("Invalid gist ID: {0:?}")]
    InvalidId(String),

    #[error("Output file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Unknown Gist or has been deleted: {0}")]
    NotFound(String),

    #[error("Failed to read credentials: {0}")]
    Credentials(String),

    #[error("HTTP error: {status} for URL: {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Nothing to publish: {}", empty_input(.from_stdin))]
    NothingToPublish { from_stdin: bool },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
}

fn empty_input(from_stdin: &bool) -> &'static str {
    if *from_stdin {
        "standard input was empty"
    } else {
        "every input file was empty"
    }
}
