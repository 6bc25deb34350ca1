//! Error types for the uploader
//!
//! Every variant is fatal: the binary prints it and exits with status 1.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required flag was absent or left at its zero value. Holds the
    /// flag name without dashes.
    #[error("--{0} is required")]
    MissingArgument(&'static str),

    #[error("File does not exist at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error opening file {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error initializing bot: {0}")]
    AuthInit(String),

    #[error("Error sending file: {0}")]
    RemoteSend(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Whether the usage text should follow the message.
    pub fn wants_usage(&self) -> bool {
        matches!(self, Error::MissingArgument(_))
    }
}
