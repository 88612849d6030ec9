//! Error types shared by the report and concatenation components

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures. Anything not listed here is absorbed by the component that
/// hit it (unreadable subdirectories, undecodable source files).
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access '{}': No such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("cannot walk '{}': Not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing output: {0}")]
    Console(#[source] io::Error),
}

impl Error {
    pub(crate) fn write(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Write { path, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
