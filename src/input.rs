//! Input stream selection.

use std::fs::File;
use std::io::{self, Read, StdinLock};
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, StripError};

/// Where the bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A regular file.
    File(PathBuf),
}

impl InputSource {
    /// Standard input when no path is given.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(path),
            None => Self::Stdin,
        }
    }

    /// Open the input. Directories and special files are rejected.
    pub fn open(&self) -> Result<Input> {
        match self {
            Self::Stdin => Ok(Input::Stdin(io::stdin().lock())),
            Self::File(path) => {
                let metadata =
                    std::fs::metadata(path).map_err(|source| StripError::InputNotFound {
                        path: path.clone(),
                        source,
                    })?;

                if !metadata.is_file() {
                    return Err(StripError::NotAFile(path.clone()));
                }

                let file = File::open(path).map_err(|source| StripError::OpenInput {
                    path: path.clone(),
                    source,
                })?;

                debug!(path = %path.display(), len = metadata.len(), "input file opened");
                Ok(Input::File(file))
            }
        }
    }
}

/// An opened input stream.
#[derive(Debug)]
pub enum Input {
    /// Locked standard input.
    Stdin(StdinLock<'static>),
    /// Open file.
    File(File),
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Stdin(r) => r.read(buf),
            Self::File(r) => r.read(buf),
        }
    }
}
