use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced while rendering a tree.
///
/// `DirectoryRead` is reported in place through the sink and never aborts a
/// render. `NotADirectory` is only returned for the root. `Output` means the
/// sink itself could not be written and stops the walk.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl TreeError {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    /// True when the output stream was closed by the reader (e.g. `| head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }
}
