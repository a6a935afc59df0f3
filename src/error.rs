//! Error taxonomy shared by the loaders, the high-score store and the session.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Chart, lyric or high-score file is absent. Callers absorb this with an
    /// empty dataset.
    #[error("resource not found: {}", path.display())]
    ResourceMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A numeric field or record layout could not be parsed.
    #[error("malformed data in {} (line {line}): {reason}", path.display())]
    MalformedData {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("playback device error: {0}")]
    Playback(String),

    /// Level listed in the catalog without a finished chart.
    #[error("level {0:?} is not available yet")]
    LevelUnavailable(String),
}

impl EngineError {
    /// Maps a read failure to `ResourceMissing` when the file does not exist.
    pub fn from_read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            EngineError::ResourceMissing {
                path: path.to_path_buf(),
                source,
            }
        } else {
            EngineError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        EngineError::MalformedData {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, EngineError::ResourceMissing { .. })
    }
}

/// Reads a whole text file, classifying the failure.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| EngineError::from_read(path, e))
}
