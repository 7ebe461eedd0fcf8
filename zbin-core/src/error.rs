//! Error types for zbin operations.
//!
//! Short reads near end-of-file are deliberately absent from this taxonomy:
//! they surface as a smaller byte count (or a zero-padded value), never as
//! an error. Bit-level operations never fail at all.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for zbin operations.
#[derive(Debug, Error)]
pub enum ZbinError {
    /// The path does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The path exists but cannot be read.
    #[error("Permission denied: {}", path.display())]
    PermissionDenied {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The path names a directory.
    #[error("Is a directory: {}", path.display())]
    IsDirectory {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Any other OS-level failure while opening.
    #[error("Failed to open {}: {source}", path.display())]
    OpenFailed {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// An operation needing an open file was called without one.
    #[error("No file is open")]
    NotOpen,

    /// The byte source failed while refilling the cache window.
    ///
    /// The requested range was known to lie inside the file, so this means
    /// the storage itself misbehaved (truncated underneath us, device error).
    #[error("Fatal I/O error refilling {len} bytes at offset {offset:#x}: {source}")]
    FatalIo {
        /// Offset the window was being anchored at.
        offset: u64,
        /// Number of bytes the refill tried to load.
        len: usize,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Repositioning the OS-level file handle failed.
    #[error("Seek to offset {offset:#x} failed: {source}")]
    SeekFailed {
        /// Target offset.
        offset: u64,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A caller-supplied argument is out of range.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// I/O error from a direct (uncached) read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for zbin operations.
pub type Result<T> = std::result::Result<T, ZbinError>;

impl ZbinError {
    /// Map an error returned while opening `path` onto the open-time taxonomy.
    pub fn from_open(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::IsADirectory => Self::IsDirectory { path },
            _ => Self::OpenFailed { path, source: err },
        }
    }

    /// Create a fatal refill error.
    pub fn fatal_io(offset: u64, len: usize, source: io::Error) -> Self {
        Self::FatalIo {
            offset,
            len,
            source,
        }
    }

    /// Create a seek failure error.
    pub fn seek_failed(offset: u64, source: io::Error) -> Self {
        Self::SeekFailed { offset, source }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this error came from the storage failing underneath a read.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalIo { .. })
    }
}
