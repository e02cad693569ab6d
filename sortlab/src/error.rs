//! Error taxonomy for the sorting engine.
//!
//! Generation and configuration errors are surfaced synchronously to the
//! caller before any worker thread starts. Cancellation observed inside a
//! worker is a normal terminal state transition, not an error, and never
//! appears here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced by the sorting engine.
#[derive(Debug)]
pub enum Error {
    /// A dataset was requested with a size of zero.
    InvalidSize {
        /// The rejected size.
        n: usize,
    },

    /// A run was started without selecting an algorithm first.
    NoAlgorithmSelected,

    /// An imported file contained no usable numeric cells.
    EmptyImport {
        /// The file that was imported.
        path: PathBuf,
    },

    /// An imported file could not be read.
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { n } => {
                write!(f, "invalid dataset size {n}: must be at least 1")
            }
            Self::NoAlgorithmSelected => {
                write!(f, "no sorting algorithm selected")
            }
            Self::EmptyImport { path } => {
                write!(f, "no numeric values found in {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_size() {
        let msg = format!("{}", Error::InvalidSize { n: 0 });
        assert!(msg.contains('0'));
    }

    #[test]
    fn display_names_the_import_path() {
        let err = Error::EmptyImport {
            path: PathBuf::from("data/empty.csv"),
        };
        assert!(format!("{err}").contains("empty.csv"));
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error as _;

        let err = Error::Io {
            path: PathBuf::from("missing.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.source().is_some());
        assert!(Error::NoAlgorithmSelected.source().is_none());
    }
}
