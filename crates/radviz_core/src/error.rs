use std::io;
use std::path::{Path, PathBuf};

use crate::expr::ExprError;
use crate::model::FunctionKind;

/// Errors raised while loading solver output from the file system
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("data path '{}' does not exist; consider executing 'rad_msol'", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is truncated: expected {expected} bytes, found {actual}", path.display())]
    Truncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {what} size: expected {expected}, found {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },

    #[error("invalid function specification in '{}': {source}", path.display())]
    Specification {
        path: PathBuf,
        #[source]
        source: SpecError,
    },

    #[error("no save directories match '{pattern}'")]
    NoSaveDirectories { pattern: String },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("{what} index {index} is out of range for length {len}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

impl LoadError {
    /// Wrap an I/O error, reporting missing files with a remediation hint
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn size_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        LoadError::ShapeMismatch {
            what,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Errors in the textual function specification file
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("missing '{0}' line")]
    MissingFunction(FunctionKind),

    #[error("'{kind}' expression: {source}")]
    Expression {
        kind: FunctionKind,
        #[source]
        source: ExprError,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors from index lookups on a grid's domain
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no points")]
    Empty,

    #[error("no grid point brackets {0} from above")]
    NoUpperBracket(f64),

    #[error("invalid grid initialization string '{0}'")]
    InvalidInit(String),
}
