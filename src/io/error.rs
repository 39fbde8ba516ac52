//! Error types for model construction, rendering and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all model operations
///
/// A contradiction during a collapse attempt is not an error: it is reported by
/// [`CollapseDriver::run`](crate::algorithm::executor::CollapseDriver::run)
/// returning `false`. Every variant here is fatal for the operation that produced it.
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load a sample or texture image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet model requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Model parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile catalog or job list is malformed
    Catalog {
        /// Path (or label) of the document being read
        path: PathBuf,
        /// Description of the malformation
        reason: String,
    },

    /// A neighbor rule references a tile that the catalog never declares
    UnknownTile {
        /// Name of the referenced tile
        name: String,
    },

    /// The requested subset is not declared in the catalog
    UnknownSubset {
        /// Name of the requested subset
        name: String,
    },

    /// Rendering was requested without a successful collapse
    NotCollapsed,

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Catalog { path, reason } => {
                write!(f, "Malformed catalog '{}': {reason}", path.display())
            }
            Self::UnknownTile { name } => {
                write!(f, "Neighbor rule references unknown tile '{name}'")
            }
            Self::UnknownSubset { name } => {
                write!(f, "Subset '{name}' is not declared in the catalog")
            }
            Self::NotCollapsed => {
                write!(f, "Rendering requires a successful collapse run")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a catalog error for the document at `path`
pub fn catalog_error(path: impl Into<PathBuf>, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Catalog {
        path: path.into(),
        reason: reason.to_string(),
    }
}
