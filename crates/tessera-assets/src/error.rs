//! Error types for the asset cache.

use std::any::TypeId;
use std::fmt;
use std::path::PathBuf;

use crate::state::LoadStyle;

/// Errors that can occur during asset operations.
///
/// [`AssetError::NoHandler`] is a configuration error and is returned to the
/// caller. Everything a loader produces is a load failure: the handler logs
/// it and reports the entry as not loaded.
#[derive(Debug)]
pub enum AssetError {
    /// The requested file or memory block does not exist.
    NotFound {
        /// The path or key that was looked up.
        path: String,
    },

    /// Failed to read asset data from disk.
    IoError {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// No handler registered for this asset type.
    NoHandler {
        /// The type ID of the asset.
        type_id: TypeId,
        /// Human-readable type name.
        type_name: &'static str,
    },

    /// A handler for this asset type is already registered.
    HandlerAlreadyRegistered {
        /// Human-readable type name.
        type_name: &'static str,
    },

    /// A file load was requested for an entry without a filename.
    MissingFilename {
        /// The asset id.
        id: String,
    },

    /// An asset id was required but none was given.
    MissingId,

    /// The loader does not implement the requested strategy.
    UnsupportedLoadStyle {
        /// The asset id.
        id: String,
        /// The strategy that was requested.
        style: LoadStyle,
    },

    /// The loader failed to decode the asset.
    LoaderError {
        /// The asset id or path being loaded.
        path: String,
        /// Description of the error.
        message: String,
    },

    /// Generic error with a message.
    Other {
        /// Error message.
        message: String,
    },
}

impl AssetError {
    /// Whether this error comes from setup rather than from loading.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AssetError::NoHandler { .. } | AssetError::HandlerAlreadyRegistered { .. }
        )
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound { path } => {
                write!(f, "Asset not found: {}", path)
            }
            AssetError::IoError { path, source } => {
                write!(f, "IO error loading '{}': {}", path.display(), source)
            }
            AssetError::NoHandler { type_name, .. } => {
                write!(f, "No handler registered for asset type: {}", type_name)
            }
            AssetError::HandlerAlreadyRegistered { type_name } => {
                write!(f, "A handler is already registered for asset type: {}", type_name)
            }
            AssetError::MissingFilename { id } => {
                write!(f, "No filename provided for asset '{}'", id)
            }
            AssetError::MissingId => write!(f, "No asset id provided"),
            AssetError::UnsupportedLoadStyle { id, style } => {
                write!(f, "Cannot load '{}' from {}", id, style)
            }
            AssetError::LoaderError { path, message } => {
                write!(f, "Failed to load '{}': {}", path, message)
            }
            AssetError::Other { message } => {
                write!(f, "Asset error: {}", message)
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

/// Result type alias for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;
