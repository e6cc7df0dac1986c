// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use std::path::{Path, PathBuf};

/// Error type for loading and reconciling annotation exports.
///
/// Loader errors always carry the path of the offending document so the CLI
/// can report which file failed and which structural expectation it broke.
#[derive(Debug)]
pub enum Error {
    /// The document could not be opened or read.
    IoError(PathBuf, std::io::Error),
    /// The document is not valid JSON or lacks a required key or structure.
    FormatError(PathBuf, String),
    /// A COCO annotation references an image id that is not declared in
    /// `images` and the reference policy is `fail`.
    ReferenceError(String),
    /// Two keys of the same source resolve to one filename and the duplicate
    /// policy is `fail`.
    ConflictError(String),
    /// Settings could not be loaded.
    ConfigError(config::ConfigError),
    /// A result could not be serialized.
    JsonError(serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: &Path, err: std::io::Error) -> Self {
        Error::IoError(path.to_path_buf(), err)
    }

    pub(crate) fn format(path: &Path, msg: impl Into<String>) -> Self {
        Error::FormatError(path.to_path_buf(), msg.into())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::ConfigError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IoError(path, e) => write!(f, "I/O error reading {}: {}", path.display(), e),
            Error::FormatError(path, msg) => {
                write!(f, "Format error in {}: {}", path.display(), msg)
            }
            Error::ReferenceError(msg) => write!(f, "Dangling reference: {}", msg),
            Error::ConflictError(msg) => write!(f, "Duplicate filename: {}", msg),
            Error::ConfigError(e) => write!(f, "Configuration error: {}", e),
            Error::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(_, e) => Some(e),
            Error::ConfigError(e) => Some(e),
            Error::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_file() {
        let err = Error::format(Path::new("data/via.json"), "missing `_via_img_metadata`");
        let msg = err.to_string();
        assert!(msg.contains("data/via.json"));
        assert!(msg.contains("_via_img_metadata"));
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let err = Error::io(
            Path::new("missing.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error reading missing.json"));
    }
}
