// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Error handling. */

use {std::path::PathBuf, thiserror::Error};

/// Primary crate error type.
#[derive(Debug, Error)]
pub enum FileManifestError {
    #[error("resource root is not a directory: {0}")]
    MissingRoot(PathBuf),

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("path is not below resource root: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}

/// Result wrapper for this crate.
pub type Result<T> = std::result::Result<T, FileManifestError>;
