// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Error handling. */

use {romfs::RomfsError, romfs_file_manifest::FileManifestError, thiserror::Error};

/// Primary crate error type.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("resource table name cannot be empty")]
    EmptyName,

    #[error("OUT_DIR is not defined; not running from a build script?")]
    MissingOutDir,

    #[error("packager compression ({packager}) disagrees with configuration ({config})")]
    PackagerMismatch { config: bool, packager: bool },

    #[error("file manifest error: {0}")]
    FileManifest(#[from] FileManifestError),

    #[error("resource error: {0}")]
    Romfs(#[from] RomfsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} resource(s) could not be packaged: {}", .0.len(), .0.join(", "))]
    SkippedEntries(Vec<String>),
}

/// Result wrapper for this crate.
pub type Result<T> = std::result::Result<T, GeneratorError>;
