// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Error handling. */

use thiserror::Error;

/// Primary crate error type.
#[derive(Debug, Error)]
pub enum RomfsError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("failed to decompress resource: {0}")]
    Decompression(String),

    #[error("failed to compress resource: {0}")]
    Compression(String),

    #[error("resource payload is not terminated by a sentinel byte: {0}")]
    MissingSentinel(String),

    #[error(
        "compression mismatch: resource table compressed={table} but runtime expects \
         compressed={runtime}; generated resources and the romfs crate must both be \
         built with or without compression"
    )]
    ConfigMismatch { table: bool, runtime: bool },

    #[error("duplicate resource path in table: {0}")]
    DuplicatePath(String),

    #[error("resource is not valid UTF-8: {path}: {source}")]
    Utf8 {
        path: String,
        source: std::str::Utf8Error,
    },

    #[error("resource contains an interior NUL byte and has no C string view: {0}")]
    InteriorNul(String),
}

/// Result wrapper for this crate.
pub type Result<T> = std::result::Result<T, RomfsError>;
