// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Runtime view over a single resource table entry. */

use {
    crate::{
        compression::decompress,
        error::{Result, RomfsError},
        table::ResourceEntry,
        SENTINEL,
    },
    once_cell::sync::OnceCell,
    std::ffi::CStr,
};

/// A resource backed by a [ResourceEntry].
///
/// The entry payload is borrowed from the resource table. When the table is
/// compressed, the first access to the content decompresses the payload into
/// a buffer owned by this instance. That buffer is populated at most once and
/// is reused by every later access, so the slices returned by [Self::data]
/// are stable for the lifetime of the resource.
///
/// Initialization of the buffer is synchronized: concurrent first access from
/// multiple threads decompresses once and every thread observes the same
/// buffer.
pub struct Resource<'a> {
    entry: ResourceEntry<'a>,
    compressed: bool,
    decompressed: OnceCell<Vec<u8>>,
}

impl<'a> std::fmt::Debug for Resource<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.entry.path())
            .field("payload_len", &self.entry.payload().len())
            .field("compressed", &self.compressed)
            .field("cached", &self.is_cached())
            .finish()
    }
}

impl<'a> Resource<'a> {
    /// Construct an instance bound to a table entry.
    ///
    /// `compressed` is the table-wide compression flag.
    pub fn new(entry: ResourceEntry<'a>, compressed: bool) -> Self {
        Self {
            entry,
            compressed,
            decompressed: OnceCell::new(),
        }
    }

    /// The normalized path of this resource.
    pub fn path(&self) -> &'a str {
        self.entry.path()
    }

    /// Whether the bound payload is non-empty.
    ///
    /// Does not trigger decompression.
    pub fn valid(&self) -> bool {
        !self.entry.payload().is_empty()
    }

    /// Whether the decompression buffer has been populated.
    ///
    /// Always false for resources from uncompressed tables.
    pub fn is_cached(&self) -> bool {
        self.decompressed.get().is_some()
    }

    /// Obtain the full logical payload, including the trailing sentinel byte.
    fn materialize(&self) -> Result<&[u8]> {
        if !self.compressed {
            return Ok(self.entry.payload());
        }

        let buffer = self.decompressed.get_or_try_init(|| {
            let data = decompress(self.entry.payload())?;

            if data.last() != Some(&SENTINEL) {
                return Err(RomfsError::MissingSentinel(self.path().to_string()));
            }

            log::trace!(
                "decompressed {} ({} -> {} bytes)",
                self.path(),
                self.entry.payload().len(),
                data.len()
            );

            Ok(data)
        })?;

        Ok(buffer.as_slice())
    }

    /// Resource content including the sentinel byte, or the decompression error.
    pub fn try_data_with_nul(&self) -> Result<&[u8]> {
        self.materialize()
    }

    /// Resource content excluding the sentinel byte, or the decompression error.
    pub fn try_data(&self) -> Result<&[u8]> {
        let data = self.materialize()?;

        Ok(&data[..data.len().saturating_sub(1)])
    }

    /// Resource content including the trailing sentinel byte.
    ///
    /// # Panics
    ///
    /// Panics if the payload of a compressed table cannot be decompressed.
    pub fn data_with_nul(&self) -> &[u8] {
        self.try_data_with_nul()
            .unwrap_or_else(|e| panic!("corrupt embedded resource: {}", e))
    }

    /// Resource content, without the sentinel byte.
    ///
    /// The length of the returned slice equals [Self::size].
    ///
    /// # Panics
    ///
    /// Panics if the payload of a compressed table cannot be decompressed.
    /// Use [Self::try_data] to handle corruption as a value.
    pub fn data(&self) -> &[u8] {
        self.try_data()
            .unwrap_or_else(|e| panic!("corrupt embedded resource: {}", e))
    }

    /// Size of the original file in bytes.
    ///
    /// For uncompressed tables this is derived from the payload length and
    /// never decompresses. For compressed tables it forces decompression.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [Self::data].
    pub fn size(&self) -> usize {
        if !self.compressed {
            return self.entry.payload().len().saturating_sub(1);
        }

        self.data().len()
    }

    /// View the resource content as text.
    ///
    /// The content is checked for UTF-8 validity on every call. No other
    /// transformation is applied.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [Self::data].
    pub fn string(&self) -> Result<&str> {
        std::str::from_utf8(self.data()).map_err(|source| RomfsError::Utf8 {
            path: self.path().to_string(),
            source,
        })
    }

    /// View the resource content as a C string, terminated by the sentinel.
    ///
    /// Content with interior NUL bytes has no faithful C string view and
    /// is rejected.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [Self::data].
    pub fn c_str(&self) -> Result<&CStr> {
        CStr::from_bytes_with_nul(self.data_with_nul())
            .map_err(|_| RomfsError::InteriorNul(self.path().to_string()))
    }
}
