// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Conversion of discovered files into resource table entries. */

use {
    crate::error::Result,
    romfs::{ResourceEntry, ResourceTable, SENTINEL},
    romfs_file_manifest::DiscoveredFile,
    std::path::PathBuf,
};

/// Function compressing a sentinel-terminated payload.
pub type Compressor = fn(&[u8]) -> romfs::Result<Vec<u8>>;

/// A packaged resource, ready to be emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackagedEntry {
    /// Normalized path relative to the resource root.
    pub path: String,
    /// The file the entry was read from.
    pub source: PathBuf,
    /// The payload: sentinel-terminated content, compressed if enabled.
    pub data: Vec<u8>,
}

/// A file that was dropped from the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageWarning {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for PackageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The in-memory form of a resource table produced at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackagedTable {
    pub name: String,
    pub compressed: bool,
    /// Entries in discovery order.
    pub entries: Vec<PackagedEntry>,
    /// Files that were discovered but could not be packaged.
    pub warnings: Vec<PackageWarning>,
}

impl PackagedTable {
    /// Entry paths in table order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Borrow the entries as runtime [ResourceEntry] values.
    pub fn resource_entries(&self) -> Vec<ResourceEntry<'_>> {
        self.entries
            .iter()
            .map(|e| ResourceEntry::new(&e.path, &e.data))
            .collect()
    }

    /// Obtain a runtime table over previously borrowed entries.
    ///
    /// ```ignore
    /// let entries = packaged.resource_entries();
    /// let store = ResourceStore::new(packaged.table(&entries))?;
    /// ```
    pub fn table<'a>(&'a self, entries: &'a [ResourceEntry<'a>]) -> ResourceTable<'a> {
        ResourceTable::new(&self.name, self.compressed, entries)
    }
}

/// Turn file content into a payload.
///
/// Appends the sentinel byte and compresses the result if requested.
pub fn package_payload(
    mut data: Vec<u8>,
    compressor: Option<Compressor>,
) -> romfs::Result<Vec<u8>> {
    data.push(SENTINEL);

    match compressor {
        Some(compress) => compress(&data),
        None => Ok(data),
    }
}

/// Reads discovered files and produces a [PackagedTable].
#[derive(Clone, Copy)]
pub struct Packager {
    compressor: Option<Compressor>,
}

impl std::fmt::Debug for Packager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packager")
            .field("compressing", &self.is_compressing())
            .finish()
    }
}

impl Packager {
    /// Construct an instance, compressing with maximum deflate compression if
    /// `compress` is set.
    pub fn new(compress: bool) -> Self {
        Self {
            compressor: if compress {
                Some(romfs::compression::compress)
            } else {
                None
            },
        }
    }

    /// Construct an instance compressing with a custom function.
    pub fn with_compressor(compressor: Compressor) -> Self {
        Self {
            compressor: Some(compressor),
        }
    }

    pub fn is_compressing(&self) -> bool {
        self.compressor.is_some()
    }

    /// Package files in the order given.
    ///
    /// Failing to read a file aborts. Failing to compress one drops it from
    /// the table and records a [PackageWarning].
    pub fn package(&self, name: &str, files: &[DiscoveredFile]) -> Result<PackagedTable> {
        let mut table = PackagedTable {
            name: name.to_string(),
            compressed: self.is_compressing(),
            entries: Vec::with_capacity(files.len()),
            warnings: vec![],
        };

        for file in files {
            let content = file.read()?;
            let original_len = content.len();

            let data = match package_payload(content, self.compressor) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("dropping resource {}: {}", file.path, e);
                    table.warnings.push(PackageWarning {
                        path: file.path.clone(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            log::info!(
                "bundling resource: {} ({} bytes -> {} bytes)",
                file.path,
                original_len,
                data.len()
            );

            table.entries.push(PackagedEntry {
                path: file.path.clone(),
                source: file.source.clone(),
                data,
            });
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        romfs::{compression::decompress, ResourceStore, RomfsError, StoreSettings},
        romfs_file_manifest::FileDiscoverer,
        std::path::Path,
    };

    fn write_fixture(root: &Path) -> Result<()> {
        std::fs::create_dir_all(root.join("subdir"))?;
        std::fs::write(root.join("hello.txt"), b"Hello, libromfs!")?;
        std::fs::write(root.join("empty.txt"), b"")?;
        std::fs::write(root.join("binary.bin"), b"\x89PNG\r\n\x1a\n\x00\x00")?;
        std::fs::write(root.join("subdir/nested.txt"), b"nested in a subdirectory")?;

        Ok(())
    }

    #[test]
    fn test_package_payload() -> Result<()> {
        assert_eq!(package_payload(b"abc".to_vec(), None)?, b"abc\0");
        assert_eq!(package_payload(vec![], None)?, b"\0");

        let compressed = package_payload(b"abc".to_vec(), Some(romfs::compression::compress))?;
        assert_eq!(decompress(&compressed)?, b"abc\0");

        Ok(())
    }

    #[test]
    fn test_package_raw() -> Result<()> {
        let td = tempfile::tempdir()?;
        write_fixture(td.path())?;
        let files = FileDiscoverer::new(td.path()).discover()?.files;

        let table = Packager::new(false).package("test_project", &files)?;

        assert!(!table.compressed);
        assert!(table.warnings.is_empty());
        assert_eq!(
            table.paths().collect::<Vec<_>>(),
            vec!["binary.bin", "empty.txt", "hello.txt", "subdir/nested.txt"]
        );
        assert_eq!(table.entries[2].data, b"Hello, libromfs!\0");
        assert_eq!(table.entries[1].data, b"\0");
        assert_eq!(table.entries[2].source, td.path().join("hello.txt"));

        Ok(())
    }

    #[test]
    fn test_sizes_match_source_files() -> Result<()> {
        let td = tempfile::tempdir()?;
        write_fixture(td.path())?;
        let files = FileDiscoverer::new(td.path()).discover()?.files;

        for (compress, settings) in [
            (false, StoreSettings::raw()),
            (true, StoreSettings::compressed()),
        ] {
            let table = Packager::new(compress).package("test_project", &files)?;
            let entries = table.resource_entries();
            let store = ResourceStore::with_settings(table.table(&entries), settings)?;

            assert_eq!(store.name(), "test_project");
            assert_eq!(store.len(), files.len());

            for file in &files {
                let original = std::fs::read(&file.source)?;
                let resource = store.get(&file.path)?;

                assert_eq!(resource.size(), original.len());
                assert_eq!(resource.data(), original.as_slice());
            }
        }

        Ok(())
    }

    #[test]
    fn test_compressed_payloads_roundtrip() -> Result<()> {
        let td = tempfile::tempdir()?;
        write_fixture(td.path())?;
        let files = FileDiscoverer::new(td.path()).discover()?.files;

        let table = Packager::new(true).package("test_project", &files)?;
        assert!(table.compressed);

        for (entry, file) in table.entries.iter().zip(files.iter()) {
            let mut expected = std::fs::read(&file.source)?;
            expected.push(0);

            assert_eq!(decompress(&entry.data)?, expected);
        }

        Ok(())
    }

    fn fail_on_binary(data: &[u8]) -> romfs::Result<Vec<u8>> {
        if data.starts_with(b"\x89PNG") {
            Err(RomfsError::Compression("simulated failure".to_string()))
        } else {
            romfs::compression::compress(data)
        }
    }

    #[test]
    fn test_compression_failure_drops_entry_with_warning() -> Result<()> {
        let td = tempfile::tempdir()?;
        write_fixture(td.path())?;
        let files = FileDiscoverer::new(td.path()).discover()?.files;

        let table = Packager::with_compressor(fail_on_binary).package("p", &files)?;

        assert!(!table.paths().any(|p| p == "binary.bin"));
        assert_eq!(table.entries.len(), files.len() - 1);
        assert_eq!(
            table.warnings,
            vec![PackageWarning {
                path: "binary.bin".to_string(),
                message: "failed to compress resource: simulated failure".to_string(),
            }]
        );

        Ok(())
    }

    #[test]
    fn test_unreadable_file_aborts() -> Result<()> {
        let td = tempfile::tempdir()?;
        let files = vec![DiscoveredFile {
            path: "gone.txt".to_string(),
            source: td.path().join("gone.txt"),
        }];

        assert!(Packager::new(false).package("p", &files).is_err());

        Ok(())
    }
}
