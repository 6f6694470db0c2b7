// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Recursive discovery of resource files. */

use {
    crate::{
        error::{FileManifestError, Result},
        filter::{FileFilter, FilterDecision},
        ignore::{load_ignore_rules, DEFAULT_IGNORE_FILE_NAME},
    },
    std::path::{Path, PathBuf},
    walkdir::WalkDir,
};

/// Platform housekeeping files that are never packaged.
pub const HOUSEKEEPING_FILE_NAMES: &[&str] = &[".DS_Store"];

/// A file accepted for packaging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path relative to the resource root, using `/` separators.
    pub path: String,
    /// Filesystem path to the file.
    pub source: PathBuf,
}

impl DiscoveredFile {
    /// Read the content of the file.
    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.source)?)
    }
}

/// Bookkeeping about a discovery run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Housekeeping and ignore files skipped before filtering.
    pub skipped: Vec<String>,
    /// Paths rejected by the include list.
    pub not_included: Vec<String>,
    /// Paths rejected by an exclude pattern.
    pub excluded: Vec<String>,
}

/// Result of a discovery run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Accepted files, in discovery order.
    pub files: Vec<DiscoveredFile>,
    pub report: DiscoveryReport,
}

/// Walks a resource root and collects files to package.
///
/// Directory entries are visited depth-first in file name order, so a given
/// tree always yields the same sequence.
#[derive(Clone, Debug)]
pub struct FileDiscoverer {
    root: PathBuf,
    ignore_file_name: String,
    filter: FileFilter,
}

impl FileDiscoverer {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ignore_file_name: DEFAULT_IGNORE_FILE_NAME.to_string(),
            filter: FileFilter::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Set the name of the ignore file.
    ///
    /// Files with this name are never packaged.
    pub fn with_ignore_file_name(mut self, name: impl Into<String>) -> Self {
        self.ignore_file_name = name.into();
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Path to the ignore file inside the root.
    pub fn ignore_file_path(&self) -> PathBuf {
        self.root.join(&self.ignore_file_name)
    }

    /// Append the rules of the root's ignore file to the exclude patterns.
    pub fn load_ignore_file(mut self) -> Result<Self> {
        let rules = load_ignore_rules(&self.root, &self.ignore_file_name)?;
        self.filter.extend_exclude(rules);

        Ok(self)
    }

    fn is_skipped_name(&self, file_name: &str) -> bool {
        file_name == self.ignore_file_name || HOUSEKEEPING_FILE_NAMES.contains(&file_name)
    }

    /// Convert a filesystem path below the root to a normalized resource path.
    fn relative_path(&self, path: &Path) -> Result<String> {
        let relative = path.strip_prefix(&self.root)?;

        let components = relative
            .components()
            .map(|c| {
                c.as_os_str()
                    .to_str()
                    .ok_or_else(|| FileManifestError::NonUtf8Path(path.to_path_buf()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(components.join("/"))
    }

    /// Walk the root and return accepted files.
    pub fn discover(&self) -> Result<Discovery> {
        if !self.root.is_dir() {
            return Err(FileManifestError::MissingRoot(self.root.clone()));
        }

        let mut discovery = Discovery::default();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;

            // Follows symlinks, so links to regular files are packaged.
            if !entry.path().is_file() {
                continue;
            }

            let rel_path = self.relative_path(entry.path())?;

            if self.is_skipped_name(&entry.file_name().to_string_lossy()) {
                log::debug!("skip: {}", rel_path);
                discovery.report.skipped.push(rel_path);
                continue;
            }

            match self.filter.evaluate(&rel_path) {
                FilterDecision::Accepted => {
                    discovery.files.push(DiscoveredFile {
                        path: rel_path,
                        source: entry.path().to_path_buf(),
                    });
                }
                FilterDecision::NotIncluded => {
                    log::info!("not included: {}", rel_path);
                    discovery.report.not_included.push(rel_path);
                }
                FilterDecision::Excluded(pattern) => {
                    log::info!("excluding: {} (matched {})", rel_path, pattern);
                    discovery.report.excluded.push(rel_path);
                }
            }
        }

        Ok(discovery)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::pattern::PatternSet};

    fn populate(root: &Path, files: &[(&str, &[u8])]) -> Result<()> {
        for (path, data) in files {
            let path = root.join(path);
            std::fs::create_dir_all(path.parent().expect("path should have parent"))?;
            std::fs::write(path, data)?;
        }

        Ok(())
    }

    fn paths(discovery: &Discovery) -> Vec<&str> {
        discovery.files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_discover_sorted_and_normalized() -> Result<()> {
        let td = tempfile::tempdir()?;
        populate(
            td.path(),
            &[
                ("hello.txt", b"Hello, libromfs!"),
                ("data.json", b"{}"),
                ("subdir/nested.txt", b"nested"),
                ("subdir/deeper/leaf.bin", b"\x00\x01"),
                ("binary.bin", b"\x89PNG"),
            ],
        )?;

        let discovery = FileDiscoverer::new(td.path()).discover()?;

        assert_eq!(
            paths(&discovery),
            vec![
                "binary.bin",
                "data.json",
                "hello.txt",
                "subdir/deeper/leaf.bin",
                "subdir/nested.txt"
            ]
        );
        assert_eq!(discovery.files[2].read()?, b"Hello, libromfs!");
        assert_eq!(discovery.files[2].source, td.path().join("hello.txt"));

        Ok(())
    }

    #[test]
    fn test_skip_housekeeping_and_ignore_file() -> Result<()> {
        let td = tempfile::tempdir()?;
        populate(
            td.path(),
            &[
                (".DS_Store", b"junk"),
                ("subdir/.DS_Store", b"junk"),
                (DEFAULT_IGNORE_FILE_NAME, b"*.tmp\n"),
                ("keep.txt", b"keep"),
            ],
        )?;

        // The include list cannot resurrect skipped files.
        let filter = FileFilter::new(["**"].iter().copied().collect(), PatternSet::new());
        let discovery = FileDiscoverer::new(td.path())
            .with_filter(filter)
            .discover()?;

        assert_eq!(paths(&discovery), vec!["keep.txt"]);
        assert_eq!(
            discovery.report.skipped,
            vec![".DS_Store", DEFAULT_IGNORE_FILE_NAME, "subdir/.DS_Store"]
        );

        Ok(())
    }

    #[test]
    fn test_ignore_file_rules() -> Result<()> {
        let td = tempfile::tempdir()?;
        populate(
            td.path(),
            &[
                (DEFAULT_IGNORE_FILE_NAME, b"# temporaries\n*.tmp\n\ncache/**\n"),
                ("a.txt", b"a"),
                ("b.tmp", b"b"),
                ("cache/c.txt", b"c"),
                ("sub/d.tmp", b"d"),
            ],
        )?;

        let discovery = FileDiscoverer::new(td.path())
            .load_ignore_file()?
            .discover()?;

        assert_eq!(paths(&discovery), vec!["a.txt"]);
        assert_eq!(
            discovery.report.excluded,
            vec!["b.tmp", "cache/c.txt", "sub/d.tmp"]
        );

        Ok(())
    }

    #[test]
    fn test_custom_ignore_file_name() -> Result<()> {
        let td = tempfile::tempdir()?;
        populate(
            td.path(),
            &[
                (".resignore", b"*.log\n"),
                (DEFAULT_IGNORE_FILE_NAME, b"*.txt\n"),
                ("a.txt", b"a"),
                ("b.log", b"b"),
            ],
        )?;

        let discovery = FileDiscoverer::new(td.path())
            .with_ignore_file_name(".resignore")
            .load_ignore_file()?
            .discover()?;

        // The default ignore file name is just another file now.
        assert_eq!(paths(&discovery), vec![DEFAULT_IGNORE_FILE_NAME, "a.txt"]);

        Ok(())
    }

    #[test]
    fn test_include_list() -> Result<()> {
        let td = tempfile::tempdir()?;
        populate(
            td.path(),
            &[("a.json", b"{}"), ("b.txt", b"b"), ("c/d.json", b"{}")],
        )?;

        let mut filter = FileFilter::default();
        filter.add_include("*.json");
        filter.add_exclude("c/**");

        let discovery = FileDiscoverer::new(td.path())
            .with_filter(filter)
            .discover()?;

        assert_eq!(paths(&discovery), vec!["a.json"]);
        assert_eq!(discovery.report.not_included, vec!["b.txt"]);
        assert_eq!(discovery.report.excluded, vec!["c/d.json"]);

        Ok(())
    }

    #[test]
    fn test_empty_directories_yield_nothing() -> Result<()> {
        let td = tempfile::tempdir()?;
        std::fs::create_dir_all(td.path().join("a/b/c"))?;

        let discovery = FileDiscoverer::new(td.path()).discover()?;
        assert!(discovery.files.is_empty());

        Ok(())
    }

    #[test]
    fn test_missing_root() -> Result<()> {
        let td = tempfile::tempdir()?;
        let missing = td.path().join("missing");

        let res = FileDiscoverer::new(&missing).discover();
        assert!(matches!(res, Err(FileManifestError::MissingRoot(p)) if p == missing));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_followed() -> Result<()> {
        let td = tempfile::tempdir()?;
        let outside = tempfile::tempdir()?;
        populate(outside.path(), &[("target.txt", b"linked")])?;
        std::os::unix::fs::symlink(
            outside.path().join("target.txt"),
            td.path().join("link.txt"),
        )?;
        std::os::unix::fs::symlink(outside.path().join("nowhere"), td.path().join("dangling"))?;

        let discovery = FileDiscoverer::new(td.path()).discover()?;
        assert_eq!(paths(&discovery), vec!["link.txt"]);
        assert_eq!(discovery.files[0].read()?, b"linked");

        Ok(())
    }
}
