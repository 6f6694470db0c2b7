// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! Generator configuration. */

use {
    crate::error::{GeneratorError, Result},
    romfs_file_manifest::{FileDiscoverer, FileFilter, PatternSet, DEFAULT_IGNORE_FILE_NAME},
    std::path::{Path, PathBuf},
};

/// Describes how to produce one resource table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Project identifier stored in the table.
    pub name: String,

    /// Directory whose content is packaged.
    pub root: PathBuf,

    /// If non-empty, only paths matching one of these are packaged.
    pub include_patterns: Vec<String>,

    /// Paths matching any of these are never packaged.
    ///
    /// Rules from the ignore file are appended to these.
    pub exclude_patterns: Vec<String>,

    /// Name of the ignore file inside `root`.
    pub ignore_file_name: String,

    /// Whether to read exclude rules from the ignore file.
    pub use_ignore_file: bool,

    /// Whether to compress payloads.
    ///
    /// Must agree with the `compress-resources` feature of the `romfs` crate
    /// the generated code is compiled against.
    pub compress: bool,

    /// Fail instead of dropping entries that could not be packaged.
    pub strict: bool,

    /// Print `cargo:rerun-if-changed` directives when run from a build script.
    pub emit_cargo_directives: bool,
}

impl GeneratorConfig {
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            root: root.as_ref().to_path_buf(),
            include_patterns: vec![],
            exclude_patterns: vec![],
            ignore_file_name: DEFAULT_IGNORE_FILE_NAME.to_string(),
            use_ignore_file: true,
            compress: false,
            strict: false,
            emit_cargo_directives: false,
        }
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    pub fn ignore_file_name(mut self, name: impl Into<String>) -> Self {
        self.ignore_file_name = name.into();
        self
    }

    pub fn use_ignore_file(mut self, value: bool) -> Self {
        self.use_ignore_file = value;
        self
    }

    pub fn compress(mut self, value: bool) -> Self {
        self.compress = value;
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    pub fn emit_cargo_directives(mut self, value: bool) -> Self {
        self.emit_cargo_directives = value;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(GeneratorError::EmptyName);
        }

        Ok(())
    }

    /// Path to the ignore file consulted by this configuration.
    pub fn ignore_file_path(&self) -> PathBuf {
        self.root.join(&self.ignore_file_name)
    }

    /// Construct a discoverer honoring all filtering settings.
    pub fn discoverer(&self) -> Result<FileDiscoverer> {
        let filter = FileFilter::new(
            self.include_patterns.iter().map(String::as_str).collect::<PatternSet>(),
            self.exclude_patterns.iter().map(String::as_str).collect::<PatternSet>(),
        );

        let discoverer = FileDiscoverer::new(&self.root)
            .with_ignore_file_name(self.ignore_file_name.as_str())
            .with_filter(filter);

        Ok(if self.use_ignore_file {
            discoverer.load_ignore_file()?
        } else {
            discoverer
        })
    }
}
