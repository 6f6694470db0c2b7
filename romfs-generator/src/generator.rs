// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/*! End-to-end resource table generation. */

use {
    crate::{
        config::GeneratorConfig,
        emit::write_rust_module,
        error::{GeneratorError, Result},
        packager::{PackagedTable, Packager},
    },
    romfs_file_manifest::Discovery,
    std::{
        io::Write,
        path::{Path, PathBuf},
    },
};

/// File name of the generated module written by [Generator::run_from_build].
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "romfs_resources.rs";

/// Produces resource tables from a [GeneratorConfig].
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    packager: Packager,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let packager = Packager::new(config.compress);

        Ok(Self { config, packager })
    }

    /// Replace the packager, e.g. to use a custom compressor.
    ///
    /// The packager must agree with the configured compression setting.
    pub fn with_packager(mut self, packager: Packager) -> Result<Self> {
        if packager.is_compressing() != self.config.compress {
            return Err(GeneratorError::PackagerMismatch {
                config: self.config.compress,
                packager: packager.is_compressing(),
            });
        }

        self.packager = packager;

        Ok(self)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Find the files that would be packaged.
    pub fn discover(&self) -> Result<Discovery> {
        Ok(self.config.discoverer()?.discover()?)
    }

    /// Discover and package files.
    ///
    /// In strict mode, any file that could not be packaged is an error.
    pub fn package(&self) -> Result<PackagedTable> {
        let discovery = self.discover()?;
        let table = self.packager.package(&self.config.name, &discovery.files)?;

        if !table.warnings.is_empty() && self.config.strict {
            return Err(GeneratorError::SkippedEntries(
                table.warnings.iter().map(|w| w.path.clone()).collect(),
            ));
        }

        for warning in &table.warnings {
            log::warn!("resource not packaged: {}", warning);
        }

        log::info!(
            "packaged {} resources into table {} ({})",
            table.entries.len(),
            table.name,
            if table.compressed {
                "compressed"
            } else {
                "uncompressed"
            }
        );

        Ok(table)
    }

    /// Package files and write the generated module to a writer.
    pub fn write<W: Write>(&self, dest: &mut W) -> Result<PackagedTable> {
        let table = self.package()?;
        write_rust_module(&table, dest)?;

        Ok(table)
    }

    /// Package files and write the generated module to a file.
    ///
    /// The file is only rewritten if its content changes.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<PackagedTable> {
        let path = path.as_ref();

        let mut code = Vec::new();
        let table = self.write(&mut code)?;

        if std::fs::read(path).ok().as_deref() == Some(code.as_slice()) {
            log::info!("{} is up to date", path.display());
        } else {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            log::info!("writing {}", path.display());
            std::fs::write(path, &code)?;
        }

        Ok(table)
    }

    /// Generate the module from a Cargo build script.
    ///
    /// Writes [DEFAULT_OUTPUT_FILE_NAME] into `OUT_DIR` and returns its path.
    pub fn run_from_build(&self) -> Result<PathBuf> {
        let out_dir = std::env::var_os("OUT_DIR").ok_or(GeneratorError::MissingOutDir)?;
        let dest = PathBuf::from(out_dir).join(DEFAULT_OUTPUT_FILE_NAME);

        let table = self.write_to(&dest)?;

        if self.config.emit_cargo_directives {
            for line in self.cargo_directives(&table) {
                println!("{}", line);
            }
        }

        Ok(dest)
    }

    /// `cargo:` lines making the build script rerun when resources change.
    pub fn cargo_directives(&self, table: &PackagedTable) -> Vec<String> {
        let mut paths = vec![self.config.root.clone()];

        // A missing path would rerun the build script every time. Creating
        // the ignore file later is caught by the root directory.
        let ignore_file = self.config.ignore_file_path();
        if self.config.use_ignore_file && ignore_file.exists() {
            paths.push(ignore_file);
        }
        paths.extend(table.entries.iter().map(|e| e.source.clone()));

        paths
            .into_iter()
            .map(|p| format!("cargo:rerun-if-changed={}", p.display()))
            .collect()
    }
}
